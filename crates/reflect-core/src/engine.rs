//! Session State Engine.
//!
//! Owns every piece of mutable state: mood history and its `latest` cache,
//! the journal log, the journal draft, and the breathing session. The UI
//! sends [`Intent`]s and renders the [`Snapshot`]s that come back; it never
//! touches the store.
//!
//! Persistence is write-through after each mutation. Write failures are
//! logged and swallowed; the in-memory state stays authoritative.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

use crate::breathing::{
    Beat, BreathingPlan, BreathingSession, ManualMetronome, Metronome, TickOutcome,
};
use crate::journal::{self, JournalEntry, JOURNAL_CAPACITY};
use crate::mood::{MoodEntry, MoodLevel, MOOD_HISTORY_CAPACITY};
use crate::storage::{
    BoundedLog, KeyValueStore, Keyspace, PlainText, SingleSlot, StoreKey,
};

/// Wall clock used to timestamp new entries.
pub trait TimeSource {
    fn now(&self) -> DateTime<Utc>;
}

/// `Utc::now()` at millisecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

impl<F: Fn() -> DateTime<Utc>> TimeSource for F {
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mood_latest: Option<MoodEntry>,
    pub mood_history: Vec<MoodEntry>,
    pub journal_entries: Vec<JournalEntry>,
    pub draft: Option<String>,
    pub breathing: BreathingSession,
}

/// A user action (or clock tick) the engine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    RecordMood(MoodLevel),
    SaveJournalEntry { prompt: String, text: String },
    DeleteJournalEntry(String),
    UpdateDraft(String),
    StartBreathing,
    PauseBreathing,
    ResetBreathing,
    TickBreathing,
}

pub struct SessionEngine<S, M = ManualMetronome> {
    store: S,
    metronome: M,
    time: Box<dyn TimeSource + Send>,
    plan: BreathingPlan,
    mood_latest: SingleSlot<MoodEntry>,
    mood_history: BoundedLog<MoodEntry>,
    journal: BoundedLog<JournalEntry>,
    draft: SingleSlot<String, PlainText>,
    breathing: BreathingSession,
    /// Bumped on every arm; beats from any other generation are stale.
    generation: u64,
    armed: Option<u64>,
}

impl<S: KeyValueStore, M: Metronome> SessionEngine<S, M> {
    /// Build the engine from whatever `store` holds.
    ///
    /// Absent or corrupt slots start empty. If the `latest` cache disagrees
    /// with the head of the history, the history wins.
    pub fn hydrate(store: S, metronome: M, keys: &Keyspace) -> Self {
        let mood_history: BoundedLog<MoodEntry> = BoundedLog::load(
            &store,
            keys.key(StoreKey::MoodHistory),
            MOOD_HISTORY_CAPACITY,
        );
        let mut mood_latest: SingleSlot<MoodEntry> =
            SingleSlot::load(&store, keys.key(StoreKey::MoodLatest));
        let journal: BoundedLog<JournalEntry> = BoundedLog::load(
            &store,
            keys.key(StoreKey::JournalEntries),
            JOURNAL_CAPACITY,
        );
        let draft: SingleSlot<String, PlainText> =
            SingleSlot::load(&store, keys.key(StoreKey::JournalDraft));

        if let Some(head) = mood_history.first() {
            if mood_latest.get() != Some(head) {
                tracing::warn!("mood latest out of step with history, using history head");
                mood_latest = SingleSlot::hydrated(mood_latest.key(), head.clone());
            }
        }

        tracing::debug!(
            moods = mood_history.len(),
            entries = journal.len(),
            has_draft = draft.get().is_some(),
            "session engine hydrated"
        );

        Self {
            store,
            metronome,
            time: Box::new(SystemTime),
            plan: BreathingPlan::standard(),
            mood_latest,
            mood_history,
            journal,
            draft,
            breathing: BreathingSession::new(),
            generation: 0,
            armed: None,
        }
    }

    /// Replace the clock used for entry timestamps.
    pub fn with_time_source(mut self, time: impl TimeSource + Send + 'static) -> Self {
        self.time = Box::new(time);
        self
    }

    // ── Mood ─────────────────────────────────────────────────────────

    /// Record a check-in; history and `latest` receive the same entry.
    pub fn record_mood(&mut self, level: MoodLevel) -> MoodEntry {
        let entry = MoodEntry {
            level,
            timestamp: self.time.now(),
        };
        self.mood_history.prepend(&mut self.store, entry.clone());
        self.mood_latest.set(&mut self.store, entry.clone());
        tracing::debug!(level = %level, history = self.mood_history.len(), "mood recorded");
        entry
    }

    pub fn mood_latest(&self) -> Option<&MoodEntry> {
        self.mood_latest.get()
    }

    pub fn mood_history(&self) -> &[MoodEntry] {
        self.mood_history.items()
    }

    // ── Journal ──────────────────────────────────────────────────────

    /// Save `text` (trimmed) under `prompt` and clear the draft.
    ///
    /// Blank text is ignored: no entry, draft untouched, `None` returned.
    pub fn save_journal_entry(&mut self, prompt: &str, text: &str) -> Option<JournalEntry> {
        let Some(text) = journal::normalize_text(text) else {
            tracing::debug!("ignoring blank journal entry");
            return None;
        };

        let log = &self.journal;
        let entry = JournalEntry {
            id: journal::new_entry_id(|id| log.contains_id(id)),
            prompt: prompt.to_string(),
            text: text.to_string(),
            timestamp: self.time.now(),
        };
        self.journal.prepend(&mut self.store, entry.clone());
        self.draft.clear(&mut self.store);
        tracing::debug!(id = %entry.id, entries = self.journal.len(), "journal entry saved");
        Some(entry)
    }

    /// Delete by id. Unknown ids are a no-op; returns whether anything went.
    pub fn delete_journal_entry(&mut self, id: &str) -> bool {
        let removed = self.journal.remove_by_id(&mut self.store, id);
        tracing::debug!(id, removed, "journal delete");
        removed
    }

    /// Autosave the raw editor text.
    pub fn update_draft(&mut self, text: &str) {
        self.draft.set(&mut self.store, text.to_string());
    }

    pub fn journal_entries(&self) -> &[JournalEntry] {
        self.journal.items()
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.get().map(String::as_str)
    }

    // ── Breathing ────────────────────────────────────────────────────

    /// Restart the session and (re)arm the clock.
    pub fn start_breathing(&mut self) -> BreathingSession {
        self.breathing.start(&self.plan);
        self.generation += 1;
        self.armed = Some(self.generation);
        self.metronome.arm(self.generation);
        tracing::info!(generation = self.generation, "breathing started");
        self.breathing
    }

    pub fn pause_breathing(&mut self) -> BreathingSession {
        self.disarm();
        self.breathing.pause();
        tracing::debug!(elapsed = self.breathing.elapsed_total, "breathing paused");
        self.breathing
    }

    pub fn reset_breathing(&mut self) -> BreathingSession {
        self.disarm();
        self.breathing.reset();
        tracing::debug!("breathing reset");
        self.breathing
    }

    /// Advance one second. No effect unless running.
    pub fn tick_breathing(&mut self) -> BreathingSession {
        if self.breathing.tick(&self.plan) == TickOutcome::Finished {
            self.disarm();
            tracing::info!("breathing session finished");
        }
        self.breathing
    }

    /// Tick for a clock beat, unless it is stale. Returns whether it ticked.
    pub fn on_beat(&mut self, beat: Beat) -> bool {
        if self.armed != Some(beat.generation) {
            tracing::trace!(beat = beat.generation, armed = ?self.armed, "dropping stale beat");
            return false;
        }
        self.tick_breathing();
        true
    }

    pub fn breathing(&self) -> BreathingSession {
        self.breathing
    }

    pub fn plan(&self) -> &BreathingPlan {
        &self.plan
    }

    /// Generation of the currently armed clock.
    pub fn armed_generation(&self) -> Option<u64> {
        self.armed
    }

    fn disarm(&mut self) {
        if self.armed.take().is_some() {
            self.metronome.disarm();
        }
    }

    // ── Snapshot / dispatch ──────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mood_latest: self.mood_latest.get().cloned(),
            mood_history: self.mood_history.items().to_vec(),
            journal_entries: self.journal.items().to_vec(),
            draft: self.draft.get().cloned(),
            breathing: self.breathing,
        }
    }

    /// Apply one intent and return the resulting state.
    pub fn dispatch(&mut self, intent: Intent) -> Snapshot {
        match intent {
            Intent::RecordMood(level) => {
                self.record_mood(level);
            }
            Intent::SaveJournalEntry { prompt, text } => {
                self.save_journal_entry(&prompt, &text);
            }
            Intent::DeleteJournalEntry(id) => {
                self.delete_journal_entry(&id);
            }
            Intent::UpdateDraft(text) => self.update_draft(&text),
            Intent::StartBreathing => {
                self.start_breathing();
            }
            Intent::PauseBreathing => {
                self.pause_breathing();
            }
            Intent::ResetBreathing => {
                self.reset_breathing();
            }
            Intent::TickBreathing => {
                self.tick_breathing();
            }
        }
        self.snapshot()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn metronome(&self) -> &M {
        &self.metronome
    }

    /// Give back the store and metronome.
    pub fn into_parts(self) -> (S, M) {
        (self.store, self.metronome)
    }
}
