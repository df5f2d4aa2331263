//! Integration tests for hydration and write-through persistence.

use reflect_core::storage::{open_store, Backend, StorageConfig};
use reflect_core::{
    JournalEntry, KeyValueStore, Keyspace, ManualMetronome, MemoryStore, MoodEntry, MoodLevel,
    SessionEngine, SqliteStore, StoreError,
};

/// Store that accepts reads but fails every write.
#[derive(Default)]
struct BrokenStore {
    inner: MemoryStore,
    failed_writes: usize,
}

impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        self.failed_writes += 1;
        Err(StoreError::Unavailable("quota exceeded".into()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
        self.failed_writes += 1;
        Err(StoreError::Unavailable("quota exceeded".into()))
    }
}

fn hydrate<S: KeyValueStore>(store: S) -> SessionEngine<S> {
    SessionEngine::hydrate(store, ManualMetronome::new(), &Keyspace::default())
}

#[test]
fn state_survives_reopen_on_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reflect.db");

    let (mood, entry) = {
        let mut e = hydrate(SqliteStore::open(&path).unwrap());
        let mood = e.record_mood(MoodLevel::Coping);
        let entry = e.save_journal_entry("What feels heavy today?", "deadlines").unwrap();
        e.update_draft("still thinking");
        (mood, entry)
    };

    let e = hydrate(SqliteStore::open(&path).unwrap());
    assert_eq!(e.mood_latest(), Some(&mood));
    assert_eq!(e.mood_history(), &[mood.clone()]);
    assert_eq!(e.journal_entries(), &[entry]);
    assert_eq!(e.draft(), Some("still thinking"));
}

#[test]
fn stored_values_use_documented_keys_and_formats() {
    let mut e = hydrate(MemoryStore::new());
    e.record_mood(MoodLevel::ReallyStruggling);
    e.save_journal_entry("p", "one");
    e.update_draft("raw draft ");

    let store = e.store();
    let history: Vec<MoodEntry> =
        serde_json::from_str(&store.get("mood_history").unwrap().unwrap()).unwrap();
    assert_eq!(history.len(), 1);
    let latest_raw = store.get("mood_latest").unwrap().unwrap();
    assert!(latest_raw.contains("\"Really struggling\""));
    let entries: Vec<JournalEntry> =
        serde_json::from_str(&store.get("journal_entries").unwrap().unwrap()).unwrap();
    assert_eq!(entries[0].text, "one");
    assert_eq!(store.get("journal_draft").unwrap().as_deref(), Some("raw draft "));
}

#[test]
fn corrupt_slots_hydrate_as_empty() {
    let mut store = MemoryStore::new();
    store.set("mood_history", "not json").unwrap();
    store.set("mood_latest", "{\"level\":\"Ecstatic\"}").unwrap();
    store.set("journal_entries", "[{\"id\":1}]").unwrap();

    let e = hydrate(store);
    assert!(e.mood_history().is_empty());
    assert!(e.mood_latest().is_none());
    assert!(e.journal_entries().is_empty());
}

#[test]
fn latest_follows_history_head_when_out_of_step() {
    let mut seed = hydrate(MemoryStore::new());
    seed.record_mood(MoodLevel::Steady);
    let newest = seed.record_mood(MoodLevel::DoingOkay);
    let (mut store, _) = seed.into_parts();
    store.remove("mood_latest").unwrap();

    let e = hydrate(store);
    assert_eq!(e.mood_latest(), Some(&newest));
}

#[test]
fn failed_writes_do_not_roll_back_memory() {
    let mut e = hydrate(BrokenStore::default());
    let mood = e.record_mood(MoodLevel::Struggling);
    let saved = e.save_journal_entry("p", "written anyway").unwrap();
    e.update_draft("draft");

    assert_eq!(e.mood_latest(), Some(&mood));
    assert_eq!(e.mood_history(), &[mood]);
    assert_eq!(e.journal_entries(), &[saved.clone()]);
    assert_eq!(e.draft(), Some("draft"));
    assert!(e.delete_journal_entry(&saved.id));
    assert!(e.journal_entries().is_empty());
    assert!(e.store().failed_writes >= 5);
}

#[test]
fn prefixed_keyspace_isolates_profiles() {
    let mut store = MemoryStore::new();
    {
        let mut e = SessionEngine::hydrate(
            &mut store,
            ManualMetronome::new(),
            &Keyspace::new("reflect"),
        );
        e.record_mood(MoodLevel::Steady);
    }
    assert!(store.get("reflect_mood_latest").unwrap().is_some());
    assert!(store.get("mood_latest").unwrap().is_none());

    let e = hydrate(store);
    assert!(e.mood_latest().is_none());
}

#[test]
fn configured_sqlite_backend_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        backend: Backend::Sqlite,
        path: Some(dir.path().join("data").join("reflect.db")),
        key_prefix: String::new(),
    };

    {
        let mut e = hydrate(open_store(&config).unwrap());
        e.save_journal_entry("p", "kept across launches");
    }
    let e = hydrate(open_store(&config).unwrap());
    assert_eq!(e.journal_entries()[0].text, "kept across launches");
}
