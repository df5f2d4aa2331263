//! # Reflect Core Library
//!
//! Session state for Reflect, a self-help companion for people waiting for
//! therapy. Everything lives on the device; there is no server.
//!
//! ## Architecture
//!
//! - **Breathing**: a 60-second inhale/hold/exhale session advanced one
//!   second at a time, with a generation-tagged clock so paused sessions
//!   never move
//! - **Storage**: a string key-value store (SQLite or in-memory) with
//!   bounded newest-first logs and single-value slots layered on top
//! - **Engine**: mood check-ins, journal entries, the autosaved draft, and
//!   the breathing session behind one intent/snapshot API
//! - **Display / Content**: formatting helpers and the static coping catalogue
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: owns and persists all mutable state
//! - [`BreathingSession`]: breathing state machine
//! - [`BoundedLog`]: capacity-bounded persisted sequence
//! - [`Config`]: application configuration management

pub mod breathing;
pub mod content;
pub mod display;
pub mod engine;
pub mod error;
pub mod journal;
pub mod mood;
pub mod runtime;
pub mod storage;
pub mod telemetry;

pub use breathing::{
    Beat, BreathingPlan, BreathingSession, IntervalMetronome, ManualMetronome, Metronome, Phase,
};
pub use engine::{Intent, SessionEngine, Snapshot, SystemTime, TimeSource};
pub use error::{ConfigError, CoreError, StoreError};
pub use journal::{JournalEntry, JOURNAL_CAPACITY};
pub use mood::{MoodEntry, MoodKey, MoodLevel, MOOD_HISTORY_CAPACITY};
pub use storage::{BoundedLog, Config, KeyValueStore, Keyspace, MemoryStore, SqliteStore, StoreKey};
