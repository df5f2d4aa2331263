//! Journal entries and writing prompts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::Identified;

/// Number of saved entries kept.
pub const JOURNAL_CAPACITY: usize = 50;

/// Prompts offered above the editor, first one selected by default.
pub const JOURNAL_PROMPTS: [&str; 5] = [
    "What feels heavy today?",
    "What is one small thing you managed today?",
    "What do you need more of right now?",
    "If your mind could speak kindly, what would it say?",
    "What has been taking up space in your head?",
];

pub fn default_prompt() -> &'static str {
    JOURNAL_PROMPTS[0]
}

/// A saved entry. `text` is trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub prompt: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Identified for JournalEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Trim `raw`, returning `None` when nothing is left to save.
pub fn normalize_text(raw: &str) -> Option<&str> {
    let text = raw.trim();
    (!text.is_empty()).then_some(text)
}

/// Fresh entry id not satisfying `taken`.
pub fn new_entry_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if !taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_rejects_blank() {
        assert_eq!(normalize_text("  hello \n"), Some("hello"));
        assert_eq!(normalize_text("   "), None);
        assert_eq!(normalize_text("\t\n"), None);
        assert_eq!(normalize_text(""), None);
    }

    #[test]
    fn new_entry_id_skips_taken_ids() {
        let first = new_entry_id(|_| false);
        let second = new_entry_id(|id| id == first);
        assert_ne!(first, second);
        assert!(uuid::Uuid::parse_str(&second).is_ok());
    }

    #[test]
    fn entry_uses_id_for_identity() {
        let entry = JournalEntry {
            id: "abc".into(),
            prompt: default_prompt().into(),
            text: "ok".into(),
            timestamp: Utc::now(),
        };
        assert_eq!(Identified::id(&entry), "abc");
    }

    #[test]
    fn entry_accepts_legacy_numeric_string_id() {
        let entry: JournalEntry = serde_json::from_str(
            r#"{"id":"1760430000000","prompt":"What feels heavy today?","text":"work","timestamp":"2026-10-14T08:20:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.id, "1760430000000");
    }
}
