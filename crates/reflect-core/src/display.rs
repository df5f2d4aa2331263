//! Text the renderer shows for engine state.
//!
//! Dates use the en-GB short form (`14 Oct 2026`). Snippets are cut on char
//! boundaries and marked with a trailing ellipsis.

use chrono::{DateTime, Utc};

use crate::journal::JournalEntry;
use crate::mood::MoodEntry;

/// Snippet length on the home journal card.
pub const HOME_CARD_SNIPPET: usize = 42;
/// Snippet length in the journal list.
pub const LIST_ROW_SNIPPET: usize = 70;
/// Snippet length on the "last journal entry" card.
pub const LATEST_ENTRY_SNIPPET: usize = 80;

/// Day label in a fixed en-GB style (`"04 Sep 2026"`), independent of the
/// host locale. The month is chrono's three-letter `%b`, so September is
/// `Sep` even where a locale-aware formatter would print `Sept`.
pub fn format_day(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d %b %Y").to_string()
}

pub fn snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn check_in_summary(latest: Option<&MoodEntry>) -> String {
    match latest {
        Some(entry) => format!(
            "Last check-in: {} • {}",
            entry.level,
            format_day(&entry.timestamp)
        ),
        None => "How are things feeling today?".to_string(),
    }
}

pub fn journal_card_summary(entries: &[JournalEntry]) -> String {
    match entries.first() {
        Some(entry) => format!("Last entry: {}", snippet(&entry.text, HOME_CARD_SNIPPET)),
        None => "Write freely, or use a prompt if it helps.".to_string(),
    }
}

pub fn latest_entry_summary(latest: Option<&JournalEntry>) -> String {
    match latest {
        Some(entry) => format!(
            "{} • {}",
            format_day(&entry.timestamp),
            snippet(&entry.text, LATEST_ENTRY_SNIPPET)
        ),
        None => "No entries yet. Tap to start writing.".to_string(),
    }
}

/// `(date, snippet)` for one row of the journal list. The date uses
/// [`format_day`] rather than the reader's locale.
pub fn list_row(entry: &JournalEntry) -> (String, String) {
    (
        format_day(&entry.timestamp),
        snippet(&entry.text, LIST_ROW_SNIPPET),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::MoodLevel;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    fn entry(text: &str) -> JournalEntry {
        JournalEntry {
            id: "1".into(),
            prompt: "What feels heavy today?".into(),
            text: text.into(),
            timestamp: at(2026, 3, 4),
        }
    }

    #[test]
    fn day_is_two_digit_short_month() {
        assert_eq!(format_day(&at(2026, 3, 4)), "04 Mar 2026");
        assert_eq!(format_day(&at(2026, 10, 14)), "14 Oct 2026");
        assert_eq!(format_day(&at(2026, 9, 4)), "04 Sep 2026");
    }

    #[test]
    fn snippet_only_cuts_long_text() {
        assert_eq!(snippet("short", 10), "short");
        assert_eq!(snippet("exactly10!", 10), "exactly10!");
        assert_eq!(snippet("abcdefghijk", 10), "abcdefghij…");
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        assert_eq!(snippet("ééééé", 3), "ééé…");
    }

    #[test]
    fn check_in_summary_with_and_without_entry() {
        assert_eq!(check_in_summary(None), "How are things feeling today?");
        let mood = MoodEntry {
            level: MoodLevel::DoingOkay,
            timestamp: at(2026, 10, 14),
        };
        assert_eq!(
            check_in_summary(Some(&mood)),
            "Last check-in: Doing okay • 14 Oct 2026"
        );
    }

    #[test]
    fn journal_summaries() {
        assert_eq!(
            journal_card_summary(&[]),
            "Write freely, or use a prompt if it helps."
        );
        assert_eq!(
            latest_entry_summary(None),
            "No entries yet. Tap to start writing."
        );

        let long = "x".repeat(100);
        let e = entry(&long);
        assert_eq!(
            journal_card_summary(std::slice::from_ref(&e)),
            format!("Last entry: {}…", "x".repeat(42))
        );
        assert_eq!(
            latest_entry_summary(Some(&e)),
            format!("04 Mar 2026 • {}…", "x".repeat(80))
        );
        assert_eq!(list_row(&e).1, format!("{}…", "x".repeat(70)));
    }
}
