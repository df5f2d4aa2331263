//! Mood check-ins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of check-ins kept in the history.
pub const MOOD_HISTORY_CAPACITY: usize = 7;

/// How the user says they are doing, from worst to best.
///
/// Serialized as the label shown in the picker, which is also the stored form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodLevel {
    #[serde(rename = "Really struggling")]
    ReallyStruggling,
    #[serde(rename = "Struggling")]
    Struggling,
    #[serde(rename = "Steady")]
    Steady,
    #[serde(rename = "Coping")]
    Coping,
    #[serde(rename = "Doing okay")]
    DoingOkay,
}

impl MoodLevel {
    /// Picker order.
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::ReallyStruggling,
        MoodLevel::Struggling,
        MoodLevel::Steady,
        MoodLevel::Coping,
        MoodLevel::DoingOkay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MoodLevel::ReallyStruggling => "Really struggling",
            MoodLevel::Struggling => "Struggling",
            MoodLevel::Steady => "Steady",
            MoodLevel::Coping => "Coping",
            MoodLevel::DoingOkay => "Doing okay",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == label)
    }

    pub fn key(self) -> MoodKey {
        match self {
            MoodLevel::ReallyStruggling => MoodKey::Really,
            MoodLevel::Struggling => MoodKey::Struggling,
            MoodLevel::Steady => MoodKey::Steady,
            MoodLevel::Coping => MoodKey::Coping,
            MoodLevel::DoingOkay => MoodKey::Okay,
        }
    }
}

impl std::fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display-only key selecting the face drawn for a mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MoodKey {
    Really,
    Struggling,
    #[default]
    Steady,
    Coping,
    Okay,
}

impl MoodKey {
    pub fn as_str(self) -> &'static str {
        match self {
            MoodKey::Really => "really",
            MoodKey::Struggling => "struggling",
            MoodKey::Steady => "steady",
            MoodKey::Coping => "coping",
            MoodKey::Okay => "okay",
        }
    }

    /// Mouth curvature for the face icon, -1.0 (frown) .. 1.0 (smile).
    pub fn mouth_curve(self) -> f32 {
        match self {
            MoodKey::Really => -0.9,
            MoodKey::Struggling => -0.5,
            MoodKey::Steady => 0.0,
            MoodKey::Coping => 0.45,
            MoodKey::Okay => 0.8,
        }
    }
}

/// Key for a free-form label; unrecognised labels draw the steady face.
pub fn mood_key_for_label(label: &str) -> MoodKey {
    MoodLevel::from_label(label)
        .map(MoodLevel::key)
        .unwrap_or_default()
}

/// One check-in. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub level: MoodLevel,
    pub timestamp: DateTime<Utc>,
}
