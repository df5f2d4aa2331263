use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseLabel {
    Inhale,
    Hold,
    Exhale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingStep {
    pub label: PhaseLabel,
    /// Duration in seconds, always > 0.
    pub seconds: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("breathing plan has no steps")]
    Empty,
    #[error("breathing step {0} has zero duration")]
    ZeroLengthStep(usize),
}

/// Ordered steps repeated for the length of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreathingPlan {
    steps: Vec<BreathingStep>,
}

impl BreathingPlan {
    /// Inhale 4, hold 4, exhale 6.
    pub fn standard() -> Self {
        Self {
            steps: vec![
                BreathingStep {
                    label: PhaseLabel::Inhale,
                    seconds: 4,
                },
                BreathingStep {
                    label: PhaseLabel::Hold,
                    seconds: 4,
                },
                BreathingStep {
                    label: PhaseLabel::Exhale,
                    seconds: 6,
                },
            ],
        }
    }

    pub fn new(steps: Vec<BreathingStep>) -> Result<Self, PlanError> {
        if steps.is_empty() {
            return Err(PlanError::Empty);
        }
        if let Some(i) = steps.iter().position(|s| s.seconds == 0) {
            return Err(PlanError::ZeroLengthStep(i));
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[BreathingStep] {
        &self.steps
    }

    /// Non-empty by construction.
    pub fn first(&self) -> BreathingStep {
        self.steps[0]
    }

    /// Sum of step durations.
    pub fn cycle_length(&self) -> u32 {
        self.steps.iter().map(|s| s.seconds).sum()
    }

    /// Step active at `within_cycle` seconds into a cycle, with the seconds
    /// left in it.
    ///
    /// Each step owns the half-open window `[start, start + seconds)`, so
    /// `0` is the first second of the first step.
    pub fn locate(&self, within_cycle: u32) -> (PhaseLabel, u32) {
        let mut start = 0;
        for step in &self.steps {
            let end = start + step.seconds;
            if (start..end).contains(&within_cycle) {
                return (step.label, step.seconds - (within_cycle - start));
            }
            start = end;
        }
        let first = self.first();
        (first.label, first.seconds)
    }
}

impl Default for BreathingPlan {
    fn default() -> Self {
        Self::standard()
    }
}
