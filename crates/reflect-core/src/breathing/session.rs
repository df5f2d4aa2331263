//! Breathing session state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Inhale -> Hold -> Exhale -> Inhale ... -> Done
//! ```
//!
//! While running, `elapsed_total` alone determines `phase` and `remaining`.
//! `Idle` and `Done` ignore ticks until the next `start` or `reset`.
//!
//! ## Usage
//!
//! ```ignore
//! let plan = BreathingPlan::standard();
//! let mut session = BreathingSession::new();
//! session.start(&plan);
//! // Once per second:
//! session.tick(&plan);
//! ```

use serde::{Deserialize, Serialize};

use super::plan::{BreathingPlan, PhaseLabel};

/// Length of one session in seconds.
pub const SESSION_SECONDS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Inhale,
    Hold,
    Exhale,
    Done,
}

impl From<PhaseLabel> for Phase {
    fn from(label: PhaseLabel) -> Self {
        match label {
            PhaseLabel::Inhale => Phase::Inhale,
            PhaseLabel::Hold => Phase::Hold,
            PhaseLabel::Exhale => Phase::Exhale,
        }
    }
}

/// What a call to [`BreathingSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session not running; nothing changed.
    Ignored,
    /// Moved one second forward within the session.
    Advanced,
    /// Reached the end of the session.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BreathingSession {
    pub running: bool,
    pub phase: Phase,
    /// Seconds left in the current phase.
    pub remaining: u32,
    /// Seconds since `start`, 0..=60.
    pub elapsed_total: u32,
}

impl BreathingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin from the top of the plan. Valid from any state.
    pub fn start(&mut self, plan: &BreathingPlan) {
        let first = plan.first();
        *self = Self {
            running: true,
            phase: first.label.into(),
            remaining: first.seconds,
            elapsed_total: 0,
        };
    }

    /// Stop the clock, keeping the current phase.
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The state one second later. Identity when not running.
    pub fn advanced(&self, plan: &BreathingPlan) -> Self {
        if !self.running {
            return *self;
        }

        let next = self.elapsed_total + 1;
        if next >= SESSION_SECONDS {
            return Self {
                running: false,
                phase: Phase::Done,
                remaining: 0,
                elapsed_total: SESSION_SECONDS,
            };
        }

        let (label, remaining) = plan.locate(next % plan.cycle_length());
        Self {
            running: true,
            phase: label.into(),
            remaining,
            elapsed_total: next,
        }
    }

    /// Apply one elapsed second.
    pub fn tick(&mut self, plan: &BreathingPlan) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }
        *self = self.advanced(plan);
        if self.phase == Phase::Done {
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// 0.0 .. 1.0 progress across the session.
    pub fn progress(&self) -> f64 {
        f64::from(self.elapsed_total) / f64::from(SESSION_SECONDS)
    }
}
