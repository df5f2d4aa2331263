mod metronome;
mod plan;
mod session;

pub use metronome::{Beat, IntervalMetronome, ManualMetronome, Metronome};
pub use plan::{BreathingPlan, BreathingStep, PhaseLabel, PlanError};
pub use session::{BreathingSession, Phase, TickOutcome, SESSION_SECONDS};
