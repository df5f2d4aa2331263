//! One-second clock driving a breathing session.
//!
//! Each arm is tagged with a generation number and every [`Beat`] carries
//! the generation that produced it. The engine only accepts beats from the
//! generation it currently has armed, so beats still sitting in a channel
//! after a pause, reset, or re-arm never advance a session.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Beat {
    pub generation: u64,
}

/// Source of periodic beats. At most one arm is live at a time.
pub trait Metronome {
    /// Start emitting beats tagged `generation`, replacing any previous arm.
    fn arm(&mut self, generation: u64);
    /// Stop emitting. No-op when not armed.
    fn disarm(&mut self);
}

/// Metronome that never fires on its own; the caller produces beats.
#[derive(Debug, Default)]
pub struct ManualMetronome {
    armed: Option<u64>,
    arms: usize,
    disarms: usize,
}

impl ManualMetronome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Beat for the live arm, if any.
    pub fn beat(&self) -> Option<Beat> {
        self.armed.map(|generation| Beat { generation })
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn arm_count(&self) -> usize {
        self.arms
    }

    pub fn disarm_count(&self) -> usize {
        self.disarms
    }
}

impl Metronome for ManualMetronome {
    fn arm(&mut self, generation: u64) {
        self.armed = Some(generation);
        self.arms += 1;
    }

    fn disarm(&mut self) {
        if self.armed.take().is_some() {
            self.disarms += 1;
        }
    }
}

/// Tokio interval task sending beats onto an unbounded channel.
///
/// Must be armed from inside a tokio runtime.
#[derive(Debug)]
pub struct IntervalMetronome {
    period: Duration,
    beats: mpsc::UnboundedSender<Beat>,
    task: Option<JoinHandle<()>>,
}

impl IntervalMetronome {
    /// One beat per second.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Beat>) {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> (Self, mpsc::UnboundedReceiver<Beat>) {
        let (beats, rx) = mpsc::unbounded_channel();
        (
            Self {
                period,
                beats,
                task: None,
            },
            rx,
        )
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }
}

impl Metronome for IntervalMetronome {
    fn arm(&mut self, generation: u64) {
        self.disarm();

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(error = %e, "no tokio runtime, breathing clock not started");
                return;
            }
        };

        let period = self.period;
        let beats = self.beats.clone();
        self.task = Some(handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if beats.send(Beat { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for IntervalMetronome {
    fn drop(&mut self) {
        self.disarm();
    }
}
