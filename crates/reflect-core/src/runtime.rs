//! Event loop serializing intents and clock beats through one engine.
//!
//! Everything runs on the task that awaits [`run`], so no two engine
//! operations ever interleave. Each accepted input publishes a fresh
//! snapshot on the watch channel.

use tokio::sync::{mpsc, watch};

use crate::breathing::{Beat, IntervalMetronome, Metronome};
use crate::engine::{Intent, SessionEngine, Snapshot};
use crate::error::Result;
use crate::storage::{open_store, Config, KeyValueStore};

/// Engine wired to the configured store and a one-second tokio clock.
pub type LiveEngine = SessionEngine<Box<dyn KeyValueStore + Send>, IntervalMetronome>;

/// Open the configured store and hydrate an engine from it.
///
/// Returns the beat receiver to pass to [`run`].
///
/// # Errors
/// Returns an error if the store cannot be opened.
pub fn bootstrap(config: &Config) -> Result<(LiveEngine, mpsc::UnboundedReceiver<Beat>)> {
    let store = open_store(&config.storage)?;
    let (metronome, beats) = IntervalMetronome::new();
    let engine = SessionEngine::hydrate(store, metronome, &config.storage.keyspace());
    Ok((engine, beats))
}

/// Drive `engine` until the intent channel closes, then hand it back.
pub async fn run<S, M>(
    mut engine: SessionEngine<S, M>,
    mut intents: mpsc::Receiver<Intent>,
    mut beats: mpsc::UnboundedReceiver<Beat>,
    snapshots: watch::Sender<Snapshot>,
) -> SessionEngine<S, M>
where
    S: KeyValueStore,
    M: Metronome,
{
    loop {
        tokio::select! {
            biased;

            intent = intents.recv() => match intent {
                Some(intent) => {
                    tracing::trace!(?intent, "dispatching intent");
                    snapshots.send_replace(engine.dispatch(intent));
                }
                None => break,
            },
            Some(beat) = beats.recv() => {
                if engine.on_beat(beat) {
                    snapshots.send_replace(engine.snapshot());
                }
            }
        }
    }

    tracing::debug!("intent channel closed, session loop stopping");
    engine
}
