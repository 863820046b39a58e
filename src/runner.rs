use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::simulation::{Simulation, Snapshot};
use crate::steering::Intent;

pub const DEFAULT_TICK_MS: u64 = 200;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to spawn tick thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("tick thread panicked")]
    Panicked,
}

enum LoopState {
    Stopped,
    Running {
        stop: Sender<()>,
        handle: JoinHandle<()>,
    },
}

/// Drives a [`Simulation`] on a dedicated thread at a fixed interval.
///
/// The simulation outlives the thread, so `stop` followed by `start` resumes
/// from the last committed tick.
pub struct Runner<R> {
    sim: Arc<Mutex<Simulation<R>>>,
    intent: Intent,
    interval: Duration,
    state: LoopState,
}

impl<R: Rng + Send + 'static> Runner<R> {
    pub fn new(sim: Simulation<R>, interval: Duration) -> Self {
        Self {
            sim: Arc::new(Mutex::new(sim)),
            intent: Intent::new(),
            interval,
            state: LoopState::Stopped,
        }
    }

    /// Handle the input adapter writes the player's direction into.
    pub fn intent(&self) -> Intent {
        self.intent.clone()
    }

    /// False once the tick thread has exited, even if `stop` was never called.
    pub fn is_running(&self) -> bool {
        matches!(&self.state, LoopState::Running { handle, .. } if !handle.is_finished())
    }

    pub fn snapshot(&self) -> Snapshot {
        lock(&self.sim).snapshot()
    }

    /// Begins ticking; every committed tick is sent on `frames`.
    /// Does nothing if already running.
    pub fn start(&mut self, frames: Sender<Snapshot>) -> Result<(), RunnerError> {
        if self.is_running() {
            debug!("start ignored, already running");
            return Ok(());
        }
        // reap a loop that left on its own
        self.stop()?;
        let (stop, stopped) = mpsc::channel();
        let sim = Arc::clone(&self.sim);
        let intent = self.intent.clone();
        let interval = self.interval;

        let handle = thread::Builder::new()
            .name("tick".into())
            .spawn(move || loop {
                match stopped.try_recv() {
                    Ok(()) | Err(mpsc::TryRecvError::Disconnected) => break,
                    Err(mpsc::TryRecvError::Empty) => {}
                }
                let snapshot = lock(&sim).tick(intent.get());
                if frames.send(snapshot).is_err() {
                    debug!("frame receiver gone, leaving tick loop");
                    break;
                }
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        debug!(interval_ms = interval.as_millis() as u64, "tick loop started");
        self.state = LoopState::Running { stop, handle };
        Ok(())
    }

    /// Blocks until the tick thread has exited. Does nothing if stopped.
    pub fn stop(&mut self) -> Result<(), RunnerError> {
        let LoopState::Running { stop, handle } =
            std::mem::replace(&mut self.state, LoopState::Stopped)
        else {
            return Ok(());
        };
        // the thread may already have left on its own
        let _ = stop.send(());
        handle.join().map_err(|_| RunnerError::Panicked)?;
        debug!(tick = self.snapshot().tick, "tick loop stopped");
        Ok(())
    }
}

impl<R> Drop for Runner<R> {
    fn drop(&mut self) {
        if let LoopState::Running { stop, handle } =
            std::mem::replace(&mut self.state, LoopState::Stopped)
        {
            let _ = stop.send(());
            if handle.join().is_err() {
                warn!("tick thread panicked during shutdown");
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
