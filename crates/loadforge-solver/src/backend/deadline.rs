//! Caller-side deadline for any backend.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, RecvTimeoutError};
use loadforge_model::{Model, Solution};
use tracing::warn;

use super::{SolveLimits, SolverBackend};
use crate::error::SolverError;

/// Runs the wrapped backend on a worker thread and stops waiting for it
/// after `wait`.
///
/// The worker is not interrupted: on timeout it keeps running until the
/// backend returns, and its result is dropped.
#[derive(Debug)]
pub struct DeadlineBackend<B> {
    inner: Arc<B>,
    wait: Duration,
}

impl<B: SolverBackend + 'static> DeadlineBackend<B> {
    pub fn new(inner: B, wait: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            wait,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

impl<B: SolverBackend + 'static> SolverBackend for DeadlineBackend<B> {
    fn solve(&self, model: &Model, limits: &SolveLimits) -> Result<Solution, SolverError> {
        let (sender, receiver) = channel::bounded(1);
        let inner = Arc::clone(&self.inner);
        let model = model.clone();
        let limits = limits.clone();

        thread::Builder::new()
            .name("loadforge-solve".to_string())
            .spawn(move || {
                let _ = sender.send(inner.solve(&model, &limits));
            })
            .map_err(|e| SolverError::Unavailable(e.to_string()))?;

        match receiver.recv_timeout(self.wait) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    event = "solve_timeout",
                    backend = self.inner.name(),
                    wait_ms = self.wait.as_millis() as u64,
                );
                Err(SolverError::Timeout(self.wait))
            }
            Err(RecvTimeoutError::Disconnected) => Err(SolverError::Unavailable(format!(
                "{} stopped without a result",
                self.inner.name()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
