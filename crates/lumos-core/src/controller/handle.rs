//! Pull-based handle to an enhancement running on a background task.

use std::time::Duration;

use futures_util::FutureExt;
use tokio::task::{JoinError, JoinHandle};

use crate::error::HandleError;
use crate::types::EnhancementResult;

/// Outcome of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    /// The result is available
    Ready,
    /// The timeout elapsed first; the run keeps going
    TimedOut,
}

/// Handle returned by [`EnhancementController::run_async`].
///
/// Observing the handle never affects the run: dropping it, or giving up on
/// a wait, leaves the work to finish on its own.
///
/// [`EnhancementController::run_async`]: super::EnhancementController::run_async
#[derive(Debug)]
pub struct EnhancementHandle {
    state: State,
}

#[derive(Debug)]
enum State {
    Pending(JoinHandle<EnhancementResult>),
    Ready(Result<EnhancementResult, HandleError>),
    Taken,
}

impl EnhancementHandle {
    pub(crate) fn new(join: JoinHandle<EnhancementResult>) -> Self {
        Self {
            state: State::Pending(join),
        }
    }

    /// Non-blocking check for completion.
    pub fn is_ready(&mut self) -> bool {
        if let State::Pending(join) = &mut self.state {
            if let Some(outcome) = join.now_or_never() {
                self.state = State::Ready(outcome.map_err(aborted));
            }
        }
        !matches!(self.state, State::Pending(_))
    }

    /// Wait up to `timeout` for the result.
    ///
    /// Only the awaiting caller is suspended; the run is not touched.
    pub async fn wait_timeout(&mut self, timeout: Duration) -> WaitStatus {
        if let State::Pending(join) = &mut self.state {
            match tokio::time::timeout(timeout, join).await {
                Ok(outcome) => self.state = State::Ready(outcome.map_err(aborted)),
                Err(_) => return WaitStatus::TimedOut,
            }
        }
        WaitStatus::Ready
    }

    /// Take the finished result. Succeeds exactly once per handle.
    pub fn take_result(&mut self) -> Result<EnhancementResult, HandleError> {
        if !self.is_ready() {
            return Err(HandleError::NotReady);
        }
        match std::mem::replace(&mut self.state, State::Taken) {
            State::Ready(outcome) => outcome,
            State::Taken => Err(HandleError::AlreadyTaken),
            State::Pending(_) => unreachable!("is_ready() resolved the pending state"),
        }
    }

    /// Wait without a bound and consume the handle.
    pub async fn wait(mut self) -> Result<EnhancementResult, HandleError> {
        match std::mem::replace(&mut self.state, State::Taken) {
            State::Pending(join) => join.await.map_err(aborted),
            State::Ready(outcome) => outcome,
            State::Taken => Err(HandleError::AlreadyTaken),
        }
    }
}

fn aborted(err: JoinError) -> HandleError {
    if err.is_panic() {
        HandleError::Aborted("enhancement task panicked".to_string())
    } else {
        HandleError::Aborted(err.to_string())
    }
}
