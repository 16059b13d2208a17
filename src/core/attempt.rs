//! # Attempt state.
//!
//! Every [`ScriptElement`](crate::ScriptElement) owns one [`AttemptState`]: its
//! status and the ordered list of waiters attached to it.
//!
//! ## Status transitions
//! ```text
//! Pending ──success──► Succeeded
//!    │
//!    ├──failure, retries left──► RetryScheduled ──delay, hand-off──► Retried
//!    │                              (waiters kept)                 (waiters moved to n+1)
//!    └──failure, exhausted─────► Failed(err)
//! ```
//!
//! ## Rules
//! - Only `Pending` accepts a completion signal; anything else is a duplicate.
//! - `Succeeded` and `Failed` are durable: late joiners settle immediately.
//! - `Retried` forwards late joiners to attempt n+1.
//! - Waiters are notified in attachment order.

use tokio::sync::oneshot;

use crate::error::LoadError;

/// Completion notification of one caller.
pub(crate) type Waiter = oneshot::Sender<Result<(), LoadError>>;

/// Status of one attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AttemptStatus {
    /// Injected, waiting for the host signal.
    #[default]
    Pending,
    /// Failed; the next attempt is being scheduled and still collects waiters here.
    RetryScheduled,
    /// Failed; waiters now live on the next attempt.
    Retried,
    /// Loaded.
    Succeeded,
    /// Failed terminally with the stored error.
    Failed(LoadError),
}

/// Result of joining a list of waiters to an attempt.
pub(crate) enum Join {
    /// Waiters were appended to this attempt.
    Attached,
    /// The attempt already settled; deliver this result.
    Settled(Result<(), LoadError>),
    /// The attempt handed off; continue with the next one.
    Forward,
}

#[derive(Default)]
pub(crate) struct AttemptState {
    pub(crate) status: AttemptStatus,
    waiters: Vec<Waiter>,
}

impl AttemptState {
    pub(crate) fn is_pending(&self) -> bool {
        matches!(self.status, AttemptStatus::Pending)
    }

    /// Appends `waiters` (draining the vector) or reports why it can't.
    pub(crate) fn join(&mut self, waiters: &mut Vec<Waiter>) -> Join {
        match &self.status {
            AttemptStatus::Pending | AttemptStatus::RetryScheduled => {}
            AttemptStatus::Succeeded => return Join::Settled(Ok(())),
            AttemptStatus::Failed(err) => return Join::Settled(Err(err.clone())),
            AttemptStatus::Retried => return Join::Forward,
        }
        self.waiters.append(waiters);
        Join::Attached
    }

    /// Moves to `status` and returns the waiters to notify.
    pub(crate) fn settle(&mut self, status: AttemptStatus) -> Vec<Waiter> {
        self.status = status;
        std::mem::take(&mut self.waiters)
    }

    #[cfg(test)]
    pub(crate) fn waiter_count(&self) -> usize {
        self.waiters.len()
    }
}

/// Delivers `result` to every waiter, in order. Dropped receivers are ignored.
pub(crate) fn notify(waiters: Vec<Waiter>, result: &Result<(), LoadError>) {
    for waiter in waiters {
        let _ = waiter.send(result.clone());
    }
}
