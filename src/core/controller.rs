//! # Retry controller: drives one attempt to its outcome.
//!
//! Every injected element gets exactly one driver task. The driver waits for the host
//! signal and applies the state machine:
//!
//! ```text
//! spawn_attempt(el #n)
//!   └─► host.load(el) ─────► Ok  ──► Succeeded: notify waiters (in order)
//!                     └────► Err ──► policy.decide(n)
//!                                     ├─ Retry  ──► RetryScheduled
//!                                     │              ├─► emit ScriptLoadRetried(n+1)
//!                                     │              ├─► sleep(delay)
//!                                     │              └─► hand_off: create el #n+1,
//!                                     │                  move waiters, Retried
//!                                     └─ Terminal ──► Failed(err)
//!                                                    ├─► emit ScriptLoadFailed (once per chain)
//!                                                    └─► notify waiters with err
//! ```
//!
//! ## Rules
//! - Intermediate failures never reach callers; only `ScriptLoadRetried` reveals them.
//! - `ScriptLoadFailed` is emitted only by the final attempt, exactly once.
//! - Events are emitted without holding any lock.
//! - A panicking host counts as a failed attempt (`host panicked: ...`).
//! - No timeout and no cancellation: a hung host future keeps its waiters pending.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::time;

use crate::core::attempt::{notify, AttemptStatus};
use crate::core::loader::Shared;
use crate::core::registry;
use crate::core::request::LoadRequest;
use crate::error::{panic_message, HostError, LoadError};
use crate::events::Event;
use crate::mount::ScriptElement;
use crate::policies::RetryDecision;

/// Spawns the driver of a freshly injected element.
pub(crate) fn spawn_attempt(shared: &Arc<Shared>, req: LoadRequest, el: Arc<ScriptElement>) {
    let shared = Arc::clone(shared);
    tokio::spawn(async move { run_attempt(shared, req, el).await });
}

async fn run_attempt(shared: Arc<Shared>, req: LoadRequest, el: Arc<ScriptElement>) {
    let outcome = AssertUnwindSafe(shared.host.load(Arc::clone(&el)))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            let msg = panic_message(panic.as_ref());
            tracing::warn!(
                src = el.src(),
                attempt = el.attempt(),
                host = shared.host.name(),
                panic = msg,
                "host panicked while loading script"
            );
            Err(HostError::new(format!("host panicked: {msg}")))
        });
    match outcome {
        Ok(()) => on_success(&el),
        Err(error) => on_failure(&shared, req, el, error).await,
    }
}

fn on_success(el: &ScriptElement) {
    let waiters = {
        let mut st = el.state.lock();
        if !st.is_pending() {
            tracing::warn!(src = el.src(), attempt = el.attempt(), status = ?st.status, "ignoring duplicate load signal");
            return;
        }
        st.settle(AttemptStatus::Succeeded)
    };
    tracing::debug!(
        src = el.src(),
        attempt = el.attempt(),
        waiters = waiters.len(),
        "script loaded"
    );
    notify(waiters, &Ok(()));
}

async fn on_failure(shared: &Arc<Shared>, req: LoadRequest, el: Arc<ScriptElement>, error: HostError) {
    let attempt = el.attempt();
    let decision = {
        let mut st = el.state.lock();
        if !st.is_pending() {
            tracing::warn!(src = el.src(), attempt, status = ?st.status, "ignoring duplicate error signal");
            return;
        }
        let decision = shared.policy.decide(attempt);
        if let RetryDecision::Retry { .. } = decision {
            st.status = AttemptStatus::RetryScheduled;
        }
        decision
    };

    match decision {
        RetryDecision::Retry {
            next_attempt,
            delay,
        } => {
            tracing::info!(
                src = el.src(),
                failed_attempt = attempt,
                next_attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "retrying script"
            );
            shared.notifier.emit(
                &Event::retried(el.src(), next_attempt)
                    .with_delay(delay)
                    .with_reason(error.message()),
            );
            retry_after(shared, &req, &el, next_attempt, delay).await;
        }
        RetryDecision::Terminal => fail_chain(shared, &el, error),
    }
}

async fn retry_after(
    shared: &Arc<Shared>,
    req: &LoadRequest,
    el: &ScriptElement,
    next_attempt: u32,
    delay: Duration,
) {
    if !delay.is_zero() {
        time::sleep(delay).await;
    }
    hand_off(shared, req, el, next_attempt);
}

/// Moves the waiters of `el` onto attempt `next_attempt`, injecting it.
///
/// Runs under the mount lock so a concurrent `load_script` either attaches to `el`
/// before the move or walks forward after it.
fn hand_off(shared: &Arc<Shared>, req: &LoadRequest, el: &ScriptElement, next_attempt: u32) {
    let mut children = shared.mount.lock();
    let waiters = el.state.lock().settle(AttemptStatus::Retried);
    tracing::debug!(
        src = el.src(),
        from = el.attempt(),
        to = next_attempt,
        waiters = waiters.len(),
        "handing waiters to next attempt"
    );
    registry::attach(shared, &mut children, req, next_attempt, waiters);
}

fn fail_chain(shared: &Shared, el: &ScriptElement, error: HostError) {
    let err = LoadError::Failed {
        src: el.src().to_owned(),
        attempt: el.attempt(),
        error,
    };
    let waiters = el.state.lock().settle(AttemptStatus::Failed(err.clone()));
    tracing::warn!(
        src = el.src(),
        attempt = el.attempt(),
        waiters = waiters.len(),
        error = %err,
        "script failed, retries exhausted"
    );
    shared.notifier.emit(&Event::failed(el.src(), err.clone()));
    notify(waiters, &Err(err));
}
