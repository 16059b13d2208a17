//! # Resource handle registry.
//!
//! Locates the element for `(src, attempt)` inside a [`Mount`](crate::Mount) or injects
//! a new one, then attaches waiters to the outstanding attempt of the chain.
//!
//! ## Architecture
//! ```text
//! load_script(req) ──► attach(req, attempt=0, [waiter])
//!                          │   (mount lock held for the whole walk)
//!                          ▼
//!                 find_or_create(src, n) ──created──► controller::spawn_attempt
//!                          │
//!                          ▼
//!                 state.join(waiters)
//!                   ├─ Attached       → done, caller awaits its receiver
//!                   ├─ Settled(res)   → notify now (loaded / terminally failed)
//!                   └─ Forward        → n += 1, repeat
//! ```
//!
//! ## Rules
//! - At most one element per `(src, attempt)` in a mount: lookup-then-create runs under
//!   the mount lock, which also serializes it against the retry hand-off.
//! - Lock order is always mount → element; at most one element lock is held here.
//! - The mount is only mutated on creation.

use std::sync::Arc;

use crate::core::attempt::{notify, Join, Waiter};
use crate::core::controller;
use crate::core::loader::Shared;
use crate::core::request::LoadRequest;
use crate::mount::{find_in, ScriptElement};

/// Returns the element for `(req.src, attempt)`, injecting it if missing.
///
/// The boolean is `true` when the element already existed.
pub(crate) fn find_or_create(
    children: &mut Vec<Arc<ScriptElement>>,
    req: &LoadRequest,
    attempt: u32,
) -> (Arc<ScriptElement>, bool) {
    if let Some(existing) = find_in(children, req.src(), attempt) {
        return (existing, true);
    }
    let el = Arc::new(ScriptElement::from_request(req, attempt));
    children.push(Arc::clone(&el));
    (el, false)
}

/// Attaches `waiters` to the outstanding attempt of `req`'s chain, starting the
/// walk at `attempt`. Starts a driver for every element it injects.
///
/// `children` must be the locked child list of `shared.mount`.
pub(crate) fn attach(
    shared: &Arc<Shared>,
    children: &mut Vec<Arc<ScriptElement>>,
    req: &LoadRequest,
    mut attempt: u32,
    mut waiters: Vec<Waiter>,
) {
    loop {
        let (el, existed) = find_or_create(children, req, attempt);
        if !existed {
            tracing::debug!(
                src = req.src(),
                attempt,
                kind = ?req.kind(),
                host = shared.host.name(),
                "injecting script element"
            );
            controller::spawn_attempt(shared, req.clone(), Arc::clone(&el));
        }

        let joined = el.state.lock().join(&mut waiters);
        match joined {
            Join::Attached => {
                tracing::trace!(src = req.src(), attempt, "waiter attached");
                return;
            }
            Join::Settled(result) => {
                notify(waiters, &result);
                return;
            }
            Join::Forward => attempt = el.attempt() + 1,
        }
    }
}
