//! # Loader events.
//!
//! The [`EventKind`] enum classifies the two observable transitions of a retry chain:
//! - [`EventKind::ScriptLoadRetried`]: an attempt failed and a new one is scheduled;
//! - [`EventKind::ScriptLoadFailed`]: the chain reached terminal failure.
//!
//! The [`Event`] struct carries the source address plus timestamps and details.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use lazyscript::{Event, EventKind};
//!
//! let ev = Event::retried("/app.js", 1);
//! assert_eq!(ev.kind, EventKind::ScriptLoadRetried);
//! assert_eq!(ev.attempt, Some(1));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::error::LoadError;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of loader events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A failed attempt spawned a retry.
    ///
    /// Sets:
    /// - `src`: source address
    /// - `attempt`: number of the **new** attempt (1 for the first retry)
    /// - `delay_ms`: delay before the new attempt is injected
    /// - `reason`: host error of the failed attempt
    ScriptLoadRetried,

    /// The chain failed terminally; callers are being rejected.
    ///
    /// Fired once per chain, from the final attempt only.
    ///
    /// Sets:
    /// - `src`: source address
    /// - `attempt`: number of the final attempt
    /// - `reason`: host error of the final attempt
    /// - `error`: the error delivered to callers
    ScriptLoadFailed,
}

/// Loader event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Source address of the script.
    pub src: Arc<str>,
    /// Attempt number (see [`EventKind`] for which one).
    pub attempt: Option<u32>,
    /// Retry delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (host error message).
    pub reason: Option<Arc<str>>,
    /// Terminal error handed to callers.
    pub error: Option<LoadError>,
}

impl Event {
    /// Creates a new event with current timestamp and next sequence number.
    pub fn new(kind: EventKind, src: impl Into<Arc<str>>) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            src: src.into(),
            attempt: None,
            delay_ms: None,
            reason: None,
            error: None,
        }
    }

    /// A `ScriptLoadRetried` event for the new attempt number.
    pub fn retried(src: impl Into<Arc<str>>, new_attempt: u32) -> Self {
        Event::new(EventKind::ScriptLoadRetried, src).with_attempt(new_attempt)
    }

    /// A `ScriptLoadFailed` event carrying the terminal error.
    pub fn failed(src: impl Into<Arc<str>>, error: LoadError) -> Self {
        let mut ev = Event::new(EventKind::ScriptLoadFailed, src);
        if let LoadError::Failed {
            attempt,
            error: host,
            ..
        } = &error
        {
            ev = ev.with_attempt(*attempt).with_reason(host.message());
        }
        ev.error = Some(error);
        ev
    }

    /// Attaches an attempt number.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a retry delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    #[inline]
    pub fn is_retried(&self) -> bool {
        matches!(self.kind, EventKind::ScriptLoadRetried)
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self.kind, EventKind::ScriptLoadFailed)
    }
}
