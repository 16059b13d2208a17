//! Error types used by the loader and by hosts.
//!
//! This module defines two types:
//!
//! - [`HostError`]: the host-level error value produced when a script element fails to load.
//! - [`LoadError`]: the error surfaced to `load_script` / `load_bundle` callers.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::sync::Arc;
use thiserror::Error;

/// # Host-level load failure.
///
/// Produced by a [`Host`](crate::Host) when the fetch or execution of a script fails
/// (the `onerror` equivalent). Cheap to clone: every waiter of a failed chain receives
/// the same value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HostError {
    message: Arc<str>,
}

impl HostError {
    /// Creates a host error from a message.
    pub fn new(message: impl Into<Arc<str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for HostError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HostError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// # Errors returned to loader callers.
///
/// Intermediate failures (attempts that get retried) are never surfaced here;
/// callers only see a [`LoadError::Failed`] once the retry chain is exhausted.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The script failed on its final attempt; no further retries will happen.
    #[error("failed to load {src} after attempt {attempt}: {error}")]
    Failed {
        /// Source address of the script.
        src: String,
        /// Attempt number (0-based) whose failure ended the chain.
        attempt: u32,
        /// Host error reported by the final attempt.
        error: HostError,
    },

    /// A bundle was requested with neither a module nor a legacy address.
    #[error("bundle has neither a module nor a legacy address")]
    EmptyBundle,

    /// The caller's waiter was discarded without a result.
    ///
    /// Host panics are reported as [`LoadError::Failed`]; this only happens when the
    /// attempt driver itself unwinds after taking the waiters out of the element, for
    /// example because an installed `tracing` layer panicked.
    #[error("load of {src} was dropped before completion")]
    Dropped {
        /// Source address of the script.
        src: String,
    },
}

impl LoadError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use lazyscript::{HostError, LoadError};
    ///
    /// let err = LoadError::Failed { src: "/a.js".into(), attempt: 2, error: HostError::new("404") };
    /// assert_eq!(err.as_label(), "load_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LoadError::Failed { .. } => "load_failed",
            LoadError::EmptyBundle => "load_empty_bundle",
            LoadError::Dropped { .. } => "load_dropped",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            LoadError::Failed {
                src,
                attempt,
                error,
            } => format!("src={src} attempt={attempt} error: {error}"),
            LoadError::EmptyBundle => "empty bundle".to_string(),
            LoadError::Dropped { src } => format!("src={src} dropped"),
        }
    }

    /// Returns the host error carried by a terminal failure, if any.
    pub fn host_error(&self) -> Option<&HostError> {
        match self {
            LoadError::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Extracts the message of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_message_mentions_source_and_attempt() {
        let err = LoadError::Failed {
            src: "/vendor/app.js".into(),
            attempt: 1,
            error: HostError::new("net::ERR_FAILED"),
        };
        assert_eq!(
            err.to_string(),
            "failed to load /vendor/app.js after attempt 1: net::ERR_FAILED"
        );
        assert_eq!(err.host_error().map(HostError::message), Some("net::ERR_FAILED"));
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(LoadError::EmptyBundle.as_label(), "load_empty_bundle");
        assert_eq!(
            LoadError::Dropped { src: "x".into() }.as_label(),
            "load_dropped"
        );
        assert!(LoadError::EmptyBundle.host_error().is_none());
    }

    #[test]
    fn panic_payloads_render_as_text() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("bad host"));
        assert_eq!(panic_message(owned.as_ref()), "bad host");
        let other: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown");
    }
}
