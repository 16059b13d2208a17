//! # LogWriter: event renderer
//!
//! A minimal subscriber that renders incoming [`Event`]s through `tracing`.
//!
//! ## Example output
//! ```text
//! INFO  [retried] src="/app.js" attempt=1 delay_ms=1000 err="404"
//! WARN  [failed] src="/app.js" attempt=2 err="404"
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::ScriptLoadRetried => {
                tracing::info!(
                    src = %e.src,
                    attempt = ?e.attempt,
                    delay_ms = ?e.delay_ms,
                    err = ?e.reason,
                    "[retried]"
                );
            }
            EventKind::ScriptLoadFailed => {
                tracing::warn!(
                    src = %e.src,
                    attempt = ?e.attempt,
                    err = ?e.reason,
                    "[failed]"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
