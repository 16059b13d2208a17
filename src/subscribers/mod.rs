//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, an alternative to closure listeners
//! for observers that want every loader event (logging, metrics, alerting).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   controller ── emit(&Event) ──► Notifier ──► listeners, in subscription order
//!                                                  │
//!                                                  ├──► Loader::on(kind, closure)
//!                                                  └──► Subscribe::on_event(&Event)
//!                                                            │
//!                                                      ┌─────┴─────┐
//!                                                      ▼           ▼
//!                                                  LogWriter    Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use lazyscript::{Event, EventKind, Subscribe};
//!
//! #[derive(Default)]
//! struct FailureCounter(AtomicU64);
//!
//! impl Subscribe for FailureCounter {
//!     fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::ScriptLoadFailed {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "failure-counter" }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscriber::Subscribe;
