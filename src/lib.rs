//! # lazyscript
//!
//! **lazyscript** loads external scripts into a running page on demand.
//!
//! It guarantees that:
//! - a script requested by many concurrent callers is injected **at most once** per
//!   attempt, and every caller is notified when it loads or fails;
//! - transient failures are retried a bounded number of times with a configurable delay;
//! - retries and terminal failures are observable through events.
//!
//! The page itself is abstracted away: scripts are injected into a [`Mount`] and a
//! [`Host`] reports whether each injected [`ScriptElement`] loaded.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   load_script(req)   load_script(req)   load_bundle(module, legacy)
//!          │                  │                   │ (select_ok)
//!          ▼                  ▼                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Loader                                                           │
//! │  - Registry   (find-or-create element per (src, attempt) in Mount)│
//! │  - Waiters    (ordered oneshot list per attempt)                  │
//! │  - Controller (one driver task per element, RetryPolicy)          │
//! │  - Notifier   (synchronous, subscription-ordered events)          │
//! └──────┬──────────────────────────────────────────────┬─────────────┘
//!        ▼                                              ▼
//!   Host::load(el #n)                          ScriptLoadRetried / ScriptLoadFailed
//!        │                                              │
//!        ▼                                              ▼
//!   Ok  → Succeeded, notify waiters             Loader::on(kind, cb)
//!   Err → RetryScheduled → sleep → el #n+1      Subscribe::on_event
//!       → or Failed, notify waiters
//! ```
//!
//! ### Lifecycle of one source address
//! ```text
//! Attempting(0) ──ok──► Succeeded
//!      │
//!      └─err, 0 < max_retries──► RetryScheduled(1) ──delay──► Attempting(1) ──► ...
//!                                                                   │
//!                    err, n >= max_retries ◄────────────────────────┘
//!                              │
//!                              ▼
//!                       FailedTerminal  (ScriptLoadFailed emitted once)
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                       |
//! |-------------------|--------------------------------------------------------------|------------------------------------------|
//! | **Loading**       | Coalesced, retried script loading and bundle races.          | [`Loader`], [`LoadRequest`], [`Bundle`]  |
//! | **Host**          | Plug in whatever actually fetches scripts.                   | [`Host`], [`HostFn`]                     |
//! | **Events**        | Observe retries and terminal failures.                       | [`Event`], [`EventKind`], [`Subscribe`]  |
//! | **Policies**      | Retry count, delay, growth and jitter.                       | [`RetryPolicy`], [`BackoffPolicy`]       |
//! | **Errors**        | Typed errors for callers and hosts.                          | [`LoadError`], [`HostError`]             |
//! | **Configuration** | Centralize loader settings.                                  | [`LoaderConfig`]                         |
//!
//! ## Optional features
//! - `logging`: exports a [`LogWriter`] subscriber that renders events via `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use lazyscript::{EventKind, HostError, HostFn, Loader, LoaderConfig, Mount, ScriptElement};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let cfg = LoaderConfig::default()
//!         .with_max_retries(1)
//!         .with_retry_delay_secs(0.01);
//!
//!     // The first attempt of every script fails, the retry loads.
//!     let host = HostFn::arc("flaky", |script: Arc<ScriptElement>| async move {
//!         if script.attempt() == 0 {
//!             Err(HostError::new("503"))
//!         } else {
//!             Ok(())
//!         }
//!     });
//!
//!     let loader = Loader::builder(cfg, host).with_mount(Mount::arc()).build();
//!
//!     let retries = Arc::new(AtomicU32::new(0));
//!     let seen = Arc::clone(&retries);
//!     let sub = loader.on(EventKind::ScriptLoadRetried, move |_| {
//!         seen.fetch_add(1, Ordering::SeqCst);
//!     });
//!
//!     loader.load_script("/widget.js").await.expect("loads on retry");
//!     assert_eq!(retries.load(Ordering::SeqCst), 1);
//!     assert_eq!(loader.mount().len(), 2);
//!     sub.unsubscribe();
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod host;
mod mount;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use config::LoaderConfig;
pub use core::{AttemptStatus, Bundle, LoadRequest, Loader, LoaderBuilder, ScriptKind};
pub use error::{HostError, LoadError};
pub use events::{Event, EventKind, Notifier, Subscription};
pub use host::{Host, HostFn, HostRef};
pub use mount::{Mount, ScriptElement};
pub use policies::{BackoffPolicy, JitterPolicy, RetryDecision, RetryPolicy};
pub use subscribers::Subscribe;

// Optional: expose a built-in logging subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
