//! Retry policies.
//!
//! This module groups the knobs that control **if** a failed script is injected again
//! and **how long** the loader waits before doing so.
//!
//! ## Contents
//! - [`RetryPolicy`]   how many retries follow the first attempt, and the decision guard
//! - [`BackoffPolicy`] how retry delays evolve (first / factor / max + jitter)
//! - [`JitterPolicy`]  randomization strategy to avoid synchronized retries
//!
//! ## Quick wiring
//! ```text
//! LoaderConfig ──► retry_policy() ──► RetryPolicy { max_retries, backoff }
//!      └─► core::controller uses:
//!           - decide(attempt) to pick Retry / Terminal
//!           - the returned delay to sleep before the next attempt
//! ```
//!
//! ## Defaults
//! - `max_retries = 2` (three attempts in total).
//! - `BackoffPolicy::default()` → first=1s, factor=1.0 (constant), max=30s, jitter=None.

mod backoff;
mod jitter;
mod retry;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
pub use retry::{RetryDecision, RetryPolicy};
