//! Loader events: types and notifier.
//!
//! This module groups the event **data model** and the **notifier** used to
//! deliver retry/failure events to callers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Notifier`] synchronous, subscription-ordered publish/subscribe
//! - [`Subscription`] handle returned by `on` / `subscribe`
//!
//! ## Quick reference
//! - **Publisher**: `core::controller` (on retry scheduling and terminal failure).
//! - **Consumers**: closures registered with `Loader::on` and [`Subscribe`](crate::Subscribe)
//!   implementations registered with `Loader::subscribe`.

mod event;
mod notifier;

pub use event::{Event, EventKind};
pub use notifier::{Notifier, Subscription};
