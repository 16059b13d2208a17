//! # Event subscriber trait.
//!
//! Provides [`Subscribe`] an extension point for plugging custom event handlers into a loader.
//!
//! ## Rules
//! - Delivery is **synchronous**: `on_event` runs on the task that completed the attempt,
//!   before waiters are notified.
//! - Subscribers are called in **subscription order**, one event at a time.
//! - Panics are caught and logged; other subscribers are unaffected.
//! - Keep handlers short and non-blocking: a slow subscriber delays the retry chain.

use crate::events::Event;

/// Event subscriber for loader observability.
///
/// Unlike closures registered with [`Loader::on`](crate::Loader::on), a subscriber
/// receives every [`EventKind`](crate::EventKind).
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
