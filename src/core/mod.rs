//! Loader core: coalescing, retries and the public entry point.
//!
//! The only public API from this module is [`Loader`] (with its builder and request
//! types). Internal modules:
//! - [`request`]: load requests, script variants and bundles;
//! - [`attempt`]: per-element status and ordered waiters;
//! - [`registry`]: lookup-then-create of elements and waiter attachment;
//! - [`controller`]: drives one attempt to success, retry or terminal failure;
//! - [`loader`]: `load_script` / `load_bundle` / event subscription.

mod attempt;
mod builder;
mod controller;
mod loader;
mod registry;
mod request;

pub use attempt::AttemptStatus;
pub use builder::LoaderBuilder;
pub use loader::Loader;
pub use request::{Bundle, LoadRequest, ScriptKind};

pub(crate) use attempt::AttemptState;
