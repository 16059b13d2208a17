//! # Host abstractions.
//!
//! The host is whatever actually fetches and executes a script once it has been
//! injected: a browser binding, a headless test double, a script runtime.
//!
//! - [`Host`] - trait signalling one element's success or failure
//! - [`HostFn`] - closure-backed host implementation
//! - [`HostRef`] - shared reference to a host (`Arc<dyn Host>`)

mod host_fn;
mod script_host;

pub use host_fn::HostFn;
pub use script_host::{Host, HostRef};
