//! # Host trait.
//!
//! A [`Host`] is the completion source of the loader (the `onload` / `onerror`
//! equivalent). The loader calls [`Host::load`] **exactly once** for every element
//! it injects and treats the returned value as that element's only signal.
//!
//! A future that never completes models a hung load: the loader has no timeout and
//! its waiters stay pending.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HostError;
use crate::mount::ScriptElement;

/// Shared handle to a host.
pub type HostRef = Arc<dyn Host>;

/// # Script loading backend.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use lazyscript::{Host, HostError, ScriptElement};
///
/// struct AlwaysLoads;
///
/// #[async_trait]
/// impl Host for AlwaysLoads {
///     fn name(&self) -> &str { "always-loads" }
///
///     async fn load(&self, _script: Arc<ScriptElement>) -> Result<(), HostError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Host: Send + Sync + 'static {
    /// Returns a stable, human-readable host name used in logs.
    fn name(&self) -> &str;

    /// Fetches and executes `script`, resolving once it has loaded or failed.
    async fn load(&self, script: Arc<ScriptElement>) -> Result<(), HostError>;
}
