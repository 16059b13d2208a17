//! # Function-backed host (`HostFn`)
//!
//! [`HostFn`] wraps a closure `F: Fn(Arc<ScriptElement>) -> Fut`, producing a fresh
//! future per injected element. Handy for tests and for bridging a callback-based
//! host API through a `oneshot`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use lazyscript::{HostError, HostFn, HostRef, ScriptElement};
//!
//! let host: HostRef = HostFn::arc("static", |script: Arc<ScriptElement>| async move {
//!     if script.src().ends_with(".js") {
//!         Ok(())
//!     } else {
//!         Err(HostError::new("not a script"))
//!     }
//! });
//!
//! assert_eq!(host.name(), "static");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HostError;
use crate::host::script_host::Host;
use crate::mount::ScriptElement;

/// Function-backed host implementation.
#[derive(Debug)]
pub struct HostFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HostFn<F> {
    /// Creates a new function-backed host.
    ///
    /// Prefer [`HostFn::arc`] when you immediately need a [`HostRef`](crate::HostRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the host and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Host for HostFn<F>
where
    F: Fn(Arc<ScriptElement>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HostError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self, script: Arc<ScriptElement>) -> Result<(), HostError> {
        (self.f)(script).await
    }
}
