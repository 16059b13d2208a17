//! # Loader: public entry point.
//!
//! [`Loader`] coalesces concurrent requests for the same script, retries failed
//! injections and notifies subscribers about retries and terminal failures.
//!
//! ## Lifecycle
//! ```text
//! load_script(req)
//!   ├─► lock mount
//!   ├─► registry::attach(req, attempt=0, [waiter])   (inject + spawn driver if new)
//!   ├─► unlock mount
//!   └─► await waiter
//!          ├─ Ok(())              loaded (possibly after retries)
//!          └─ Err(LoadError)      final attempt failed
//!
//! load_bundle(bundle)
//!   └─► select_ok(load_script(module), load_script(legacy))
//! ```
//!
//! ## Rules
//! - Must be used from within a tokio runtime (drivers and retry timers are spawned).
//! - Cloning a loader is cheap and shares mount, policy and notifier.

use std::sync::Arc;

use futures::future::{self, FutureExt};
use tokio::sync::oneshot;

use crate::config::LoaderConfig;
use crate::core::builder::LoaderBuilder;
use crate::core::registry;
use crate::core::request::{Bundle, LoadRequest};
use crate::error::LoadError;
use crate::events::{Event, EventKind, Notifier, Subscription};
use crate::host::HostRef;
use crate::mount::Mount;
use crate::policies::RetryPolicy;
use crate::subscribers::Subscribe;

/// State shared by a loader, its clones and its attempt drivers.
pub(crate) struct Shared {
    pub(crate) cfg: LoaderConfig,
    pub(crate) policy: RetryPolicy,
    pub(crate) mount: Arc<Mount>,
    pub(crate) host: HostRef,
    pub(crate) notifier: Notifier,
}

/// Script loader with request coalescing and bounded retries.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use lazyscript::{HostFn, LoadRequest, Loader, LoaderConfig, Mount, ScriptElement};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), lazyscript::LoadError> {
///     let host = HostFn::arc("ok", |_script: Arc<ScriptElement>| async {
///         Ok::<(), lazyscript::HostError>(())
///     });
///     let loader = Loader::builder(LoaderConfig::default(), host)
///         .with_mount(Mount::arc())
///         .build();
///
///     loader.load_script(LoadRequest::new("/app.js")).await?;
///     loader.load_script("/app.js").await?;
///     assert_eq!(loader.mount().len(), 1);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Loader {
    shared: Arc<Shared>,
}

impl Loader {
    /// Creates a loader on the global mount point without subscribers.
    pub fn new(cfg: LoaderConfig, host: HostRef) -> Self {
        LoaderBuilder::new(cfg, host).build()
    }

    /// Creates a builder.
    pub fn builder(cfg: LoaderConfig, host: HostRef) -> LoaderBuilder {
        LoaderBuilder::new(cfg, host)
    }

    pub(crate) fn from_parts(
        cfg: LoaderConfig,
        mount: Arc<Mount>,
        host: HostRef,
        notifier: Notifier,
    ) -> Self {
        let policy = cfg.retry_policy();
        Self {
            shared: Arc::new(Shared {
                cfg,
                policy,
                mount,
                host,
                notifier,
            }),
        }
    }

    /// Loads one script.
    ///
    /// Concurrent calls for the same source share one element per attempt and settle
    /// together. A source that already loaded resolves immediately; a source whose
    /// chain already failed terminally fails immediately with the same error.
    pub async fn load_script(&self, req: impl Into<LoadRequest>) -> Result<(), LoadError> {
        let req = req.into();
        let (tx, rx) = oneshot::channel();
        {
            let mut children = self.shared.mount.lock();
            registry::attach(&self.shared, &mut children, &req, 0, vec![tx]);
        }
        match rx.await {
            Ok(result) => result,
            Err(_) => Err(LoadError::Dropped {
                src: req.src().to_owned(),
            }),
        }
    }

    /// Loads a module / legacy pair, resolving with the first build that loads.
    ///
    /// Each build runs its own retry chain. With a single address only that chain is
    /// awaited. If every chain fails, the error of the chain that failed last is
    /// returned.
    ///
    /// A bundle with neither address fails with [`LoadError::EmptyBundle`] rather
    /// than resolving: there is nothing that could have loaded.
    pub async fn load_bundle(&self, bundle: Bundle) -> Result<(), LoadError> {
        let chains: Vec<_> = bundle
            .requests()
            .into_iter()
            .map(|req| self.load_script(req).boxed())
            .collect();
        if chains.is_empty() {
            return Err(LoadError::EmptyBundle);
        }
        future::select_ok(chains).await.map(|(loaded, _rest)| loaded)
    }

    /// Registers `callback` for events of `kind`.
    pub fn on<F>(&self, kind: EventKind, callback: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.shared.notifier.on(kind, callback)
    }

    /// Registers a subscriber for every event kind.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscribe>) -> Subscription {
        self.shared.notifier.subscribe(subscriber)
    }

    /// Mount point scripts are injected into.
    pub fn mount(&self) -> &Arc<Mount> {
        &self.shared.mount
    }

    /// Configuration this loader was built with.
    pub fn config(&self) -> &LoaderConfig {
        &self.shared.cfg
    }

    /// Retry policy derived from the configuration.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.shared.policy
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("cfg", &self.shared.cfg)
            .field("mount", &self.shared.mount)
            .field("host", &self.shared.host.name())
            .field("listeners", &self.shared.notifier.len())
            .finish()
    }
}
