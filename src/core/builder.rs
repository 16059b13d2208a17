use std::sync::Arc;

use crate::{
    config::LoaderConfig,
    events::Notifier,
    host::HostRef,
    mount::Mount,
    subscribers::Subscribe,
};
use super::loader::Loader;

/// Builder for constructing a [`Loader`] with optional mount point and subscribers.
pub struct LoaderBuilder {
    cfg: LoaderConfig,
    host: HostRef,
    mount: Option<Arc<Mount>>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl LoaderBuilder {
    /// Creates a new builder with the given configuration and host.
    pub fn new(cfg: LoaderConfig, host: HostRef) -> Self {
        Self {
            cfg,
            host,
            mount: None,
            subscribers: Vec::new(),
        }
    }

    /// Sets the mount point scripts are injected into.
    ///
    /// Defaults to [`Mount::global`].
    pub fn with_mount(mut self, mount: Arc<Mount>) -> Self {
        self.mount = Some(mount);
        self
    }

    /// Sets event subscribers, registered in the given order.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the loader.
    ///
    /// This consumes the builder and initializes:
    /// - the notifier, with the configured subscribers
    /// - the retry policy derived from the configuration
    pub fn build(self) -> Loader {
        let notifier = Notifier::new();
        for sub in self.subscribers {
            // Builder-registered subscribers live as long as the loader.
            let _ = notifier.subscribe(sub);
        }
        let mount = self.mount.unwrap_or_else(Mount::global);
        Loader::from_parts(self.cfg, mount, self.host, notifier)
    }
}
