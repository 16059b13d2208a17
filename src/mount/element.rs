//! # Script elements.
//!
//! A [`ScriptElement`] is one physical injection of a script into a [`Mount`](crate::Mount):
//! the `<script src=... async>` equivalent for attempt `n` of a source address.
//!
//! Identity is the `(src, attempt)` pair. Tag construction order follows the page
//! convention: `src`, `async`, caller attributes (set semantics, later keys overwrite
//! earlier ones in place), then the variant marker (`type="module"` or `nomodule`).
//!
//! The element also owns the attempt's completion state (status + ordered waiters);
//! only `core` touches it.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{AttemptState, AttemptStatus, LoadRequest, ScriptKind};

/// One injected script element.
pub struct ScriptElement {
    src: Arc<str>,
    attempt: u32,
    kind: ScriptKind,
    attributes: Vec<(String, String)>,
    pub(crate) state: Mutex<AttemptState>,
}

impl ScriptElement {
    /// Builds the element for attempt `attempt` of `req`.
    pub(crate) fn from_request(req: &LoadRequest, attempt: u32) -> Self {
        let mut el = Self {
            src: Arc::clone(&req.src),
            attempt,
            kind: req.kind,
            attributes: Vec::with_capacity(req.attributes.len() + 3),
            state: Mutex::new(AttemptState::default()),
        };
        el.set_attribute("src", &req.src);
        el.set_attribute("async", "");
        for (key, value) in &req.attributes {
            el.set_attribute(key, value);
        }
        match req.kind {
            ScriptKind::Module => el.set_attribute("type", "module"),
            ScriptKind::Legacy => el.set_attribute("nomodule", ""),
            ScriptKind::Plain => {}
        }
        el
    }

    fn set_attribute(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_owned(),
            None => self.attributes.push((key.to_owned(), value.to_owned())),
        }
    }

    /// Source address this element loads.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Attempt number (0 for the first injection).
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Variant of the request that created the element.
    pub fn kind(&self) -> ScriptKind {
        self.kind
    }

    /// Returns an attribute value (`Some("")` for valueless attributes such as `async`).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Current state of this attempt.
    pub fn status(&self) -> AttemptStatus {
        self.state.lock().status.clone()
    }

    /// True once the element has signalled success (the durable "loaded" marker).
    pub fn is_loaded(&self) -> bool {
        matches!(self.state.lock().status, AttemptStatus::Succeeded)
    }

    pub(crate) fn matches(&self, src: &str, attempt: u32) -> bool {
        self.attempt == attempt && &*self.src == src
    }
}

impl std::fmt::Debug for ScriptElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptElement")
            .field("src", &self.src)
            .field("attempt", &self.attempt)
            .field("kind", &self.kind)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
