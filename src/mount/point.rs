//! # Mount point for script elements.
//!
//! [`Mount`] is the container scripts are injected into (the `document.head`
//! equivalent). It is an ordered list of [`ScriptElement`]s.
//!
//! ## Rules
//! - Only the registry appends (under [`Mount::lock`]); everything else reads.
//! - Elements are never removed: a loaded element short-circuits later lookups.
//! - [`Mount::global`] is the process-wide default location.

use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, MutexGuard};

use super::element::ScriptElement;

static GLOBAL: OnceLock<Arc<Mount>> = OnceLock::new();

/// Ordered container of injected script elements.
#[derive(Default)]
pub struct Mount {
    children: Mutex<Vec<Arc<ScriptElement>>>,
}

impl Mount {
    /// Creates an empty mount point.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mount point behind an `Arc`.
    #[must_use]
    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Returns the process-wide default mount point.
    pub fn global() -> Arc<Mount> {
        Arc::clone(GLOBAL.get_or_init(Mount::arc))
    }

    /// Finds the element for `(src, attempt)`.
    pub fn find(&self, src: &str, attempt: u32) -> Option<Arc<ScriptElement>> {
        find_in(&self.children.lock(), src, attempt)
    }

    /// Snapshot of all elements in insertion order.
    pub fn elements(&self) -> Vec<Arc<ScriptElement>> {
        self.children.lock().clone()
    }

    /// Elements loading `src`, ordered by insertion (and therefore by attempt).
    pub fn elements_for(&self, src: &str) -> Vec<Arc<ScriptElement>> {
        self.children
            .lock()
            .iter()
            .filter(|el| el.src() == src)
            .cloned()
            .collect()
    }

    /// Number of injected elements.
    pub fn len(&self) -> usize {
        self.children.lock().len()
    }

    /// True if nothing has been injected.
    pub fn is_empty(&self) -> bool {
        self.children.lock().is_empty()
    }

    /// Locks the child list for a lookup-then-create sequence.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<Arc<ScriptElement>>> {
        self.children.lock()
    }
}

pub(crate) fn find_in(
    children: &[Arc<ScriptElement>],
    src: &str,
    attempt: u32,
) -> Option<Arc<ScriptElement>> {
    children
        .iter()
        .find(|el| el.matches(src, attempt))
        .cloned()
}

impl std::fmt::Debug for Mount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mount").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoadRequest;

    #[test]
    fn find_matches_source_and_attempt() {
        let mount = Mount::new();
        let req = LoadRequest::new("/a.js");
        mount
            .lock()
            .push(Arc::new(ScriptElement::from_request(&req, 0)));

        assert!(mount.find("/a.js", 0).is_some());
        assert!(mount.find("/a.js", 1).is_none());
        assert!(mount.find("/b.js", 0).is_none());
        assert_eq!(mount.elements_for("/a.js").len(), 1);
    }

    #[test]
    fn global_is_shared() {
        assert!(Arc::ptr_eq(&Mount::global(), &Mount::global()));
    }
}
