//! # Load requests.
//!
//! [`LoadRequest`] identifies *what* is being loaded: a source address, a variant and
//! extra attributes. It is immutable once handed to the loader and is reused verbatim
//! for every retry of the chain it started.
//!
//! [`Bundle`] pairs the module and legacy builds of the same logical script.

use std::sync::Arc;

/// Variant marker of a script element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    /// `type="module"`.
    Module,
    /// `nomodule` (only executed by runtimes without module support).
    Legacy,
    /// Classic script without a variant marker (default).
    #[default]
    Plain,
}

/// Request to load one script.
///
/// # Example
/// ```
/// use lazyscript::{LoadRequest, ScriptKind};
///
/// let req = LoadRequest::new("https://cdn.example.com/widget.js")
///     .with_kind(ScriptKind::Module)
///     .with_attribute("crossorigin", "anonymous");
///
/// assert_eq!(req.src(), "https://cdn.example.com/widget.js");
/// assert_eq!(req.kind(), ScriptKind::Module);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub(crate) src: Arc<str>,
    pub(crate) kind: ScriptKind,
    pub(crate) attributes: Vec<(String, String)>,
}

impl LoadRequest {
    /// Creates a plain request for `src`.
    pub fn new(src: impl Into<Arc<str>>) -> Self {
        Self {
            src: src.into(),
            kind: ScriptKind::Plain,
            attributes: Vec::new(),
        }
    }

    /// Sets the variant marker.
    #[must_use]
    pub fn with_kind(mut self, kind: ScriptKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends an extra attribute copied onto every element of the chain.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Source address.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Variant marker.
    pub fn kind(&self) -> ScriptKind {
        self.kind
    }

    /// Extra attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

impl From<&str> for LoadRequest {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}

impl From<String> for LoadRequest {
    fn from(src: String) -> Self {
        Self::new(src)
    }
}

/// Module / legacy pair of the same logical script.
///
/// Only one of the two executes in a given runtime, so the loader races them and
/// takes the first success.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bundle {
    /// Address of the `type="module"` build.
    pub module: Option<String>,
    /// Address of the `nomodule` build.
    pub legacy: Option<String>,
}

impl Bundle {
    /// Bundle with both builds.
    pub fn new(module: impl Into<String>, legacy: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            legacy: Some(legacy.into()),
        }
    }

    /// Bundle with only a module build.
    pub fn module_only(module: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            legacy: None,
        }
    }

    /// Bundle with only a legacy build.
    pub fn legacy_only(legacy: impl Into<String>) -> Self {
        Self {
            module: None,
            legacy: Some(legacy.into()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<LoadRequest> {
        let module = self
            .module
            .as_deref()
            .map(|src| LoadRequest::new(src).with_kind(ScriptKind::Module));
        let legacy = self
            .legacy
            .as_deref()
            .map(|src| LoadRequest::new(src).with_kind(ScriptKind::Legacy));
        module.into_iter().chain(legacy).collect()
    }
}
