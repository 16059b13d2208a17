//! Mount point and script elements.
//!
//! - [`Mount`] the container scripts are injected into;
//! - [`ScriptElement`] one injected element (one attempt of one source address).

mod element;
mod point;

pub use element::ScriptElement;
pub use point::Mount;

pub(crate) use point::find_in;
