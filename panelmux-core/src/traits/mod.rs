//! Collaborator traits
//!
//! The panel and its buttons are thin I/O wrappers outside this crate.
//! These traits are the seam between them and the multiplexer.

pub mod buttons;
pub mod display;

pub use buttons::{ButtonSource, ReleaseOutcome};
pub use display::DisplaySink;
