//! Display loop state machine
//!
//! One variable, the current channel, driven by button presses and by
//! producer alerts. Everything else the loop does is rendering.

pub mod events;
pub mod input;
pub mod machine;

pub use events::{ButtonAction, Transition};
pub use input::{next_press, Press};
pub use machine::Multiplexer;
