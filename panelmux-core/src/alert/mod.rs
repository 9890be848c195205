//! Alert notification
//!
//! An alert from a channel that is not on screen takes over the panel and
//! blinks the backlight until the user acknowledges it.

pub mod blink;

pub use blink::{BlinkTransition, Blinker};
