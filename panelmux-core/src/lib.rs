//! Board-agnostic core logic for the panelmux LCD panel
//!
//! Several independent producers share one two-line character panel by
//! each writing to a private virtual channel. This crate holds everything
//! that does not touch hardware:
//!
//! - Channel registry (allocation, content, alert flags)
//! - Backlight blink state for unacknowledged alerts
//! - Display loop state machine (button dispatch, rendering)
//! - Collaborator traits for the panel and its buttons
//! - Configuration types and the `panel.toml` parser
//! - Conversion and formatting helpers for the demo producers

#![no_std]
#![deny(unsafe_code)]

pub mod alert;
pub mod channel;
pub mod config;
pub mod producers;
pub mod state;
pub mod traits;

pub use panelmux_protocol::ButtonCode;
