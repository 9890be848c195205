//! Configuration types
//!
//! Timing constants, the banner shown on channel 0, and the few board
//! settings the firmware needs. Loaded from `panel.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
