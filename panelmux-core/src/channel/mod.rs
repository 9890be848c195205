//! Virtual channels
//!
//! Each producer owns one channel: two lines of text plus the flags that
//! decide whether it may take over the panel with an alert.

pub mod registry;
pub mod types;

pub use registry::{AlertToggle, ChannelError, Registry};
pub use types::{Channel, ChannelContent, ChannelId, BANNER_CHANNEL};
