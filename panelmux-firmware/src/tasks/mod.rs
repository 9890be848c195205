//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals and
//! the shared multiplexer.

pub mod blink;
pub mod chip_temp;
pub mod display_loop;
pub mod panel_rx;
pub mod panel_tx;
pub mod uptime;

pub use blink::blink_task;
pub use chip_temp::chip_temp_task;
pub use display_loop::display_loop_task;
pub use panel_rx::panel_rx_task;
pub use panel_tx::panel_tx_task;
pub use uptime::uptime_task;
