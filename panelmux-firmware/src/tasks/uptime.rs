//! Uptime producer
//!
//! Plain status channel: shows time since boot and never alerts.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use panelmux_core::producers::format_uptime;

use crate::mux;

/// Uptime task - refreshes its channel once a second
#[embassy_executor::task]
pub async fn uptime_task() {
    let channel = match mux::allocate_channel().await {
        Ok(id) => id,
        Err(e) => {
            error!("Uptime producer has no channel: {:?}", e);
            return;
        }
    };
    info!("Uptime task started on channel {}", channel.raw());

    let mut ticker = Ticker::every(Duration::from_secs(1));
    let start = Instant::now();

    loop {
        let line1 = format_uptime(start.elapsed().as_secs());
        if let Err(e) = mux::push_content(channel, "Uptime", &line1, false).await {
            warn!("Uptime update failed: {:?}", e);
        }
        ticker.next().await;
    }
}
