//! Backlight blink task
//!
//! Idle until a blink is requested, then flips the backlight every dwell
//! period until it is told to stop. There is only ever one of these.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use panelmux_core::alert::BlinkTransition;

use crate::mux::{self, BlinkHandle};
use crate::panel::PanelSink;

/// Blink task - alternates the backlight while an alert is unacknowledged
#[embassy_executor::task]
pub async fn blink_task(dwell_ms: u32) {
    info!("Blink task started");

    let dwell = Duration::from_millis(dwell_ms as u64);
    let handle = BlinkHandle::new();
    let mut sink = PanelSink;

    loop {
        // Stop while idle needs no action
        if handle.request().await != BlinkTransition::Start {
            continue;
        }
        debug!("Blink started");

        let mut ticker = Ticker::every(dwell);
        loop {
            match select(ticker.next(), handle.request()).await {
                Either::First(()) => {
                    let mut mux = mux::shared().await.lock().await;
                    if mux.blink_tick().is_none() {
                        break;
                    }
                    mux.apply_backlight(&mut sink);
                }
                Either::Second(BlinkTransition::Stop) => {
                    mux::shared().await.lock().await.apply_backlight(&mut sink);
                    break;
                }
                // Duplicate start: keep the running blink and its phase
                Either::Second(_) => {}
            }
        }
        debug!("Blink stopped");
    }
}
