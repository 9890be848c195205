//! Chip temperature producer
//!
//! Reads the RP2040's internal temperature sensor and raises an alert
//! when it climbs past the configured limit. The alert is retracted once
//! the reading drops back below the limit minus the hysteresis.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Ticker};

use panelmux_core::producers::{alert_level, format_temp_x10, raw_to_temp_x10};

use crate::mux;

/// Sample period
const SAMPLE_INTERVAL_MS: u64 = 2000;

/// Chip temperature task
#[embassy_executor::task]
pub async fn chip_temp_task(
    mut adc: Adc<'static, Async>,
    mut sensor: Channel<'static>,
    limit_c: i16,
) {
    let channel = match mux::allocate_channel().await {
        Ok(id) => id,
        Err(e) => {
            error!("Temperature producer has no channel: {:?}", e);
            return;
        }
    };
    info!(
        "Chip temp task started on channel {}, limit {}C",
        channel.raw(),
        limit_c
    );

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));
    let mut alert = false;

    loop {
        match adc.read(&mut sensor).await {
            Ok(raw) => {
                let temp_x10 = raw_to_temp_x10(raw);
                let now_alert = alert_level(alert, temp_x10, limit_c);
                let line1 = format_temp_x10(temp_x10);
                if now_alert != alert {
                    warn!("Chip temperature {}, alert {}", line1.as_str(), now_alert);
                }
                alert = now_alert;

                let line0 = if alert { "Chip temp HIGH" } else { "Chip temp" };

                if let Err(e) = mux::push_content(channel, line0, &line1, alert).await {
                    warn!("Temperature update failed: {:?}", e);
                }
            }
            Err(e) => {
                warn!("ADC read error: {:?}", e);
            }
        }

        ticker.next().await;
    }
}
