//! Display loop task
//!
//! Samples the buttons once per cycle, collapses a held press into one
//! event, applies it to the multiplexer and redraws the current channel.

use defmt::*;
use embassy_time::{Duration, Timer};

use panelmux_core::config::TimingConfig;
use panelmux_core::state::{next_press, Transition};
use panelmux_core::ButtonCode;

use crate::mux::{self, BlinkHandle};
use crate::panel::{PanelButtons, PanelSink};

/// Display loop task - the panel's main activity, never returns
#[embassy_executor::task]
pub async fn display_loop_task(timing: TimingConfig) {
    info!("Display loop task started");

    let cycle = Duration::from_millis(timing.cycle_ms as u64);
    let mut buttons = PanelButtons;
    let mut sink = PanelSink;
    let blink = BlinkHandle::new();

    {
        let mux = mux::shared().await.lock().await;
        mux.apply_backlight(&mut sink);
        mux.render(&mut sink);
    }

    loop {
        let pressed = match next_press(&mut buttons, timing.hold_ms).await {
            Some(press) => {
                trace!("Button {:?} hold ended: {:?}", press.code, press.outcome);
                press.code
            }
            None => ButtonCode::None,
        };

        let transition = {
            let mut mux = mux::shared().await.lock().await;
            let transition = mux.cycle(pressed, &mut sink);
            if let Transition::AlertToggled { enabled: false, .. } = transition {
                mux.apply_backlight(&mut sink);
            }
            transition
        };

        match transition {
            Transition::Switched { from, to } => {
                debug!("Channel {} -> {}", from.raw(), to.raw());
            }
            Transition::AlertToggled {
                channel, enabled, ..
            } => {
                info!(
                    "Channel {} alerts {}",
                    channel.raw(),
                    if enabled { "enabled" } else { "disabled" }
                );
            }
            Transition::Ignored => {}
        }
        blink.forward(transition.blink());

        Timer::after(cycle).await;
    }
}
