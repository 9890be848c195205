//! Panel collaborators
//!
//! [`PanelSink`] turns display writes into frames for the TX task, and
//! [`PanelButtons`] exposes the last button state the RX task decoded.

use defmt::*;
use embassy_time::{with_timeout, Duration};
use heapless::String;
use portable_atomic::{AtomicU8, Ordering};

use panelmux_core::config::LINE_LEN;
use panelmux_core::traits::{ButtonSource, DisplaySink, ReleaseOutcome};
use panelmux_core::ButtonCode;
use panelmux_protocol::{HostMessage, PANEL_COLS};

use crate::channels::{BUTTONS_CHANGED, PANEL_OUT};

/// Raw button bits from the latest panel report
static BUTTON_STATE: AtomicU8 = AtomicU8::new(0);

/// Display sink that queues frames for the panel TX task
///
/// Text is padded with spaces to the right edge so a shorter line fully
/// replaces a longer one. A full queue drops the frame; the display loop
/// rewrites both rows every cycle anyway.
pub struct PanelSink;

impl PanelSink {
    fn send(&mut self, msg: HostMessage<'_>) {
        match msg.to_frame() {
            Ok(frame) => {
                if PANEL_OUT.try_send(frame).is_err() {
                    warn!("Panel queue full, dropping frame");
                }
            }
            Err(e) => warn!("Failed to encode panel message: {:?}", e),
        }
    }
}

impl DisplaySink for PanelSink {
    fn write_line(&mut self, row: u8, col: u8, text: &str) {
        let mut padded: String<LINE_LEN> = String::new();
        let width = PANEL_COLS.saturating_sub(col) as usize;
        for c in text.chars() {
            if padded.push(c).is_err() {
                break;
            }
        }
        while padded.len() < width {
            if padded.push(' ').is_err() {
                break;
            }
        }

        self.send(HostMessage::Text {
            row,
            col,
            text: padded.as_str(),
        });
    }

    fn set_backlight(&mut self, on: bool) {
        self.send(HostMessage::Backlight(on));
    }
}

/// Button source backed by the panel's button reports
pub struct PanelButtons;

impl PanelButtons {
    /// Record a button report from the panel and wake any release wait
    pub fn update(code: ButtonCode) {
        BUTTON_STATE.store(code.bits(), Ordering::Relaxed);
        BUTTONS_CHANGED.signal(code);
    }

    /// Wait until no button is held
    async fn released(&self) {
        loop {
            BUTTONS_CHANGED.reset();
            if self.is_released() {
                return;
            }
            BUTTONS_CHANGED.wait().await;
        }
    }
}

impl ButtonSource for PanelButtons {
    fn current_button(&self) -> ButtonCode {
        ButtonCode::from_bits(BUTTON_STATE.load(Ordering::Relaxed))
    }

    /// Sleeps on button reports rather than polling
    async fn wait_for_release(&mut self, hold_ms: u32) -> ReleaseOutcome {
        match with_timeout(Duration::from_millis(hold_ms as u64), self.released()).await {
            Ok(()) => ReleaseOutcome::Released,
            Err(_) => ReleaseOutcome::TimedOut,
        }
    }
}
