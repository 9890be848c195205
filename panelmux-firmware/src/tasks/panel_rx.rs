//! Panel UART receive task
//!
//! Receives frames from the LCD panel and dispatches its reports.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use panelmux_protocol::{FrameParser, PanelReport};

use crate::channels::PANEL_READY;
use crate::panel::PanelButtons;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Panel RX task - receives and parses frames from the panel
#[embassy_executor::task]
pub async fn panel_rx_task(mut rx: BufferedUartRx) {
    info!("Panel RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match PanelReport::from_frame(&frame) {
                            Ok(report) => handle_report(report),
                            Err(e) => warn!("Failed to parse panel report: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn handle_report(report: PanelReport) {
    match report {
        PanelReport::Buttons(code) => {
            trace!("Buttons: {:?}", code);
            PanelButtons::update(code);
        }
        PanelReport::Ready => {
            info!("Panel ready");
            PANEL_READY.signal(());
        }
    }
}
