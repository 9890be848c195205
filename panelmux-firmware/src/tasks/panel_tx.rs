//! Panel UART transmit task
//!
//! Writes queued frames to the panel, and restores the backlight after the
//! panel reports a reboot.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use panelmux_protocol::{Frame, MAX_FRAME_SIZE};

use crate::channels::{PANEL_OUT, PANEL_READY};
use crate::mux;
use crate::panel::PanelSink;

/// Panel TX task - sends frames to the panel
#[embassy_executor::task]
pub async fn panel_tx_task(mut tx: BufferedUartTx) {
    info!("Panel TX task started");

    loop {
        match select(PANEL_OUT.receive(), PANEL_READY.wait()).await {
            Either::First(frame) => send_frame(&mut tx, &frame).await,
            Either::Second(()) => {
                // Screen text comes back on the next display cycle
                mux::shared().await.lock().await.apply_backlight(&mut PanelSink);
            }
        }
    }
}

/// Encode and write one frame
async fn send_frame(tx: &mut BufferedUartTx, frame: &Frame) {
    let mut buf = [0u8; MAX_FRAME_SIZE];
    match frame.encode(&mut buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send panel frame: {:?}", e);
            }
        }
        Err(e) => warn!("Failed to encode panel frame: {:?}", e),
    }
}
