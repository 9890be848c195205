//! Shared multiplexer and the producer API
//!
//! Every task reaches the multiplexer through [`MUX`]. Each call locks it,
//! runs one operation to completion and releases it before any await, so
//! producers, the display loop and the blink task never interleave inside
//! an operation.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::once_lock::OnceLock;
use embassy_sync::signal::Signal;

use panelmux_core::alert::BlinkTransition;
use panelmux_core::channel::{AlertToggle, ChannelError, ChannelId};
use panelmux_core::config::BannerConfig;
use panelmux_core::state::Multiplexer;

use crate::channels::BLINK_CMD;
use crate::panel::PanelSink;

/// The multiplexer, created once at startup from the loaded config
pub static MUX: OnceLock<Mutex<CriticalSectionRawMutex, Multiplexer>> = OnceLock::new();

/// Create the shared multiplexer with its banner channel
///
/// Called once from `main` before any task is spawned.
pub fn init(banner: &BannerConfig) {
    if MUX.init(Mutex::new(Multiplexer::new(banner))).is_err() {
        warn!("Multiplexer already initialized");
    }
}

/// Shared multiplexer, waiting for `init` if needed
pub async fn shared() -> &'static Mutex<CriticalSectionRawMutex, Multiplexer> {
    MUX.get().await
}

/// Handle on the single blink activity
///
/// `start` on a running blink is ignored by the blink task, and `stop`
/// always ends with the backlight on.
#[derive(Clone, Copy)]
pub struct BlinkHandle {
    cmd: &'static Signal<CriticalSectionRawMutex, BlinkTransition>,
}

impl Default for BlinkHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkHandle {
    /// Handle driving the blink task
    pub fn new() -> Self {
        Self { cmd: &BLINK_CMD }
    }

    /// Ask the blink activity to run
    pub fn start(&self) {
        self.cmd.signal(BlinkTransition::Start);
    }

    /// Ask the blink activity to stop
    pub fn stop(&self) {
        self.cmd.signal(BlinkTransition::Stop);
    }

    /// Next request, for the blink task itself
    pub async fn request(&self) -> BlinkTransition {
        self.cmd.wait().await
    }

    /// Pass on a transition reported by the multiplexer
    pub fn forward(&self, transition: BlinkTransition) {
        match transition {
            BlinkTransition::Start => self.start(),
            BlinkTransition::Stop => self.stop(),
            BlinkTransition::Unchanged => {}
        }
    }
}

/// Allocate a channel for a new producer
pub async fn allocate_channel() -> Result<ChannelId, ChannelError> {
    let id = shared().await.lock().await.allocate_channel()?;
    info!("Allocated channel {}", id.raw());
    Ok(id)
}

/// Update a channel's text and raise (`alert = true`) or retract its alert
pub async fn push_content(
    id: ChannelId,
    line0: &str,
    line1: &str,
    alert: bool,
) -> Result<(), ChannelError> {
    let (blink, flashing) = {
        let mut mux = shared().await.lock().await;
        let blink = mux.push_content(id, line0, line1, alert)?;
        (blink, mux.registry().flashing_count())
    };

    if blink == BlinkTransition::Start {
        info!("Alert raised on channel {}, {} flashing", id.raw(), flashing);
    }
    BlinkHandle::new().forward(blink);
    Ok(())
}

/// Acknowledge a channel's alert, exactly as the Right button would
pub async fn clear_alert(id: ChannelId) -> Result<AlertToggle, ChannelError> {
    let (toggle, flashing) = {
        let mut mux = shared().await.lock().await;
        let toggle = mux.clear_alert(id)?;
        if !toggle.enabled {
            mux.apply_backlight(&mut PanelSink);
        }
        (toggle, mux.registry().flashing_count())
    };

    debug!(
        "Channel {} alerts {}, {} still flashing",
        id.raw(),
        if toggle.enabled { "enabled" } else { "disabled" },
        flashing
    );
    BlinkHandle::new().forward(toggle.blink);
    Ok(toggle)
}
