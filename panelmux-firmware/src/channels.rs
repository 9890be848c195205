//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use panelmux_core::alert::BlinkTransition;
use panelmux_core::ButtonCode;
use panelmux_protocol::Frame;

/// Channel capacity for frames waiting to go out to the panel
///
/// One display cycle queues two text frames and at most one backlight
/// frame, so this leaves room for the blink task and a late cycle.
const PANEL_OUT_SIZE: usize = 8;

/// Encoded frames for the panel UART (drained by the panel TX task)
pub static PANEL_OUT: Channel<CriticalSectionRawMutex, Frame, PANEL_OUT_SIZE> = Channel::new();

/// Blink start/stop requests for the blink task
///
/// Only the latest request matters: a `Start` overwritten by a `Stop`
/// before the task wakes up is a blink that never needed to run.
pub static BLINK_CMD: Signal<CriticalSectionRawMutex, BlinkTransition> = Signal::new();

/// Button state changed (updated by panel RX task)
pub static BUTTONS_CHANGED: Signal<CriticalSectionRawMutex, ButtonCode> = Signal::new();

/// Panel reported that it (re)booted with a blank screen
pub static PANEL_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
