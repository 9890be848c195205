//! Button source trait

use core::future::Future;

use panelmux_protocol::ButtonCode;

/// How a bounded wait for a held button ended
///
/// A press is one logical event whichever way the wait ends; the outcome
/// only says whether the user let go in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReleaseOutcome {
    /// The button was released before the deadline
    Released,
    /// The deadline passed with the button still held
    TimedOut,
}

/// Input side of the panel
pub trait ButtonSource {
    /// Buttons held right now
    fn current_button(&self) -> ButtonCode;

    /// True when no button is held
    fn is_released(&self) -> bool {
        !self.current_button().is_pressed()
    }

    /// Wait until no button is held, giving up after `hold_ms`
    fn wait_for_release(&mut self, hold_ms: u32) -> impl Future<Output = ReleaseOutcome>;
}
