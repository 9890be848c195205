//! Multiplexer: registry, blink state and button dispatch in one place
//!
//! All shared state of the panel lives here. The firmware keeps one
//! instance behind a mutex; producers, the display loop and the blink
//! task each run to completion against it before yielding.

use panelmux_protocol::ButtonCode;

use super::events::{ButtonAction, Transition};
use crate::alert::{BlinkTransition, Blinker};
use crate::channel::{AlertToggle, ChannelError, ChannelId, Registry};
use crate::config::{BannerConfig, PANEL_ROWS};
use crate::traits::DisplaySink;

/// The panel multiplexer
#[derive(Debug, Clone)]
pub struct Multiplexer {
    registry: Registry,
    blinker: Blinker,
}

impl Default for Multiplexer {
    fn default() -> Self {
        Self::new(&BannerConfig::default())
    }
}

impl Multiplexer {
    /// Startup state: only the banner channel, shown, backlight on
    pub fn new(banner: &BannerConfig) -> Self {
        Self {
            registry: Registry::new(banner),
            blinker: Blinker::new(),
        }
    }

    /// Read access to the channel table
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Channel on screen
    pub fn current_channel(&self) -> ChannelId {
        self.registry.current()
    }

    /// Number of allocated channels, banner included
    pub fn channel_count(&self) -> usize {
        self.registry.len()
    }

    /// Backlight level the panel should show
    pub fn backlight(&self) -> bool {
        self.blinker.backlight()
    }

    /// Whether the blink activity should be running
    pub fn is_blinking(&self) -> bool {
        self.blinker.is_running()
    }

    // Producer API

    /// Allocate a channel for a new producer
    pub fn allocate_channel(&mut self) -> Result<ChannelId, ChannelError> {
        self.registry.allocate()
    }

    /// Update a channel's text and raise or retract its alert
    ///
    /// Returns the blink change to forward to the blink activity.
    pub fn push_content(
        &mut self,
        id: ChannelId,
        line0: &str,
        line1: &str,
        alert: bool,
    ) -> Result<BlinkTransition, ChannelError> {
        let demand = self.registry.push_content(id, line0, line1, alert)?;
        Ok(self.blinker.apply(demand))
    }

    /// Acknowledge a channel's alert as if Right were pressed on it
    pub fn clear_alert(&mut self, id: ChannelId) -> Result<AlertToggle, ChannelError> {
        self.toggle_alert_enable(id)
    }

    /// Flip a channel's alert permission
    ///
    /// Turning alerts off always forces the backlight on. Blinking stops
    /// unless another channel still has an unacknowledged alert.
    pub fn toggle_alert_enable(&mut self, id: ChannelId) -> Result<AlertToggle, ChannelError> {
        let mut toggle = self.registry.toggle_alert_enable(id)?;
        if !toggle.enabled {
            self.blinker.force_on();
        }
        toggle.blink = self.blinker.apply(toggle.blink);
        Ok(toggle)
    }

    // Display loop

    /// Apply one logical button press
    pub fn handle_button(&mut self, code: ButtonCode) -> Transition {
        let from = self.registry.current();
        match ButtonAction::from(code) {
            ButtonAction::NextChannel => Transition::Switched {
                from,
                to: self.registry.select_next(),
            },
            ButtonAction::PreviousChannel => Transition::Switched {
                from,
                to: self.registry.select_previous(),
            },
            ButtonAction::ToggleAlert => match self.toggle_alert_enable(from) {
                Ok(toggle) => Transition::AlertToggled {
                    channel: toggle.channel,
                    enabled: toggle.enabled,
                    blink: toggle.blink,
                },
                Err(_) => Transition::Ignored,
            },
            ButtonAction::Nothing => Transition::Ignored,
        }
    }

    /// Write the current channel's two lines to the panel
    pub fn render<D: DisplaySink>(&self, sink: &mut D) {
        let content = self.registry.current_content();
        for row in 0..PANEL_ROWS {
            sink.write_line(row as u8, 0, content.line(row));
        }
    }

    /// Push the backlight level to the panel
    pub fn apply_backlight<D: DisplaySink>(&self, sink: &mut D) {
        sink.set_backlight(self.blinker.backlight());
    }

    /// One display loop cycle: dispatch the sampled press, then render
    pub fn cycle<D: DisplaySink>(&mut self, pressed: ButtonCode, sink: &mut D) -> Transition {
        let transition = self.handle_button(pressed);
        self.render(sink);
        transition
    }

    // Blink activity

    /// Advance the blink phase after one dwell period
    ///
    /// Returns the new backlight level, or `None` once blinking has stopped.
    pub fn blink_tick(&mut self) -> Option<bool> {
        self.blinker.advance()
    }
}
