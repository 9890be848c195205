//! Channel registry
//!
//! Owns the channel table and the current-channel cursor. Channel 0 is the
//! banner and always exists, so the table is never empty and the cursor is
//! always a valid index.

use heapless::Vec;

use super::types::{Channel, ChannelContent, ChannelId, BANNER_CHANNEL};
use crate::alert::BlinkTransition;
use crate::config::{BannerConfig, MAX_CHANNELS};

/// Errors from channel operations
///
/// Both are caller mistakes; nothing here is transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// Every channel slot is already allocated
    CapacityExceeded,
    /// The ID does not name an allocated channel
    InvalidChannel(ChannelId),
}

/// Result of flipping a channel's alert permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertToggle {
    /// Channel that was toggled
    pub channel: ChannelId,
    /// Alert permission after the toggle
    pub enabled: bool,
    /// Effect on the backlight blink
    pub blink: BlinkTransition,
}

/// Fixed-capacity table of virtual channels
#[derive(Debug, Clone)]
pub struct Registry {
    channels: Vec<Channel, MAX_CHANNELS>,
    current: ChannelId,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(&BannerConfig::default())
    }
}

impl Registry {
    /// Registry holding only the banner channel, which is current
    pub fn new(banner: &BannerConfig) -> Self {
        let mut banner_channel = Channel::new();
        banner_channel
            .content
            .set(banner.line0.as_str(), banner.line1.as_str());

        let mut channels = Vec::new();
        // MAX_CHANNELS is at least 1
        let _ = channels.push(banner_channel);

        Self {
            channels,
            current: BANNER_CHANNEL,
        }
    }

    /// Number of allocated channels, banner included
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Always false: the banner channel cannot be removed
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// True when no further channel can be allocated
    pub fn is_full(&self) -> bool {
        self.channels.is_full()
    }

    /// Channel currently on screen
    pub fn current(&self) -> ChannelId {
        self.current
    }

    /// Content of the channel currently on screen
    pub fn current_content(&self) -> &ChannelContent {
        // The cursor only ever holds IDs that passed `get` or came from
        // wrapping arithmetic over `len`
        &self.channels[self.current.index()].content
    }

    /// Look up a channel
    pub fn get(&self, id: ChannelId) -> Result<&Channel, ChannelError> {
        self.channels
            .get(id.index())
            .ok_or(ChannelError::InvalidChannel(id))
    }

    fn get_mut(&mut self, id: ChannelId) -> Result<&mut Channel, ChannelError> {
        self.channels
            .get_mut(id.index())
            .ok_or(ChannelError::InvalidChannel(id))
    }

    /// Allocate the next channel
    ///
    /// The new channel is blank with alerts enabled. On failure the table
    /// is unchanged.
    pub fn allocate(&mut self) -> Result<ChannelId, ChannelError> {
        let id = ChannelId::new(self.channels.len() as u8);
        self.channels
            .push(Channel::new())
            .map_err(|_| ChannelError::CapacityExceeded)?;
        Ok(id)
    }

    /// Overwrite a channel's text and update its alert state
    ///
    /// - `alert` on a channel with alerts enabled and no active alert is a
    ///   rising edge: the channel becomes current and starts flashing.
    /// - `alert` on a channel that is already alerting changes nothing
    ///   beyond the text.
    /// - No `alert` retracts the channel's alert. It does not move the
    ///   cursor or stop a blink already in progress.
    pub fn push_content(
        &mut self,
        id: ChannelId,
        line0: &str,
        line1: &str,
        alert: bool,
    ) -> Result<BlinkTransition, ChannelError> {
        let was_wanted = self.blink_wanted();

        let chan = self.get_mut(id)?;
        chan.content.set(line0, line1);

        let rising = alert && chan.alert_enabled && !chan.alert_active;
        if rising {
            chan.alert_active = true;
            chan.flashing = true;
        } else if !alert {
            chan.alert_active = false;
        }

        if rising {
            self.current = id;
        }

        Ok(BlinkTransition::between(was_wanted, self.blink_wanted()))
    }

    /// Flip whether a channel may raise alerts
    ///
    /// Disabling acknowledges the channel's alert: it stops flashing. The
    /// blink only stops once no other channel is flashing. Enabling clears
    /// the channel's active alert so the next alert is a fresh edge.
    pub fn toggle_alert_enable(&mut self, id: ChannelId) -> Result<AlertToggle, ChannelError> {
        let was_wanted = self.blink_wanted();

        let chan = self.get_mut(id)?;
        chan.alert_enabled = !chan.alert_enabled;
        let enabled = chan.alert_enabled;
        if enabled {
            chan.alert_active = false;
        } else {
            chan.flashing = false;
        }

        Ok(AlertToggle {
            channel: id,
            enabled,
            blink: BlinkTransition::between(was_wanted, self.blink_wanted()),
        })
    }

    /// Move the cursor to the next channel, wrapping to the banner
    pub fn select_next(&mut self) -> ChannelId {
        let len = self.channels.len();
        let next = (self.current.index() + 1) % len;
        self.current = ChannelId::new(next as u8);
        self.current
    }

    /// Move the cursor to the previous channel, wrapping to the last one
    pub fn select_previous(&mut self) -> ChannelId {
        let len = self.channels.len();
        let prev = (self.current.index() + len - 1) % len;
        self.current = ChannelId::new(prev as u8);
        self.current
    }

    /// Number of channels holding the backlight blink
    pub fn flashing_count(&self) -> usize {
        self.channels.iter().filter(|c| c.flashing).count()
    }

    /// Whether any channel needs the backlight to blink
    pub fn blink_wanted(&self) -> bool {
        self.channels.iter().any(|c| c.flashing)
    }
}
