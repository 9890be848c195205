//! Channel data types

use heapless::String;

use crate::config::LINE_LEN;

/// Identifier of a virtual channel
///
/// IDs are handed out in increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(u8);

/// The channel holding the banner, present from startup
pub const BANNER_CHANNEL: ChannelId = ChannelId(0);

impl ChannelId {
    /// Wrap a raw channel number
    ///
    /// The ID is only checked against the registry when it is used.
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw channel number
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Position in the channel table
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Two lines of channel text, each at most one panel line long
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelContent {
    line0: String<LINE_LEN>,
    line1: String<LINE_LEN>,
}

impl ChannelContent {
    /// Empty content
    pub const fn new() -> Self {
        Self {
            line0: String::new(),
            line1: String::new(),
        }
    }

    /// Content from two lines, truncating each to the panel width
    pub fn from_lines(line0: &str, line1: &str) -> Self {
        let mut content = Self::new();
        content.set(line0, line1);
        content
    }

    /// Replace both lines
    pub fn set(&mut self, line0: &str, line1: &str) {
        fill_truncated(&mut self.line0, line0);
        fill_truncated(&mut self.line1, line1);
    }

    /// Top line
    pub fn line0(&self) -> &str {
        self.line0.as_str()
    }

    /// Bottom line
    pub fn line1(&self) -> &str {
        self.line1.as_str()
    }

    /// Line by row number; rows past the bottom read as empty
    pub fn line(&self, row: usize) -> &str {
        match row {
            0 => self.line0(),
            1 => self.line1(),
            _ => "",
        }
    }
}

/// Copy as many whole characters of `src` as fit
fn fill_truncated(dst: &mut String<LINE_LEN>, src: &str) {
    dst.clear();
    for c in src.chars() {
        if dst.push(c).is_err() {
            break;
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChannelContent {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "[{}|{}]", self.line0.as_str(), self.line1.as_str());
    }
}

/// One virtual channel slot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    /// Text shown while this channel is current
    pub content: ChannelContent,
    /// Channel may raise alerts
    pub alert_enabled: bool,
    /// Channel has an alert the producer has not retracted
    pub alert_active: bool,
    /// Channel's alert edge is holding the backlight blink until the
    /// user acknowledges it
    pub flashing: bool,
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel {
    /// A freshly allocated channel: blank, alerts enabled, nothing active
    pub const fn new() -> Self {
        Self {
            content: ChannelContent::new(),
            alert_enabled: true,
            alert_active: false,
            flashing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_channel_defaults() {
        let chan = Channel::new();
        assert!(chan.alert_enabled);
        assert!(!chan.alert_active);
        assert!(!chan.flashing);
        assert_eq!(chan.content.line0(), "");
        assert_eq!(chan.content.line1(), "");
    }

    #[test]
    fn test_content_truncated_to_line_length() {
        let content = ChannelContent::from_lines("0123456789abcdefXYZ", "short");
        assert_eq!(content.line0(), "0123456789abcdef");
        assert_eq!(content.line1(), "short");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 15 ASCII bytes then a 2-byte character that would straddle the end
        let content = ChannelContent::from_lines("abcdefghijklmno°C", "");
        assert_eq!(content.line0(), "abcdefghijklmno");
    }

    #[test]
    fn test_set_overwrites_previous_text() {
        let mut content = ChannelContent::from_lines("first", "second");
        content.set("A", "");
        assert_eq!(content.line0(), "A");
        assert_eq!(content.line1(), "");
    }

    #[test]
    fn test_line_by_row() {
        let content = ChannelContent::from_lines("top", "bottom");
        assert_eq!(content.line(0), "top");
        assert_eq!(content.line(1), "bottom");
        assert_eq!(content.line(2), "");
    }
}
