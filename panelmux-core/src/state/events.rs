//! Button actions and the transitions they cause

use panelmux_protocol::ButtonCode;

use crate::alert::BlinkTransition;
use crate::channel::ChannelId;

/// What a button press asks the display loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Left: show the next channel
    NextChannel,
    /// Center: show the previous channel
    PreviousChannel,
    /// Right: flip alert permission on the current channel
    ToggleAlert,
    /// No press, or a combination with no meaning
    Nothing,
}

impl From<ButtonCode> for ButtonAction {
    fn from(code: ButtonCode) -> Self {
        match code {
            ButtonCode::Left => ButtonAction::NextChannel,
            ButtonCode::Center => ButtonAction::PreviousChannel,
            ButtonCode::Right => ButtonAction::ToggleAlert,
            ButtonCode::None | ButtonCode::Chord(_) => ButtonAction::Nothing,
        }
    }
}

/// Outcome of one button dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// The current channel changed (or wrapped onto itself)
    Switched { from: ChannelId, to: ChannelId },
    /// Alert permission flipped on the current channel
    AlertToggled {
        channel: ChannelId,
        enabled: bool,
        blink: BlinkTransition,
    },
    /// Nothing changed
    Ignored,
}

impl Transition {
    /// Blink change the caller must forward to the blink activity
    pub fn blink(&self) -> BlinkTransition {
        match self {
            Transition::AlertToggled { blink, .. } => *blink,
            _ => BlinkTransition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_buttons_map_to_actions() {
        assert_eq!(ButtonAction::from(ButtonCode::Left), ButtonAction::NextChannel);
        assert_eq!(
            ButtonAction::from(ButtonCode::Center),
            ButtonAction::PreviousChannel
        );
        assert_eq!(ButtonAction::from(ButtonCode::Right), ButtonAction::ToggleAlert);
    }

    #[test]
    fn test_chords_and_idle_do_nothing() {
        assert_eq!(ButtonAction::from(ButtonCode::None), ButtonAction::Nothing);
        for bits in [3u8, 5, 6, 7] {
            assert_eq!(
                ButtonAction::from(ButtonCode::from_bits(bits)),
                ButtonAction::Nothing
            );
        }
    }

    #[test]
    fn test_transition_blink() {
        let toggled = Transition::AlertToggled {
            channel: ChannelId::new(1),
            enabled: false,
            blink: BlinkTransition::Stop,
        };
        assert_eq!(toggled.blink(), BlinkTransition::Stop);
        assert_eq!(Transition::Ignored.blink(), BlinkTransition::Unchanged);
    }
}
