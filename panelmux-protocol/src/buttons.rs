//! Button state reported by the panel

/// Left button bit in the wire bitmask
pub const BUTTON_LEFT: u8 = 0x01;
/// Center button bit in the wire bitmask
pub const BUTTON_CENTER: u8 = 0x02;
/// Right button bit in the wire bitmask
pub const BUTTON_RIGHT: u8 = 0x04;

const BUTTON_MASK: u8 = BUTTON_LEFT | BUTTON_CENTER | BUTTON_RIGHT;

/// The set of panel buttons held at one instant
///
/// Exactly one held button maps to its own variant. Two or three buttons
/// held together are kept as a [`ButtonCode::Chord`] carrying the raw
/// bitmask, so callers can tell them apart from a single press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonCode {
    /// Nothing pressed
    #[default]
    None,
    /// Left button only
    Left,
    /// Center button only
    Center,
    /// Right button only
    Right,
    /// More than one button held (raw bitmask)
    Chord(u8),
}

impl ButtonCode {
    /// Decode a wire bitmask. Bits above the three button bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        match bits & BUTTON_MASK {
            0 => ButtonCode::None,
            BUTTON_LEFT => ButtonCode::Left,
            BUTTON_CENTER => ButtonCode::Center,
            BUTTON_RIGHT => ButtonCode::Right,
            other => ButtonCode::Chord(other),
        }
    }

    /// Encode as a wire bitmask
    pub fn bits(self) -> u8 {
        match self {
            ButtonCode::None => 0,
            ButtonCode::Left => BUTTON_LEFT,
            ButtonCode::Center => BUTTON_CENTER,
            ButtonCode::Right => BUTTON_RIGHT,
            ButtonCode::Chord(bits) => bits & BUTTON_MASK,
        }
    }

    /// True when at least one button is held
    pub fn is_pressed(self) -> bool {
        self != ButtonCode::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_buttons() {
        assert_eq!(ButtonCode::from_bits(0), ButtonCode::None);
        assert_eq!(ButtonCode::from_bits(1), ButtonCode::Left);
        assert_eq!(ButtonCode::from_bits(2), ButtonCode::Center);
        assert_eq!(ButtonCode::from_bits(4), ButtonCode::Right);
    }

    #[test]
    fn test_chords_stay_distinct() {
        assert_eq!(ButtonCode::from_bits(3), ButtonCode::Chord(3));
        assert_eq!(ButtonCode::from_bits(5), ButtonCode::Chord(5));
        assert_eq!(ButtonCode::from_bits(7), ButtonCode::Chord(7));
    }

    #[test]
    fn test_high_bits_masked() {
        assert_eq!(ButtonCode::from_bits(0xF0), ButtonCode::None);
        assert_eq!(ButtonCode::from_bits(0x81), ButtonCode::Left);
    }

    #[test]
    fn test_is_pressed() {
        assert!(!ButtonCode::None.is_pressed());
        assert!(ButtonCode::Right.is_pressed());
        assert!(ButtonCode::Chord(6).is_pressed());
    }

    #[test]
    fn test_bits_match_wire_values() {
        for bits in 0..8u8 {
            assert_eq!(ButtonCode::from_bits(bits).bits(), bits);
        }
    }
}
