//! Message types for the panel link
//!
//! - Controller → panel: text, backlight and clear commands
//! - Panel → controller: button reports and the boot announcement

use heapless::Vec;

use crate::buttons::ButtonCode;
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: controller → panel
pub const MSG_TEXT: u8 = 0x1E;
pub const MSG_BACKLIGHT: u8 = 0x0A;
pub const MSG_CLEAR: u8 = 0x0C;

// Message type IDs: panel → controller
pub const MSG_BUTTONS: u8 = 0x16;
pub const MSG_READY: u8 = 0x17;

/// Panel dimensions in characters
pub const PANEL_ROWS: u8 = 2;
pub const PANEL_COLS: u8 = 16;

/// Messages from the controller to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage<'a> {
    /// Write text starting at a cell; the rest of the row is untouched
    Text { row: u8, col: u8, text: &'a str },
    /// Switch the backlight on or off
    Backlight(bool),
    /// Blank both rows
    Clear,
}

impl<'a> HostMessage<'a> {
    /// Encode this message into a frame
    ///
    /// Text past the right edge of the panel is dropped. Rows or columns
    /// outside the panel are rejected.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            HostMessage::Text { row, col, text } => {
                if *row >= PANEL_ROWS || *col >= PANEL_COLS {
                    return Err(FrameError::InvalidFrame);
                }
                let room = (PANEL_COLS - col) as usize;
                let bytes = text.as_bytes();
                let len = bytes.len().min(room);

                // Payload: [row][col][chars...]
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .extend_from_slice(&[*row, *col])
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(&bytes[..len])
                    .map_err(|_| FrameError::PayloadTooLarge)?;

                Frame::new(MSG_TEXT, &payload)
            }
            HostMessage::Backlight(on) => Frame::new(MSG_BACKLIGHT, &[*on as u8]),
            HostMessage::Clear => Ok(Frame::empty(MSG_CLEAR)),
        }
    }
}

/// Reports parsed from panel-originated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelReport {
    /// Buttons currently held
    Buttons(ButtonCode),
    /// Panel finished booting and has a blank screen
    Ready,
}

impl PanelReport {
    /// Parse a report from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_BUTTONS => {
                let bits = frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                Ok(PanelReport::Buttons(ButtonCode::from_bits(*bits)))
            }
            MSG_READY => Ok(PanelReport::Ready),
            other => Err(FrameError::UnknownType(other)),
        }
    }

    /// Encode this report into a frame (panel side, or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            PanelReport::Buttons(code) => Frame::new(MSG_BUTTONS, &[code.bits()]),
            PanelReport::Ready => Ok(Frame::empty(MSG_READY)),
        }
    }
}
