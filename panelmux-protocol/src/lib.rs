//! Serial LCD panel link protocol
//!
//! The panel is a two-line, sixteen-column character LCD with a backlight
//! and three push buttons, attached to the controller over a UART. It is a
//! dumb terminal: it draws whatever text it is sent and reports which
//! buttons are held. Every decision about what to show lives on the
//! controller.
//!
//! # Frame format
//!
//! ```text
//! ┌──────┬──────┬──────┬────────┬─────────────┬──────────┐
//! │ 0xAA │ 0x55 │ TYPE │ LENGTH │ PAYLOAD     │ CHECKSUM │
//! │ 1B   │ 1B   │ 1B   │ 1B     │ 0–32B       │ 1B       │
//! └──────┴──────┴──────┴────────┴─────────────┴──────────┘
//! ```
//!
//! The checksum makes the byte sum of TYPE, LENGTH, PAYLOAD and CHECKSUM
//! zero (mod 256).

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod frame;
pub mod messages;

pub use buttons::ButtonCode;
pub use frame::{Frame, FrameError, FrameParser, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, SYNC};
pub use messages::{HostMessage, PanelReport, PANEL_COLS, PANEL_ROWS};
