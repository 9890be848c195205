//! Frame encoding and decoding for the panel link.
//!
//! Frame format:
//! - SYNC (2 bytes): 0xAA 0x55
//! - TYPE (1 byte): message type identifier
//! - LENGTH (1 byte): payload length (0-32)
//! - PAYLOAD (0-32 bytes): type-specific data
//! - CHECKSUM (1 byte): two's complement of the sum of TYPE, LENGTH and PAYLOAD

use heapless::Vec;

/// Frame synchronization bytes
pub const SYNC: [u8; 2] = [0xAA, 0x55];

/// Maximum payload size in bytes
///
/// Large enough for a text command carrying a full 16-column line.
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// Maximum complete frame size (SYNC + TYPE + LENGTH + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 2 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Invalid frame structure or payload contents
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Well-formed frame with a type this side does not understand
    UnknownType(u8),
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    fn checksum(msg_type: u8, length: u8, payload: &[u8]) -> u8 {
        let sum = payload
            .iter()
            .fold(msg_type.wrapping_add(length), |acc, &b| acc.wrapping_add(b));
        0u8.wrapping_sub(sum)
    }

    /// Total encoded length of this frame in bytes
    pub fn encoded_len(&self) -> usize {
        SYNC.len() + 2 + self.payload.len() + 1
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        let body_end = 4 + self.payload.len();

        buffer[..2].copy_from_slice(&SYNC);
        buffer[2] = self.msg_type;
        buffer[3] = length;
        buffer[4..body_end].copy_from_slice(&self.payload);
        buffer[body_end] = Self::checksum(self.msg_type, length, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Hunting for the first sync byte
    Sync0,
    /// Got 0xAA, expecting 0x55
    Sync1,
    Type,
    Length,
    Payload,
    Checksum,
}

/// Byte-fed frame decoder
///
/// Garbage between frames is skipped; a corrupt frame is reported once and
/// the parser goes back to hunting for the sync pattern.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    msg_type: u8,
    expected_length: u8,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync0,
            msg_type: 0,
            expected_length: 0,
            buffer: Vec::new(),
        }
    }

    /// Drop any partial frame and wait for the next sync pattern
    pub fn reset(&mut self) {
        self.state = ParseState::Sync0;
        self.msg_type = 0;
        self.expected_length = 0;
        self.buffer.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a corrupt frame.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync0 => {
                if byte == SYNC[0] {
                    self.state = ParseState::Sync1;
                }
            }
            ParseState::Sync1 => {
                self.state = match byte {
                    b if b == SYNC[1] => ParseState::Type,
                    // 0xAA 0xAA 0x55: the second 0xAA may be the real start
                    b if b == SYNC[0] => ParseState::Sync1,
                    _ => ParseState::Sync0,
                };
            }
            ParseState::Type => {
                self.msg_type = byte;
                self.state = ParseState::Length;
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.expected_length = byte;
                self.buffer.clear();
                self.state = if byte == 0 {
                    ParseState::Checksum
                } else {
                    ParseState::Payload
                };
            }
            ParseState::Payload => {
                // Length was bounded above, so this cannot overflow
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::Checksum;
                }
            }
            ParseState::Checksum => {
                let expected = Frame::checksum(self.msg_type, self.expected_length, &self.buffer);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: self.buffer.clone(),
                };
                self.reset();
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any. Bytes after that
    /// frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_empty_frame() {
        let frame = Frame::empty(0x0C);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 5);
        assert_eq!(&buffer[..4], &[0xAA, 0x55, 0x0C, 0x00]);
        assert_eq!(buffer[4], 0xF4); // 0x100 - 0x0C
    }

    #[test]
    fn test_checksum_zeroes_byte_sum() {
        let frame = Frame::new(0x1E, &[1, 0, b'H', b'i']).unwrap();
        let encoded = frame.encode_to_vec().unwrap();
        let sum = encoded[2..]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_add(b));
        assert_eq!(sum, 0);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x1E, &[0, 0, b'A']).unwrap();
        let mut buffer = [0u8; 4];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_payload_too_large() {
        let large = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x1E, &large), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_parse_encoded_frame() {
        let original = Frame::new(0x16, &[0x04]).unwrap();
        let encoded = original.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded).unwrap(), Some(original));
    }

    #[test]
    fn test_bad_checksum_reported_then_recovers() {
        let frame = Frame::new(0x16, &[0x01]).unwrap();
        let mut corrupt = frame.encode_to_vec().unwrap();
        let last = corrupt.len() - 1;
        corrupt[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&corrupt), Err(FrameError::InvalidChecksum));

        let good = frame.encode_to_vec().unwrap();
        assert_eq!(parser.feed_bytes(&good).unwrap(), Some(frame));
    }

    #[test]
    fn test_oversize_length_rejected() {
        let mut parser = FrameParser::new();
        let bytes = [0xAA, 0x55, 0x1E, (MAX_PAYLOAD_SIZE + 1) as u8];
        assert_eq!(parser.feed_bytes(&bytes), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_repeated_sync_byte() {
        let frame = Frame::empty(0x17);
        let encoded = frame.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(0xAA), Ok(None));
        assert_eq!(parser.feed_bytes(&encoded).unwrap(), Some(frame));
    }

    proptest! {
        #[test]
        fn parser_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut parser = FrameParser::new();
            for byte in bytes {
                let _ = parser.feed(byte);
            }
        }

        #[test]
        fn parser_skips_leading_garbage(
            garbage in proptest::collection::vec(any::<u8>().prop_filter("no sync", |b| *b != 0xAA), 0..64),
            bits in 0u8..8,
        ) {
            let frame = Frame::new(0x16, &[bits]).unwrap();
            let encoded = frame.encode_to_vec().unwrap();

            let mut parser = FrameParser::new();
            prop_assert_eq!(parser.feed_bytes(&garbage), Ok(None));
            prop_assert_eq!(parser.feed_bytes(&encoded), Ok(Some(frame)));
        }
    }
}
