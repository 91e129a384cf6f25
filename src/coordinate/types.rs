//! Raw and validated coordinate buffers

use core::fmt;

use crate::config::coordinate::MAX_LEN;
use heapless::Vec;

/// Bytes collected from the operator for one input attempt.
///
/// Holds at most [`MAX_LEN`] bytes. The degree sign is a single byte
/// (Latin-1 `0xB0`) so that the grammar positions line up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    buf: Vec<u8, MAX_LEN>,
}

impl RawInput {
    /// Create an empty input buffer
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append a byte, handing it back if the buffer is full
    pub fn push(&mut self, byte: u8) -> Result<(), u8> {
        self.buf.push(byte)
    }

    /// Build an input from a byte slice, `None` if it exceeds [`MAX_LEN`]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        Vec::from_slice(bytes).ok().map(|buf| Self { buf })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buf.is_full()
    }
}

/// Number of longitude degree digits in an accepted coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongitudeLayout {
    /// `DD°MM'SS.S"E/W`, 26 characters in total
    TwoDigit,
    /// `DDD°MM'SS.S"E/W`, 27 characters in total
    ThreeDigit,
}

impl LongitudeLayout {
    /// Offset of the longitude markers relative to the two-digit layout
    pub const fn shift(self) -> usize {
        match self {
            LongitudeLayout::TwoDigit => 0,
            LongitudeLayout::ThreeDigit => 1,
        }
    }

    /// Length of a coordinate in this layout, ending at the E/W letter
    pub const fn coordinate_len(self) -> usize {
        26 + self.shift()
    }
}

/// A coordinate string that passed the format check.
///
/// Can only be produced by [`CoordinateValidator`](super::CoordinateValidator).
/// The stored bytes end at the E/W letter; anything typed after it is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    bytes: Vec<u8, MAX_LEN>,
    layout: LongitudeLayout,
}

impl Coordinate {
    pub(crate) fn new(bytes: Vec<u8, MAX_LEN>, layout: LongitudeLayout) -> Self {
        Self { bytes, layout }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn layout(&self) -> LongitudeLayout {
        self.layout
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        // Stored bytes are Latin-1, which maps one-to-one onto chars
        for &byte in self.bytes.iter() {
            f.write_char(char::from(byte))?;
        }
        Ok(())
    }
}
