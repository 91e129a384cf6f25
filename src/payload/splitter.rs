//! Coordinate payload splitter
//!
//! The primary record carries the first [`PRIMARY_FRAGMENT_LEN`] coordinate
//! bytes. The scan response carries the rest followed by a zero terminator so
//! the receiver can tell where the string ends:
//!
//! ```text
//! coordinate:  [b0 .. b23][b24 .. bL-1]
//! primary:     [b0 .. b23]
//! scan resp:              [b24 .. bL-1][0x00]
//! ```
//!
//! so `primary.len() + secondary.len() - 1 == L`.

use crate::config::advertising::PRIMARY_FRAGMENT_LEN;
use crate::coordinate::Coordinate;
use crate::error::BeaconError;
use crate::payload::fragment::PayloadFragment;

/// End-of-string marker appended to the scan response fragment
pub const TERMINATOR: u8 = 0x00;

/// Coordinate bytes split across the two records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPayload {
    /// Carried by the primary advertising record
    pub primary: PayloadFragment,
    /// Carried by the scan response, terminator included
    pub secondary: PayloadFragment,
}

/// Splits coordinate strings into two fragments
pub struct PayloadSplitter {
    primary_len: usize,
}

impl PayloadSplitter {
    /// Create a splitter using the configured primary fragment length
    pub fn new() -> Self {
        Self {
            primary_len: PRIMARY_FRAGMENT_LEN,
        }
    }

    /// Split an accepted coordinate
    pub fn split(&self, coordinate: &Coordinate) -> Result<SplitPayload, BeaconError> {
        self.split_bytes(coordinate.as_bytes())
    }

    /// Split an arbitrary byte string.
    ///
    /// Fails with [`BeaconError::SplitUnderflow`] when the string is shorter
    /// than the primary fragment, the remainder length would be negative.
    pub fn split_bytes(&self, bytes: &[u8]) -> Result<SplitPayload, BeaconError> {
        let len = bytes.len();
        if len < self.primary_len {
            return Err(BeaconError::SplitUnderflow { len });
        }

        let (head, tail) = bytes.split_at(self.primary_len);
        let primary = PayloadFragment::from_slice(head)?;
        let mut secondary = PayloadFragment::from_slice(tail)?;
        secondary.push(TERMINATOR)?;

        log::debug!(
            "Split {} bytes into {} + {} (terminated)",
            len,
            primary.len(),
            secondary.len()
        );

        Ok(SplitPayload { primary, secondary })
    }
}

impl Default for PayloadSplitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::{latin1, CoordinateValidator};

    fn accepted(text: &str) -> Coordinate {
        CoordinateValidator::new()
            .validate(&latin1(text))
            .expect("Should accept")
    }

    /// Rebuild the coordinate bytes, dropping the trailing terminator
    fn reassemble(split: &SplitPayload) -> heapless::Vec<u8, 64> {
        let secondary = split.secondary.as_bytes();
        let mut out = heapless::Vec::new();
        out.extend_from_slice(split.primary.as_bytes()).unwrap();
        out.extend_from_slice(&secondary[..secondary.len() - 1]).unwrap();
        out
    }

    #[test]
    fn test_split_three_digit_sizes() {
        let coordinate = accepted("59°24'40.5\"N, 124°44'31.3\"E");
        let split = PayloadSplitter::new().split(&coordinate).unwrap();

        assert_eq!(split.primary.len(), 24);
        assert_eq!(split.secondary.len(), 4);
        assert_eq!(split.secondary.as_bytes(), b"3\"E\0");
    }

    #[test]
    fn test_split_two_digit_sizes() {
        let coordinate = accepted("59°24'40.5\"N, 24°44'31.3\"E");
        let split = PayloadSplitter::new().split(&coordinate).unwrap();

        assert_eq!(split.primary.len(), 24);
        assert_eq!(split.secondary.as_bytes(), b"\"E\0");
        assert_eq!(split.primary.as_bytes(), &coordinate.as_bytes()[..24]);
    }

    #[test]
    fn test_split_reassembles() {
        for text in ["59°24'40.5\"N, 24°44'31.3\"E", "01°02'03.4\"S, 179°59'59.9\"W"] {
            let coordinate = accepted(text);
            let split = PayloadSplitter::new().split(&coordinate).unwrap();

            assert_eq!(split.primary.len() + split.secondary.len() - 1, coordinate.len());
            assert_eq!(reassemble(&split).as_slice(), coordinate.as_bytes());
        }
    }

    #[test]
    fn test_split_exact_primary_length() {
        let split = PayloadSplitter::new().split_bytes(&[b'x'; 24]).unwrap();
        assert_eq!(split.primary.len(), 24);
        assert_eq!(split.secondary.as_bytes(), &[TERMINATOR]);
    }

    #[test]
    fn test_split_short_input_fails_closed() {
        let splitter = PayloadSplitter::new();
        assert_eq!(
            splitter.split_bytes(&[b'x'; 23]),
            Err(BeaconError::SplitUnderflow { len: 23 })
        );
        assert_eq!(splitter.split_bytes(&[]), Err(BeaconError::SplitUnderflow { len: 0 }));
    }

    #[test]
    fn test_split_oversized_tail_rejected() {
        // 24 + 31 tail bytes leaves no room for the terminator
        let bytes = [b'x'; 55];
        let result = PayloadSplitter::new().split_bytes(&bytes);
        assert!(matches!(result, Err(BeaconError::EncodingOverflow { .. })));
    }
}
