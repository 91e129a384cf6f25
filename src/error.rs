//! Errors raised between input acceptance and advertising

use core::fmt;

use crate::coordinate::GrammarRejected;
use crate::radio::RadioError;

/// Failure of one input-to-advertising cycle.
///
/// Only [`BeaconError::GrammarRejected`] is recovered from (the operator is
/// prompted again). Everything after acceptance is fatal to the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeaconError {
    /// Input did not match the coordinate format
    GrammarRejected { position: usize },
    /// Payload shorter than the primary fragment
    SplitUnderflow { len: usize },
    /// Encoded record or fragment exceeds the available space
    EncodingOverflow { required: usize, capacity: usize },
    /// The radio refused the advertising configuration
    RadioConfigurationFailed(RadioError),
    /// The radio failed to start advertising
    RadioStartFailed(RadioError),
}

impl From<GrammarRejected> for BeaconError {
    fn from(err: GrammarRejected) -> Self {
        BeaconError::GrammarRejected {
            position: err.position,
        }
    }
}

impl fmt::Display for BeaconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeaconError::GrammarRejected { position } => {
                write!(f, "coordinate format mismatch at position {}", position)
            }
            BeaconError::SplitUnderflow { len } => {
                write!(f, "payload of {} bytes too short to split", len)
            }
            BeaconError::EncodingOverflow { required, capacity } => {
                write!(f, "advertising data needs {} bytes, {} available", required, capacity)
            }
            BeaconError::RadioConfigurationFailed(e) => {
                write!(f, "advertising configuration failed: {:?}", e)
            }
            BeaconError::RadioStartFailed(e) => write!(f, "advertising start failed: {:?}", e),
        }
    }
}
