//! Manufacturer data fragment

use crate::config::advertising::PDU_CAPACITY;
use crate::error::BeaconError;
use heapless::Vec;

/// Bytes carried in one record's manufacturer specific block.
///
/// Capacity is a whole PDU so that oversized fragments can still be
/// represented and rejected by the composer instead of being truncated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadFragment {
    data: Vec<u8, PDU_CAPACITY>,
}

impl PayloadFragment {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Copy a slice into a fragment
    pub fn from_slice(bytes: &[u8]) -> Result<Self, BeaconError> {
        let data = Vec::from_slice(bytes).map_err(|_| BeaconError::EncodingOverflow {
            required: bytes.len(),
            capacity: PDU_CAPACITY,
        })?;
        Ok(Self { data })
    }

    /// Append one byte
    pub fn push(&mut self, byte: u8) -> Result<(), BeaconError> {
        self.data.push(byte).map_err(|_| BeaconError::EncodingOverflow {
            required: self.data.len() + 1,
            capacity: PDU_CAPACITY,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Declared size of the fragment
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
