//! Encoded advertising records and their parameters

use crate::config::advertising::{INTERVAL_MS, INTERVAL_UNIT_US, PDU_CAPACITY};

/// Advertising PDU type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvertisingType {
    /// Not connectable, but answers scan requests with the scan response
    NonconnectableScannableUndirected,
}

/// Which scanners may receive the advertisement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Any scanner, no allow list
    Any,
}

/// How the radio should advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvertisingParameters {
    pub advertising_type: AdvertisingType,
    pub filter_policy: FilterPolicy,
    pub interval_ms: u32,
    /// `None` advertises until reset
    pub duration_ms: Option<u32>,
}

impl AdvertisingParameters {
    /// Interval in 0.625 ms units
    pub const fn interval_units(&self) -> u32 {
        self.interval_ms * 1000 / INTERVAL_UNIT_US
    }
}

impl Default for AdvertisingParameters {
    fn default() -> Self {
        Self {
            advertising_type: AdvertisingType::NonconnectableScannableUndirected,
            filter_policy: FilterPolicy::Any,
            interval_ms: INTERVAL_MS,
            duration_ms: None,
        }
    }
}

/// One encoded record, never longer than a legacy advertising PDU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvertisingRecord {
    buf: [u8; PDU_CAPACITY],
    len: usize,
}

impl AdvertisingRecord {
    pub(crate) fn new(buf: [u8; PDU_CAPACITY], len: usize) -> Self {
        Self { buf, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Everything the radio needs for one advertising cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvertisingSet {
    pub primary: AdvertisingRecord,
    pub scan_response: AdvertisingRecord,
    pub parameters: AdvertisingParameters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_units() {
        let params = AdvertisingParameters::default();
        assert_eq!(params.interval_units(), 160);
        assert_eq!(params.duration_ms, None);
        assert_eq!(
            params.advertising_type,
            AdvertisingType::NonconnectableScannableUndirected
        );
    }
}
