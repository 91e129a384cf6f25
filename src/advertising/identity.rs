//! Static beacon identity

use crate::config::beacon;

/// Identity fields fixed at build time.
///
/// Only the company identifier and device name go on air; the remaining
/// fields make up the beacon information block returned by
/// [`BeaconIdentity::beacon_info`], which does not fit next to a coordinate
/// fragment in a legacy PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaconIdentity {
    pub device_name: &'static str,
    pub company_identifier: u16,
    pub device_type: u8,
    pub adv_data_length: u8,
    pub uuid: [u8; 16],
    pub major: u16,
    pub minor: u16,
    pub measured_rssi: i8,
}

impl BeaconIdentity {
    /// Identity from the build configuration
    pub const fn configured() -> Self {
        Self {
            device_name: beacon::DEVICE_NAME,
            company_identifier: beacon::COMPANY_IDENTIFIER,
            device_type: beacon::DEVICE_TYPE,
            adv_data_length: beacon::ADV_DATA_LENGTH,
            uuid: beacon::UUID,
            major: beacon::MAJOR,
            minor: beacon::MINOR,
            measured_rssi: beacon::MEASURED_RSSI,
        }
    }

    /// Beacon information block: type, length, UUID, major and minor (big
    /// endian) and measured RSSI.
    pub fn beacon_info(&self) -> [u8; beacon::INFO_LENGTH] {
        let mut info = [0u8; beacon::INFO_LENGTH];
        info[0] = self.device_type;
        info[1] = self.adv_data_length;
        info[2..18].copy_from_slice(&self.uuid);
        info[18..20].copy_from_slice(&self.major.to_be_bytes());
        info[20..22].copy_from_slice(&self.minor.to_be_bytes());
        info[22] = self.measured_rssi as u8;
        info
    }
}

impl Default for BeaconIdentity {
    fn default() -> Self {
        Self::configured()
    }
}
