//! Advertisement composer
//!
//! Primary record:
//! ```text
//! [Flags: BR/EDR not supported][Manufacturer data: company id LE, fragment A]
//! ```
//! Scan response:
//! ```text
//! [Complete local name][Manufacturer data: company id LE, fragment B]
//! ```

use trouble_host::prelude::{AdStructure, BR_EDR_NOT_SUPPORTED};

use crate::advertising::identity::BeaconIdentity;
use crate::advertising::types::{AdvertisingParameters, AdvertisingRecord, AdvertisingSet};
use crate::config::advertising::PDU_CAPACITY;
use crate::error::BeaconError;
use crate::payload::{PayloadFragment, SplitPayload};

/// Builds the two advertising records for a split coordinate
pub struct AdvertisementComposer {
    identity: BeaconIdentity,
    parameters: AdvertisingParameters,
}

impl AdvertisementComposer {
    /// Create a composer for the given identity with default parameters
    pub fn new(identity: BeaconIdentity) -> Self {
        Self {
            identity,
            parameters: AdvertisingParameters::default(),
        }
    }

    pub fn identity(&self) -> &BeaconIdentity {
        &self.identity
    }

    /// Compose both records from a split payload
    pub fn compose(&self, payload: &SplitPayload) -> Result<AdvertisingSet, BeaconError> {
        self.compose_fragments(&payload.primary, &payload.secondary)
    }

    /// Compose both records from two fragments.
    ///
    /// Fails with [`BeaconError::EncodingOverflow`] if either record would
    /// exceed the PDU capacity.
    pub fn compose_fragments(
        &self,
        primary: &PayloadFragment,
        secondary: &PayloadFragment,
    ) -> Result<AdvertisingSet, BeaconError> {
        let name = self.identity.device_name.as_bytes();

        let primary = encode_record(
            &[
                AdStructure::Flags(BR_EDR_NOT_SUPPORTED),
                AdStructure::ManufacturerSpecificData {
                    company_identifier: self.identity.company_identifier,
                    payload: primary.as_bytes(),
                },
            ],
            field_len(FLAGS_LEN) + field_len(COMPANY_ID_LEN + primary.len()),
        )?;

        let scan_response = encode_record(
            &[
                AdStructure::CompleteLocalName(name),
                AdStructure::ManufacturerSpecificData {
                    company_identifier: self.identity.company_identifier,
                    payload: secondary.as_bytes(),
                },
            ],
            field_len(name.len()) + field_len(COMPANY_ID_LEN + secondary.len()),
        )?;

        log::debug!(
            "Composed advertising data: primary {:02x?}, scan response {:02x?}",
            primary.as_bytes(),
            scan_response.as_bytes()
        );

        Ok(AdvertisingSet {
            primary,
            scan_response,
            parameters: self.parameters,
        })
    }
}

impl Default for AdvertisementComposer {
    fn default() -> Self {
        Self::new(BeaconIdentity::configured())
    }
}

/// Flags value
const FLAGS_LEN: usize = 1;
/// Company identifier ahead of the manufacturer payload
const COMPANY_ID_LEN: usize = 2;

/// Encoded size of one field: length byte, AD type, value
const fn field_len(value_len: usize) -> usize {
    2 + value_len
}

/// Encode `fields` into one record. `required` is the encoded size, reported
/// when the fields do not fit.
fn encode_record(fields: &[AdStructure<'_>], required: usize) -> Result<AdvertisingRecord, BeaconError> {
    let mut buf = [0u8; PDU_CAPACITY];
    let len = AdStructure::encode_slice(fields, &mut buf).map_err(|_| BeaconError::EncodingOverflow {
        required,
        capacity: PDU_CAPACITY,
    })?;
    Ok(AdvertisingRecord::new(buf, len))
}
