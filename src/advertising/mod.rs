//! Advertising data for the coordinate beacon
//!
//! Builds the primary advertising record and the scan response from the
//! beacon identity and the split coordinate payload. Field encoding is
//! trouble-host's [`AdStructure`](trouble_host::prelude::AdStructure).

pub mod composer;
pub mod identity;
pub mod types;

pub use composer::AdvertisementComposer;
pub use identity::BeaconIdentity;
pub use types::{AdvertisingParameters, AdvertisingRecord, AdvertisingSet, AdvertisingType, FilterPolicy};
