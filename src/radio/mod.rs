//! Advertising radio
//!
//! The controller only sees the [`AdvertisingRadio`] trait. On target the
//! trait is backed by [`channel::ChannelRadio`], which hands the configured
//! records to the BLE host task in `tasks::ble`.

pub mod channel;
pub mod traits;

pub use channel::{AdvertisingSignals, ChannelRadio};
pub use traits::{AdvertisingRadio, RadioError};
