//! Advertising radio trait for abstraction and testability
//!
//! This trait defines the interface for configuring and starting
//! advertising, allowing the BLE stack to be swapped with a mock for testing.

use crate::advertising::AdvertisingSet;
use core::future::Future;

/// Errors reported by the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// Advertising data or parameters rejected
    InvalidConfig,
    /// Start requested before a successful configure
    NotConfigured,
    /// The BLE host stack reported a failure
    StackError,
}

/// Abstract advertising radio interface
pub trait AdvertisingRadio {
    /// Hand the encoded records and parameters to the radio
    fn configure(&mut self, set: &AdvertisingSet) -> impl Future<Output = Result<(), RadioError>>;

    /// Start advertising the configured set
    ///
    /// Advertising continues until reset; there is no stop.
    fn start(&mut self) -> impl Future<Output = Result<(), RadioError>>;
}
