//! Radio handle that forwards advertising data to the BLE host task

use core::future::Future;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use crate::advertising::AdvertisingSet;
use crate::config::advertising::PDU_CAPACITY;
use crate::radio::traits::{AdvertisingRadio, RadioError};

/// Hand-over between [`ChannelRadio`] and the BLE host task
pub struct AdvertisingSignals<M: RawMutex> {
    /// Advertising set handed to the BLE host task
    request: Signal<M, AdvertisingSet>,
    /// Outcome of the start request, reported by the BLE host task
    status: Signal<M, Result<(), RadioError>>,
}

impl<M: RawMutex> AdvertisingSignals<M> {
    pub const fn new() -> Self {
        Self {
            request: Signal::new(),
            status: Signal::new(),
        }
    }

    /// Wait for the controller to hand over an advertising set
    pub async fn wait_request(&self) -> AdvertisingSet {
        self.request.wait().await
    }

    /// Report the outcome of a start request
    pub fn report(&self, result: Result<(), RadioError>) {
        self.status.signal(result);
    }

    /// Drive the BLE host until it stops.
    ///
    /// The host never stops while healthy, so any return fails the pending
    /// (or next) start request instead of leaving it waiting forever.
    pub async fn supervise_host<E>(&self, host: impl Future<Output = Result<(), E>>) {
        match host.await {
            Ok(()) => log::error!("BLE host runner stopped"),
            Err(_) => log::error!("BLE host runner failed"),
        }
        self.report(Err(RadioError::StackError));
    }
}

impl<M: RawMutex> Default for AdvertisingSignals<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`AdvertisingRadio`] backed by [`AdvertisingSignals`]
pub struct ChannelRadio<'a, M: RawMutex> {
    signals: &'a AdvertisingSignals<M>,
    configured: Option<AdvertisingSet>,
}

impl<'a, M: RawMutex> ChannelRadio<'a, M> {
    pub fn new(signals: &'a AdvertisingSignals<M>) -> Self {
        Self {
            signals,
            configured: None,
        }
    }
}

impl<M: RawMutex> AdvertisingRadio for ChannelRadio<'_, M> {
    async fn configure(&mut self, set: &AdvertisingSet) -> Result<(), RadioError> {
        if set.primary.len() > PDU_CAPACITY || set.scan_response.len() > PDU_CAPACITY {
            return Err(RadioError::InvalidConfig);
        }
        self.configured = Some(*set);
        Ok(())
    }

    async fn start(&mut self) -> Result<(), RadioError> {
        let set = self.configured.take().ok_or(RadioError::NotConfigured)?;
        self.signals.request.signal(set);
        self.signals.status.wait().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advertising::AdvertisementComposer;
    use crate::coordinate::{latin1, CoordinateValidator};
    use crate::payload::PayloadSplitter;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn advertising_set() -> AdvertisingSet {
        let coordinate = CoordinateValidator::new()
            .validate(&latin1("59°24'40.5\"N, 24°44'31.3\"E"))
            .unwrap();
        let payload = PayloadSplitter::new().split(&coordinate).unwrap();
        AdvertisementComposer::default().compose(&payload).unwrap()
    }

    #[test]
    fn test_start_hands_over_set_and_returns_status() {
        let signals = AdvertisingSignals::<NoopRawMutex>::new();
        let mut radio = ChannelRadio::new(&signals);
        let set = advertising_set();

        futures::executor::block_on(async {
            radio.configure(&set).await.unwrap();
            signals.report(Ok(()));

            assert_eq!(radio.start().await, Ok(()));
            assert_eq!(signals.request.try_take(), Some(set));
        });
    }

    #[test]
    fn test_start_without_configure() {
        let signals = AdvertisingSignals::<NoopRawMutex>::new();
        let mut radio = ChannelRadio::new(&signals);

        futures::executor::block_on(async {
            assert_eq!(radio.start().await, Err(RadioError::NotConfigured));
            assert!(!signals.request.signaled());
        });
    }

    #[test]
    fn test_failed_host_fails_start() {
        let signals = AdvertisingSignals::<NoopRawMutex>::new();
        let mut radio = ChannelRadio::new(&signals);

        futures::executor::block_on(async {
            signals.supervise_host(async { Err::<(), ()>(()) }).await;

            radio.configure(&advertising_set()).await.unwrap();
            assert_eq!(radio.start().await, Err(RadioError::StackError));
        });
    }

    #[test]
    fn test_stopped_host_fails_start() {
        let signals = AdvertisingSignals::<NoopRawMutex>::new();
        let mut radio = ChannelRadio::new(&signals);

        futures::executor::block_on(async {
            signals.supervise_host(async { Ok::<(), ()>(()) }).await;

            radio.configure(&advertising_set()).await.unwrap();
            assert_eq!(radio.start().await, Err(RadioError::StackError));
        });
    }
}
