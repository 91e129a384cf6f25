//! Controller task

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::advertising::BeaconIdentity;
use crate::controller::Controller;
use crate::platform::Platform;
use crate::radio::{AdvertisingSignals, ChannelRadio};
use crate::serial::SerialPort;

/// Run the coordinate prompt and advertising cycle, handing the records to
/// the BLE host task through `signals`
pub async fn controller_task<S, P, M>(serial: S, platform: P, signals: &AdvertisingSignals<M>) -> !
where
    S: SerialPort,
    P: Platform,
    M: RawMutex,
{
    let controller = Controller::new(
        serial,
        ChannelRadio::new(signals),
        platform,
        BeaconIdentity::configured(),
    );
    controller.run().await
}
