//! BLE host task
//!
//! Owns the TrouBLE host stack. Waits for the controller to hand over an
//! advertising set, starts non-connectable scannable advertising with it and
//! keeps the advertiser alive for the rest of the run.

use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;
use trouble_host::prelude::*;

use crate::advertising::AdvertisingSet;
use crate::radio::{AdvertisingSignals, RadioError};

/// Number of maximum concurrent connections
const CONNECTIONS_MAX: usize = 1;
/// Number of L2CAP channels
const L2CAP_CHANNELS_MAX: usize = 1;

/// Main BLE task that manages the Bluetooth stack and advertising
///
/// This task:
/// 1. Builds the host stack with an address derived from the device ID
/// 2. Waits for an advertising set from [`ChannelRadio`](crate::radio::ChannelRadio)
/// 3. Advertises it and reports the result back
///
/// If the host runner stops, start requests fail with [`RadioError::StackError`].
pub async fn ble_task<C: Controller, M: RawMutex>(
    controller: C,
    device_id: [u8; 3],
    signals: &AdvertisingSignals<M>,
) {
    let mut resources: HostResources<DefaultPacketPool, CONNECTIONS_MAX, L2CAP_CHANNELS_MAX> =
        HostResources::new();

    let stack = trouble_host::new(controller, &mut resources).set_random_address(Address::random([
        device_id[0],
        device_id[1],
        device_id[2],
        0x1E,
        0x83,
        0xE7,
    ]));

    let Host {
        mut peripheral,
        mut runner,
        ..
    } = stack.build();

    let runner_task = signals.supervise_host(runner.run());

    let advertising_task = async {
        let set = signals.wait_request().await;
        let params = advertisement_parameters(&set);

        let advertiser = peripheral
            .advertise(
                &params,
                Advertisement::NonconnectableScannableUndirected {
                    adv_data: set.primary.as_bytes(),
                    scan_data: set.scan_response.as_bytes(),
                },
            )
            .await;

        match advertiser {
            Ok(_advertiser) => {
                log::info!(
                    "BLE: Advertising every {} ms",
                    set.parameters.interval_ms
                );
                signals.report(Ok(()));
                // Dropping the advertiser would end advertising
                core::future::pending::<()>().await;
            }
            Err(_) => {
                log::error!("BLE: Advertising start rejected by host");
                signals.report(Err(RadioError::StackError));
            }
        }
    };

    select(runner_task, advertising_task).await;
}

fn advertisement_parameters(set: &AdvertisingSet) -> AdvertisementParameters {
    let interval = Duration::from_millis(u64::from(set.parameters.interval_ms));
    let mut params = AdvertisementParameters::default();
    params.interval_min = interval;
    params.interval_max = interval;
    params
}
