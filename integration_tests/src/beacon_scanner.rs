//! BLE scanner that reassembles the coordinate from advertising reports.
//!
//! The advertising record and the scan response each carry manufacturer
//! specific data under the same company identifier. Hosts report them as
//! separate updates, so fragments are collected until both halves are seen:
//! the first half is always 24 bytes, the second one ends in a zero byte.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use btleplug::api::{Central, CentralEvent, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, PeripheralId};
use futures::StreamExt;

/// Company identifier the beacon advertises under
pub const COMPANY_IDENTIFIER: u16 = 0x0059;

/// Length of the fragment in the advertising record
pub const PRIMARY_FRAGMENT_LEN: usize = 24;

/// Both coordinate halves as seen on air
#[derive(Debug, Default, Clone)]
pub struct CoordinateFragments {
    pub primary: Option<Vec<u8>>,
    pub secondary: Option<Vec<u8>>,
}

impl CoordinateFragments {
    /// Sort a manufacturer data payload into the right half
    pub fn add(&mut self, payload: &[u8]) {
        if payload.last() == Some(&0) {
            self.secondary = Some(payload.to_vec());
        } else if payload.len() == PRIMARY_FRAGMENT_LEN {
            self.primary = Some(payload.to_vec());
        }
    }

    /// Reassembled coordinate text, once both halves have been seen
    pub fn coordinate(&self) -> Option<String> {
        let primary = self.primary.as_ref()?;
        let secondary = self.secondary.as_ref()?;

        // Drop the terminator; every byte is one Latin-1 character
        let bytes = primary.iter().chain(&secondary[..secondary.len() - 1]);
        Some(bytes.map(|&b| char::from(b)).collect())
    }
}

/// Scans for the beacon by name
pub struct BeaconScanner {
    adapter: Adapter,
}

impl BeaconScanner {
    /// Use the first Bluetooth adapter on the host.
    pub async fn new() -> Result<Self> {
        let manager = Manager::new().await?;
        let adapter = manager
            .adapters()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No Bluetooth adapters found"))?;
        Ok(Self { adapter })
    }

    /// Scan until the named beacon has reported both coordinate halves.
    pub async fn read_coordinate(&self, name: &str, scan_timeout: Duration) -> Result<String> {
        let mut events = self.adapter.events().await?;
        self.adapter.start_scan(ScanFilter::default()).await?;

        let start = Instant::now();
        let mut fragments: HashMap<PeripheralId, CoordinateFragments> = HashMap::new();
        let mut beacon: Option<PeripheralId> = None;

        let result = loop {
            let remaining = match scan_timeout.checked_sub(start.elapsed()) {
                Some(remaining) => remaining,
                None => break Err(anyhow!("Beacon '{}' not fully seen within timeout", name)),
            };

            let event = match tokio::time::timeout(remaining, events.next()).await {
                Ok(Some(event)) => event,
                Ok(None) => break Err(anyhow!("Adapter event stream ended")),
                Err(_) => continue,
            };

            match event {
                CentralEvent::ManufacturerDataAdvertisement {
                    id,
                    manufacturer_data,
                } => {
                    if let Some(payload) = manufacturer_data.get(&COMPANY_IDENTIFIER) {
                        fragments.entry(id).or_default().add(payload);
                    }
                }
                CentralEvent::DeviceDiscovered(id) | CentralEvent::DeviceUpdated(id) => {
                    if beacon.is_none() && self.has_name(&id, name).await? {
                        beacon = Some(id);
                    }
                }
                _ => {}
            }

            if let Some(id) = &beacon {
                if let Some(coordinate) = fragments.get(id).and_then(|f| f.coordinate()) {
                    break Ok(coordinate);
                }
            }
        };

        self.adapter.stop_scan().await?;
        result
    }

    async fn has_name(&self, id: &PeripheralId, name: &str) -> Result<bool> {
        let peripheral = self.adapter.peripheral(id).await?;
        let props = peripheral.properties().await?;
        Ok(props.and_then(|p| p.local_name).as_deref() == Some(name))
    }
}
