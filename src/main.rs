#![no_std]
#![no_main]

extern crate alloc;

// Required for ESP-IDF bootloader compatibility
// Use explicit parameters to ensure correct efuse block revision values
esp_bootloader_esp_idf::esp_app_desc!(
    env!("CARGO_PKG_VERSION"),  // version
    env!("CARGO_PKG_NAME"),     // project_name
    "00:00:00",                 // build_time
    "2025-01-01",               // build_date
    "0.0.0",                    // idf_ver (not using IDF)
    0x10000,                    // mmu_page_size (64KB)
    0,                          // min_efuse_blk_rev_full (accept all)
    u16::MAX                    // max_efuse_blk_rev_full (accept all)
);

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use esp_backtrace as _;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::timer::timg::TimerGroup;
use esp_hal::usb_serial_jtag::{UsbSerialJtag, UsbSerialJtagRx, UsbSerialJtagTx};
use esp_hal::Async;
use static_cell::StaticCell;

use geo_beacon_firmware::platform::Platform;
use geo_beacon_firmware::radio::AdvertisingSignals;
use geo_beacon_firmware::serial::io::IoSerialPort;
use geo_beacon_firmware::tasks;

/// Idle period once the controller has nothing left to do
const IDLE_INTERVAL_MS: u64 = 1000;

/// Static executor for embassy
static EXECUTOR: StaticCell<esp_rtos::embassy::Executor> = StaticCell::new();

/// Hand-over between the controller and the BLE host task
static ADVERTISING: AdvertisingSignals<CriticalSectionRawMutex> = AdvertisingSignals::new();

/// Static cell for esp-radio controller (needed for 'static lifetime)
static RADIO_CONTROLLER: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

/// Type alias for the BLE controller
type BleController = trouble_host::prelude::ExternalController<
    esp_radio::ble::controller::BleConnector<'static>,
    10,
>;

/// Serial port over the USB Serial JTAG halves
type UsbSerialPort = IoSerialPort<UsbSerialJtagRx<'static, Async>, UsbSerialJtagTx<'static, Async>>;

/// Board services: the status LED and a timer-based idle
struct EspPlatform {
    led: Output<'static>,
}

impl Platform for EspPlatform {
    fn indicate_advertising(&mut self) {
        // Active low
        self.led.set_low();
    }

    async fn idle(&mut self) {
        embassy_time::Timer::after(embassy_time::Duration::from_millis(IDLE_INTERVAL_MS)).await;
    }
}

#[esp_hal::main]
fn main() -> ! {
    // Initialise heap allocator for BLE support (64KB - BLE requires significant heap)
    esp_alloc::heap_allocator!(size: 64 * 1024);

    esp_println::logger::init_logger_from_env();

    let peripherals = esp_hal::init(esp_hal::Config::default());

    // LED off until advertising (active low)
    let led = Output::new(peripherals.GPIO48, Level::High, OutputConfig::default());

    // Initialise the RTOS scheduler with timer - MUST be done before any async operations
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Configure USB Serial JTAG for operator input
    let usb_serial = UsbSerialJtag::new(peripherals.USB_DEVICE).into_async();
    let (usb_rx, usb_tx) = usb_serial.split();
    let serial = IoSerialPort::new(usb_rx, usb_tx);

    // Read unique device ID from eFuse MAC address (last 3 bytes)
    let mac = esp_hal::efuse::Efuse::read_base_mac_address();
    let device_id: [u8; 3] = [mac[3], mac[4], mac[5]];

    // Initialise esp-radio for BLE support (must be after esp_rtos::start)
    let radio_controller = RADIO_CONTROLLER.init(
        esp_radio::init().expect("Failed to initialize esp-radio")
    );

    // Create BLE connector (ownership is passed to ExternalController)
    let ble_connector = esp_radio::ble::controller::BleConnector::new(
        radio_controller,
        peripherals.BT,
        esp_radio::ble::Config::default(),
    ).expect("Failed to initialize BLE connector");

    // Wrap in ExternalController for trouble-host compatibility
    let ble_controller: BleController = trouble_host::prelude::ExternalController::new(ble_connector);

    log::info!("Board initialised, device id {:02x?}", device_id);

    // Create and run the embassy executor
    let executor = EXECUTOR.init(esp_rtos::embassy::Executor::new());
    executor.run(|spawner| {
        spawner.must_spawn(async_main(spawner, serial, led, ble_controller, device_id));
    })
}

#[embassy_executor::task]
async fn async_main(
    spawner: Spawner,
    serial: UsbSerialPort,
    led: Output<'static>,
    ble_controller: BleController,
    device_id: [u8; 3],
) {
    spawner.must_spawn(ble_host_task(ble_controller, device_id));
    spawner.must_spawn(controller_task(serial, led));
}

/// Task that runs the coordinate prompt and advertising cycle
#[embassy_executor::task]
async fn controller_task(serial: UsbSerialPort, led: Output<'static>) {
    tasks::controller_task(serial, EspPlatform { led }, &ADVERTISING).await
}

/// Task that owns the BLE host stack and the advertiser
#[embassy_executor::task]
async fn ble_host_task(controller: BleController, device_id: [u8; 3]) {
    tasks::ble_task(controller, device_id, &ADVERTISING).await;
}
