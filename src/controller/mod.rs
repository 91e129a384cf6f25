//! Coordinate beacon controller
//!
//! Prompts for a coordinate over serial until one passes the format check,
//! then splits and encodes it into the two advertising records and starts the
//! radio. There is a single cycle per boot: once advertising (or after a
//! fatal error) the controller only idles.

pub mod state;

use core::fmt::Write;

use heapless::String;

use crate::advertising::{AdvertisementComposer, AdvertisingSet, BeaconIdentity};
use crate::config::coordinate::{EXAMPLE, FORMAT};
use crate::config::serial::TX_LINE_SIZE;
use crate::coordinate::{Coordinate, CoordinateValidator};
use crate::error::BeaconError;
use crate::payload::PayloadSplitter;
use crate::platform::Platform;
use crate::radio::AdvertisingRadio;
use crate::serial::{CoordinateReader, SerialPort};

pub use state::{messages, ControllerState};

/// Orchestrates input, composition and advertising
pub struct Controller<S, R, P> {
    serial: S,
    radio: R,
    platform: P,
    reader: CoordinateReader,
    validator: CoordinateValidator,
    splitter: PayloadSplitter,
    composer: AdvertisementComposer,
    state: ControllerState,
    advertising: Option<AdvertisingSet>,
}

impl<S: SerialPort, R: AdvertisingRadio, P: Platform> Controller<S, R, P> {
    /// Create a controller advertising as `identity`
    pub fn new(serial: S, radio: R, platform: P, identity: BeaconIdentity) -> Self {
        Self {
            serial,
            radio,
            platform,
            reader: CoordinateReader::new(),
            validator: CoordinateValidator::new(),
            splitter: PayloadSplitter::new(),
            composer: AdvertisementComposer::new(identity),
            state: ControllerState::AwaitingInput,
            advertising: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Records currently on air, if advertising
    pub fn advertising_set(&self) -> Option<&AdvertisingSet> {
        self.advertising.as_ref()
    }

    /// Run the single cycle, then idle forever
    pub async fn run(mut self) -> ! {
        // The outcome has already been reported to the operator
        let _ = self.run_once().await;

        loop {
            self.platform.idle().await;
        }
    }

    /// Print the banner and run the cycle, reporting a fatal error to the
    /// operator before returning it
    pub async fn run_once(&mut self) -> Result<AdvertisingSet, BeaconError> {
        log::info!(
            "Beacon info block: {:02x?}",
            self.composer.identity().beacon_info()
        );
        self.write_line("").await;
        self.write_line(messages::STARTED).await;

        let result = self.run_cycle().await;
        if let Err(err) = result {
            self.report_fatal(err).await;
        }
        result
    }

    /// Acquire a coordinate and start advertising it
    pub async fn run_cycle(&mut self) -> Result<AdvertisingSet, BeaconError> {
        let coordinate = self.acquire_coordinate().await;
        self.advertise(&coordinate).await
    }

    /// Prompt until the operator enters a well-formed coordinate
    pub async fn acquire_coordinate(&mut self) -> Coordinate {
        loop {
            self.set_state(ControllerState::AwaitingInput);
            self.print_guidance().await;

            let input = match self.reader.read_input(&mut self.serial).await {
                Ok(input) => input,
                Err(e) => {
                    log::warn!("Serial read failed: {:?}", e);
                    self.write_line(messages::REJECTED).await;
                    continue;
                }
            };

            self.set_state(ControllerState::Validating);
            match self.validator.validate(&input) {
                Ok(coordinate) => {
                    log::info!("Coordinate accepted ({:?} longitude)", coordinate.layout());
                    self.write_line("").await;
                    self.write_line(messages::ACCEPTED).await;
                    self.write_display(&coordinate).await;
                    return coordinate;
                }
                Err(rejected) => {
                    log::warn!("Input rejected: {}", BeaconError::from(rejected));
                    self.write_line("").await;
                    self.write_line(messages::REJECTED).await;
                }
            }
        }
    }

    /// Split, encode and start advertising an accepted coordinate
    ///
    /// Any failure here halts the cycle; composition is not retried.
    pub async fn advertise(&mut self, coordinate: &Coordinate) -> Result<AdvertisingSet, BeaconError> {
        self.set_state(ControllerState::Composing);

        match self.compose_and_start(coordinate).await {
            Ok(set) => {
                self.advertising = Some(set);
                self.platform.indicate_advertising();
                self.set_state(ControllerState::Advertising);
                self.write_line(messages::ADVERTISING).await;
                Ok(set)
            }
            Err(err) => {
                self.set_state(ControllerState::Halted);
                Err(err)
            }
        }
    }

    async fn compose_and_start(&mut self, coordinate: &Coordinate) -> Result<AdvertisingSet, BeaconError> {
        let payload = self.splitter.split(coordinate)?;
        let set = self.composer.compose(&payload)?;

        self.radio
            .configure(&set)
            .await
            .map_err(BeaconError::RadioConfigurationFailed)?;
        self.radio
            .start()
            .await
            .map_err(BeaconError::RadioStartFailed)?;

        Ok(set)
    }

    async fn report_fatal(&mut self, err: BeaconError) {
        log::error!("Cycle failed: {}", err);
        self.write_line(messages::FATAL).await;
        self.write_display(&err).await;
    }

    async fn print_guidance(&mut self) {
        self.write_line(messages::PROMPT).await;
        self.write_line(messages::FORMAT_INTRO).await;
        self.write_line(FORMAT).await;
        self.write_line(messages::EXAMPLE_INTRO).await;
        self.write_line(EXAMPLE).await;
    }

    fn set_state(&mut self, state: ControllerState) {
        if self.state != state {
            log::info!("Controller: {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }

    async fn write_display<T: core::fmt::Display>(&mut self, value: &T) {
        let mut line: String<TX_LINE_SIZE> = String::new();
        // Truncated output is still worth sending
        let _ = write!(line, "{}", value);
        self.write_line(&line).await;
    }

    /// Write a line to the operator; write failures are ignored
    async fn write_line(&mut self, text: &str) {
        let _ = self.serial.write(text.as_bytes()).await;
        let _ = self.serial.write(b"\r\n").await;
        let _ = self.serial.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::advertising::PDU_CAPACITY;
    use crate::coordinate::{latin1, LongitudeLayout};
    use crate::platform::mock::MockPlatform;
    use crate::radio::traits::mock::MockRadio;
    use crate::radio::RadioError;
    use crate::serial::traits::mock::MockSerialPort;

    type TestController = Controller<MockSerialPort, MockRadio, MockPlatform>;

    fn controller_with_input(text: &str) -> TestController {
        let serial = MockSerialPort::new();
        serial.queue_rx_text(text);
        Controller::new(serial, MockRadio::new(), MockPlatform::new(), BeaconIdentity::configured())
    }

    #[test]
    fn test_two_digit_coordinate_advertised() {
        let mut controller = controller_with_input("59°24'40.5\"N, 24°44'31.3\"E");

        futures::executor::block_on(async {
            let set = controller.run_cycle().await.expect("Cycle should succeed");

            assert_eq!(controller.state(), ControllerState::Advertising);
            assert!(controller.radio.is_advertising());
            assert_eq!(controller.radio.get_configured(), Some(set));
            assert_eq!(controller.advertising_set(), Some(&set));
            assert!(controller.platform.advertising_indicated);

            assert!(set.primary.len() <= PDU_CAPACITY);
            assert!(set.scan_response.len() <= PDU_CAPACITY);
            let coordinate = latin1("59°24'40.5\"N, 24°44'31.3\"E");
            assert_eq!(&set.primary.as_bytes()[7..], &coordinate.as_bytes()[..24]);
            assert!(set.scan_response.as_bytes().ends_with(&[0x59, 0x00, b'"', b'E', 0x00]));

            assert_eq!(controller.serial.tx_count(messages::PROMPT), 1);
            assert!(controller.serial.tx_contains(messages::ACCEPTED));
            assert!(controller.serial.tx_contains("59°24'40.5\"N, 24°44'31.3\"E"));
            assert!(controller.serial.tx_contains(messages::ADVERTISING));
            assert!(!controller.serial.tx_contains(messages::REJECTED));
        });
    }

    #[test]
    fn test_missing_comma_reprompts() {
        let mut controller = controller_with_input(
            "59°24'40.5\"N 24°44'31.3\"E\r\n59°24'40.5\"N, 24°44'31.3\"E",
        );

        futures::executor::block_on(async {
            let coordinate = controller.acquire_coordinate().await;

            assert_eq!(coordinate.layout(), LongitudeLayout::TwoDigit);
            assert_eq!(controller.state(), ControllerState::Validating);
            assert_eq!(controller.serial.tx_count(messages::REJECTED), 1);
            assert_eq!(controller.serial.tx_count(messages::PROMPT), 2);
            // Twice in the guidance, once more as the echo
            assert_eq!(controller.serial.tx_count(EXAMPLE), 3);
        });
    }

    #[test]
    fn test_three_digit_coordinate_advertised() {
        let mut controller = controller_with_input("59°24'40.5\"N, 124°44'31.3\"E");

        futures::executor::block_on(async {
            let set = controller.run_cycle().await.expect("Cycle should succeed");

            let scan = set.scan_response.as_bytes();
            let manuf = &scan[scan.len() - 8..];
            assert_eq!(manuf[0], 7); // type + company id + 4 payload bytes
            assert_eq!(manuf[1], 0xFF);
            assert_eq!(&manuf[4..], b"3\"E\0");
        });
    }

    #[test]
    fn test_serial_error_reprompts() {
        let mut controller = controller_with_input("59°24'40.5\"N, 24°44'31.3\"W");

        futures::executor::block_on(async {
            controller
                .serial
                .set_next_read_error(crate::serial::SerialError::ReadError);

            let coordinate = controller.acquire_coordinate().await;
            assert_eq!(coordinate.as_bytes().last(), Some(&b'W'));
            assert_eq!(controller.serial.tx_count(messages::PROMPT), 2);
        });
    }

    #[test]
    fn test_radio_configure_failure_halts() {
        let mut controller = controller_with_input("59°24'40.5\"N, 24°44'31.3\"E");

        futures::executor::block_on(async {
            controller.radio.set_next_configure_error(RadioError::InvalidConfig);

            let result = controller.run_cycle().await;
            assert_eq!(
                result,
                Err(BeaconError::RadioConfigurationFailed(RadioError::InvalidConfig))
            );
            assert_eq!(controller.state(), ControllerState::Halted);
            assert!(!controller.radio.is_advertising());
            assert!(!controller.platform.advertising_indicated);
            assert!(controller.advertising_set().is_none());
        });
    }

    #[test]
    fn test_radio_start_failure_halts_without_retry() {
        let mut controller = controller_with_input("59°24'40.5\"N, 24°44'31.3\"E");

        futures::executor::block_on(async {
            controller.radio.set_next_start_error(RadioError::StackError);

            let result = controller.run_cycle().await;
            assert_eq!(result, Err(BeaconError::RadioStartFailed(RadioError::StackError)));
            assert_eq!(controller.state(), ControllerState::Halted);
            assert_eq!(controller.radio.configure_calls(), 1);
        });
    }

    #[test]
    fn test_failed_prompt_write_still_accepts_input() {
        let mut controller = controller_with_input("59°24'40.5\"N, 24°44'31.3\"E");

        futures::executor::block_on(async {
            controller
                .serial
                .set_next_write_error(crate::serial::SerialError::WriteError);

            let coordinate = controller.acquire_coordinate().await;
            assert_eq!(coordinate.layout(), LongitudeLayout::TwoDigit);
            // The first line of the guidance was lost
            assert_eq!(controller.serial.tx_count(messages::PROMPT), 0);
            assert!(controller.serial.tx_contains(messages::ACCEPTED));
        });
    }

    #[test]
    fn test_run_once_reports_fatal_error() {
        let mut controller = controller_with_input("59°24'40.5\"N, 24°44'31.3\"E");

        futures::executor::block_on(async {
            controller.radio.set_next_configure_error(RadioError::InvalidConfig);

            let result = controller.run_once().await;
            assert_eq!(
                result,
                Err(BeaconError::RadioConfigurationFailed(RadioError::InvalidConfig))
            );
            assert_eq!(controller.state(), ControllerState::Halted);
            assert!(controller.serial.tx_contains(messages::STARTED));
            assert!(controller.serial.tx_contains(messages::FATAL));
            assert!(controller
                .serial
                .tx_contains("advertising configuration failed: InvalidConfig"));
            assert!(!controller.serial.tx_contains(messages::ADVERTISING));
        });
    }

    #[test]
    fn test_run_once_advertises_without_fatal_report() {
        let mut controller = controller_with_input("59°24'40.5\"N, 124°44'31.3\"W");

        futures::executor::block_on(async {
            assert!(controller.run_once().await.is_ok());
            assert_eq!(controller.state(), ControllerState::Advertising);
            assert!(controller.serial.tx_contains(messages::ADVERTISING));
            assert!(!controller.serial.tx_contains(messages::FATAL));
        });
    }

    #[test]
    fn test_fatal_report_written_to_serial() {
        let mut controller = controller_with_input("");

        futures::executor::block_on(async {
            controller
                .report_fatal(BeaconError::SplitUnderflow { len: 3 })
                .await;

            assert!(controller.serial.tx_contains(messages::FATAL));
            assert!(controller
                .serial
                .tx_contains("payload of 3 bytes too short to split"));
        });
    }
}
