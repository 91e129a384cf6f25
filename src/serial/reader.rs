//! Coordinate reader
//!
//! Pulls one byte at a time from a serial port into a [`RawInput`], stopping
//! at the terminal `E`/`W` letter or when the buffer is full. Bytes after the
//! terminal letter stay in the port for the next attempt.

use crate::config::coordinate::{DEGREE_SIGN, UTF8_DEGREE_LEAD};
use crate::coordinate::RawInput;
use crate::serial::traits::{SerialError, SerialPort};

/// Serial coordinate reader
///
/// Also folds the UTF-8 degree sign (`0xC2 0xB0`) into its single-byte
/// Latin-1 form so both kinds of terminal produce the same input.
pub struct CoordinateReader {
    /// Byte taken from the port that belongs to the next attempt
    carried: Option<u8>,
}

impl CoordinateReader {
    /// Create a new coordinate reader
    pub fn new() -> Self {
        Self { carried: None }
    }

    /// Read one input attempt from the serial port
    ///
    /// This method polls until a terminal letter or a full buffer is reached,
    /// or an error occurs.
    pub async fn read_input<S: SerialPort>(&mut self, serial: &mut S) -> Result<RawInput, SerialError> {
        let mut input = RawInput::new();
        let mut held_lead = false;

        while !input.is_full() {
            let byte = self.next_byte(serial).await?;

            if held_lead {
                held_lead = false;
                if byte == DEGREE_SIGN {
                    if input.push(DEGREE_SIGN).is_err() {
                        break;
                    }
                    continue;
                }

                // Not a degree sign after all, keep the lead byte
                if input.push(UTF8_DEGREE_LEAD).is_err() || input.is_full() {
                    self.carried = Some(byte);
                    break;
                }
            }

            if byte == UTF8_DEGREE_LEAD {
                held_lead = true;
                continue;
            }

            // Leftover line endings from the previous line
            if input.is_empty() && (byte == b'\r' || byte == b'\n') {
                continue;
            }

            if input.push(byte).is_err() {
                break;
            }

            if byte == b'E' || byte == b'W' {
                break;
            }
        }

        Ok(input)
    }

    /// Next byte, polling the port until one arrives
    async fn next_byte<S: SerialPort>(&mut self, serial: &mut S) -> Result<u8, SerialError> {
        if let Some(byte) = self.carried.take() {
            return Ok(byte);
        }

        let mut buf = [0u8; 1];
        loop {
            if serial.read(&mut buf).await? == 1 {
                return Ok(buf[0]);
            }
        }
    }
}

impl Default for CoordinateReader {
    fn default() -> Self {
        Self::new()
    }
}
