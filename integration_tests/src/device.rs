//! Device communication client.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use serialport::SerialPort;

/// Text the firmware prints before every input attempt
pub const PROMPT: &str = "Enter the GPS coordinates";
/// Printed when an input attempt fails the format check
pub const REJECTED: &str = "GPS coordinates are not in the expected format";
/// Printed before the accepted coordinate is echoed
pub const ACCEPTED: &str = "You have entered the following coordinates:";
/// Printed once the radio is advertising
pub const ADVERTISING: &str = "Beacon started, advertising coordinates...";

/// Find the firmware's serial port by scanning ttyACM devices.
pub fn find_data_port() -> Result<String> {
    let ports = serialport::available_ports()?;

    for port_info in ports {
        // Filter to ttyACM devices (USB Serial JTAG enumerates as CDC-ACM)
        if port_info.port_name.contains("ttyACM") {
            return Ok(port_info.port_name);
        }
    }

    anyhow::bail!("No data port found - ensure device is connected")
}

/// Resolve a port argument - returns the port path if not "auto", otherwise auto-detects.
pub fn resolve_port(port_arg: &str) -> Result<String> {
    if port_arg == "auto" {
        find_data_port()
    } else {
        Ok(port_arg.to_string())
    }
}

/// Client for the beacon's operator console.
pub struct DeviceClient {
    port: Box<dyn SerialPort>,
    timeout: Duration,
    /// Text received but not yet consumed by a wait
    received: String,
}

impl DeviceClient {
    /// Create a new device client.
    pub fn new(port_name: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(100))
            .open()?;

        Ok(Self {
            port,
            timeout: Duration::from_secs(3),
            received: String::new(),
        })
    }

    /// Set the wait timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Clear any pending data in the serial buffer.
    pub fn clear_buffer(&mut self) -> Result<()> {
        self.port.clear(serialport::ClearBuffer::All)?;
        self.received.clear();
        Ok(())
    }

    /// Send a coordinate line as UTF-8.
    pub fn send_line(&mut self, text: &str) -> Result<()> {
        self.send_raw(text.as_bytes())?;
        self.send_raw(b"\r\n")
    }

    /// Send a coordinate line with every character encoded as one Latin-1 byte.
    pub fn send_latin1_line(&mut self, text: &str) -> Result<()> {
        let mut bytes = Vec::with_capacity(text.len() + 2);
        for c in text.chars() {
            let code = u32::from(c);
            if code > 0xFF {
                anyhow::bail!("'{}' has no Latin-1 encoding", c);
            }
            bytes.push(code as u8);
        }
        bytes.extend_from_slice(b"\r\n");
        self.send_raw(&bytes)
    }

    fn send_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    /// Wait until `needle` has been received, consuming everything up to
    /// and including it. Returns the consumed text.
    pub fn wait_for(&mut self, needle: &str) -> Result<String> {
        let start = Instant::now();
        let mut buf = [0u8; 256];

        loop {
            if let Some(pos) = self.received.find(needle) {
                let consumed: String = self.received.drain(..pos + needle.len()).collect();
                return Ok(consumed);
            }

            if start.elapsed() >= self.timeout {
                anyhow::bail!(
                    "Timeout waiting for {:?}, received {:?}",
                    needle,
                    self.received
                );
            }

            match self.port.read(&mut buf) {
                Ok(n) => self.received.push_str(&String::from_utf8_lossy(&buf[..n])),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read whatever arrives within `duration`, without consuming it.
    pub fn collect_for(&mut self, duration: Duration) -> Result<&str> {
        let start = Instant::now();
        let mut buf = [0u8; 256];

        while start.elapsed() < duration {
            match self.port.read(&mut buf) {
                Ok(n) => self.received.push_str(&String::from_utf8_lossy(&buf[..n])),
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(&self.received)
    }
}
