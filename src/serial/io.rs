//! [`SerialPort`] over any `embedded_io_async` reader/writer pair.
//!
//! Used with the split halves of the USB Serial JTAG peripheral.

use embedded_io_async::{Read, Write};

use crate::serial::traits::{SerialError, SerialPort};

/// Serial port built from separate receive and transmit halves
pub struct IoSerialPort<R, W> {
    rx: R,
    tx: W,
}

impl<R: Read, W: Write> IoSerialPort<R, W> {
    pub fn new(rx: R, tx: W) -> Self {
        Self { rx, tx }
    }
}

impl<R: Read, W: Write> SerialPort for IoSerialPort<R, W> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, SerialError> {
        // Waits until at least one byte is available
        self.rx.read(buf).await.map_err(|_| SerialError::ReadError)
    }

    async fn write(&mut self, data: &[u8]) -> Result<(), SerialError> {
        self.tx.write_all(data).await.map_err(|_| SerialError::WriteError)
    }

    async fn flush(&mut self) -> Result<(), SerialError> {
        self.tx.flush().await.map_err(|_| SerialError::WriteError)
    }
}
