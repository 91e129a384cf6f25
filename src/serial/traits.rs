//! Serial port trait for abstraction and testability
//!
//! This trait defines the interface for serial port operations,
//! allowing the actual UART driver to be swapped with a mock for testing.

use core::future::Future;

/// Errors that can occur during serial operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// Receive error reported by the driver
    ReadError,
    /// Buffer overflow
    OverflowError,
    /// Write error
    WriteError,
}

/// Abstract serial port interface for testability
///
/// This trait allows the coordinate reader and the controller to work with
/// either the real serial driver or a mock implementation for testing.
pub trait SerialPort {
    /// Read bytes into buffer
    ///
    /// Returns the number of bytes actually read. Returns `Ok(0)` if no data
    /// is available yet; callers poll again.
    fn read(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<usize, SerialError>>;

    /// Write bytes from buffer
    fn write(&mut self, data: &[u8]) -> impl Future<Output = Result<(), SerialError>>;

    /// Flush the write buffer
    fn flush(&mut self) -> impl Future<Output = Result<(), SerialError>>;
}
