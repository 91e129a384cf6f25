pub mod reader;
pub mod traits;

#[cfg(feature = "embedded")]
pub mod io;

pub use reader::CoordinateReader;
pub use traits::{SerialError, SerialPort};
