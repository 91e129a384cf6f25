//! Embassy task bodies
//!
//! `main` wraps these in `#[embassy_executor::task]` functions.

pub mod ble;
pub mod controller;

pub use ble::ble_task;
pub use controller::controller_task;
