#![cfg_attr(not(test), no_std)]

pub mod advertising;
pub mod config;
pub mod controller;
pub mod coordinate;
pub mod error;
pub mod payload;
pub mod platform;
pub mod radio;
pub mod serial;

#[cfg(feature = "embedded")]
pub mod tasks;
