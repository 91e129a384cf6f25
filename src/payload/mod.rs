//! Splitting a coordinate across the two advertising records

pub mod fragment;
pub mod splitter;

pub use fragment::PayloadFragment;
pub use splitter::{PayloadSplitter, SplitPayload, TERMINATOR};
