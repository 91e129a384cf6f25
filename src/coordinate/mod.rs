//! Coordinate input and its format check
//!
//! A coordinate is typed by a human over the serial line in the form
//! `DD°MM'SS.S"N/S, DDD°MM'SS.S"E/W`. Only the punctuation and hemisphere
//! letters are checked; see [`validator`] for the exact rules.

pub mod types;
pub mod validator;

pub use types::{Coordinate, LongitudeLayout, RawInput};
pub use validator::{CoordinateValidator, GrammarRejected};

#[cfg(test)]
pub(crate) fn latin1(text: &str) -> RawInput {
    let mut input = RawInput::new();
    for ch in text.chars() {
        let byte = u8::try_from(u32::from(ch)).expect("Latin-1 character");
        input.push(byte).expect("Input fits");
    }
    input
}
