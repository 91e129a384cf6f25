//! Positional format check for typed coordinates
//!
//! The input is compared against the reference layout
//! `DD°MM'SS.S"N/S, DDD°MM'SS.S"E/W` using a table of
//! (position, expected byte) pairs. The longitude part is checked twice, once
//! for a two-digit and once for a three-digit degree field, with every marker
//! shifted by one position in the second case.
//!
//! Known limitations, kept on purpose:
//! - Digit positions are not checked at all, `ab°cd'ef.g"N, ...` passes.
//! - No range checking, `99°99'99.9"N` passes.

use crate::config::coordinate::{DEGREE_SIGN, MAX_LEN};
use crate::coordinate::types::{Coordinate, LongitudeLayout, RawInput};
use heapless::Vec;

/// What a grammar position must hold
#[derive(Debug, Clone, Copy)]
enum Expect {
    Byte(u8),
    OneOf(&'static [u8]),
}

impl Expect {
    fn matches(self, byte: u8) -> bool {
        match self {
            Expect::Byte(expected) => byte == expected,
            Expect::OneOf(set) => set.contains(&byte),
        }
    }
}

/// Latitude markers: `DD°MM'SS.S"N/S, `
const LATITUDE_RULES: [(usize, Expect); 7] = [
    (2, Expect::Byte(DEGREE_SIGN)),
    (5, Expect::Byte(b'\'')),
    (8, Expect::Byte(b'.')),
    (10, Expect::Byte(b'"')),
    (11, Expect::OneOf(b"NS")),
    (12, Expect::Byte(b',')),
    (13, Expect::Byte(b' ')),
];

/// Longitude markers for a two-digit degree field. The last entry is the
/// terminal letter, so it also fixes the coordinate length.
const LONGITUDE_RULES: [(usize, Expect); 5] = [
    (16, Expect::Byte(DEGREE_SIGN)),
    (19, Expect::Byte(b'\'')),
    (22, Expect::Byte(b'.')),
    (24, Expect::Byte(b'"')),
    (25, Expect::OneOf(b"EW")),
];

/// Input did not match the coordinate grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarRejected {
    /// First position that did not hold the expected character
    pub position: usize,
}

/// Checks raw operator input against the coordinate grammar
pub struct CoordinateValidator;

impl CoordinateValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Classify an input attempt.
    ///
    /// On success the returned [`Coordinate`] is cut right after the E/W
    /// letter of whichever longitude layout matched.
    pub fn validate(&self, input: &RawInput) -> Result<Coordinate, GrammarRejected> {
        let bytes = input.as_bytes();

        check_rules(bytes, &LATITUDE_RULES, 0)?;

        let two_digit = check_rules(bytes, &LONGITUDE_RULES, LongitudeLayout::TwoDigit.shift());
        let layout = match two_digit {
            Ok(()) => LongitudeLayout::TwoDigit,
            Err(two_digit_err) => {
                match check_rules(bytes, &LONGITUDE_RULES, LongitudeLayout::ThreeDigit.shift()) {
                    Ok(()) => LongitudeLayout::ThreeDigit,
                    // Report against the layout the operator most likely meant
                    Err(three_digit_err) => {
                        return Err(if three_digit_err.position > two_digit_err.position {
                            three_digit_err
                        } else {
                            two_digit_err
                        })
                    }
                }
            }
        };

        let mut normalized: Vec<u8, MAX_LEN> = Vec::new();
        normalized
            .extend_from_slice(&bytes[..layout.coordinate_len()])
            .map_err(|_| GrammarRejected {
                position: layout.coordinate_len() - 1,
            })?;

        Ok(Coordinate::new(normalized, layout))
    }
}

impl Default for CoordinateValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_rules(bytes: &[u8], rules: &[(usize, Expect)], shift: usize) -> Result<(), GrammarRejected> {
    for &(position, expect) in rules {
        let position = position + shift;
        match bytes.get(position) {
            Some(&byte) if expect.matches(byte) => {}
            _ => return Err(GrammarRejected { position }),
        }
    }
    Ok(())
}
