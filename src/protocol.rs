//! CozIR sensor wire protocol.
//!
//! The sensor streams line-delimited ASCII frames of the form
//!
//! ```text
//! H 00449 T 01205 Z 00489
//! ```
//!
//! where `H` is relative humidity ×10, `T` is temperature ×10 offset by
//! +1000, and `Z` is CO2 in ppm unscaled.  [`FrameParser`] turns one such
//! line into a validated [`Reading`] or a typed [`ParseError`]; it never
//! panics on malformed input.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// One validated sensor sample in engineering units.
///
/// Immutable by convention: only the parser creates these, and every
/// consumer (window, sink, renderer) receives its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    /// Wall-clock time of parse completion (the sensor supplies none).
    pub timestamp: DateTime<Local>,
    /// Relative humidity, one fractional digit (count / 10).
    pub humidity_pct: f64,
    /// Cell temperature in Celsius, one fractional digit ((count - 1000) / 10).
    pub temperature_c: f64,
    /// CO2 concentration in ppm, unscaled.
    pub co2_ppm: u32,
}

// ---------------------------------------------------------------------------
// FrameParser
// ---------------------------------------------------------------------------

/// Parses raw frame bytes into [`Reading`]s.
///
/// The scan is unanchored: leading and trailing garbage around the matched
/// substring is ignored, and arbitrary noise may separate the three marker
/// groups as long as `H`, `T`, `Z` appear in that order, each followed by
/// digits.  First match wins.
#[derive(Debug, Default)]
pub struct FrameParser;

impl FrameParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one line of sensor output.
    pub fn parse(&self, raw: &[u8]) -> Result<Reading, ParseError> {
        let text = std::str::from_utf8(raw).map_err(|_| ParseError::Encoding)?;

        let (humidity_count, rest) = capture(text, b'H').ok_or(ParseError::NoMatch)?;
        let (temperature_count, rest) = capture(rest, b'T').ok_or(ParseError::NoMatch)?;
        let (co2_ppm, _) = capture(rest, b'Z').ok_or(ParseError::NoMatch)?;

        Ok(Reading {
            timestamp: Local::now(),
            humidity_pct: f64::from(humidity_count) / 10.0,
            // Counts below 1000 are legal and yield negative Celsius.
            temperature_c: (f64::from(temperature_count) - 1000.0) / 10.0,
            co2_ppm,
        })
    }
}

/// Find the first `marker` byte in `text` that is followed, after optional
/// ASCII whitespace, by a run of digits.  Returns the parsed value and the
/// remainder of the line after the digit run.
///
/// A digit run too long for `u32` is not a match; the scan continues at
/// the next marker occurrence.
fn capture(text: &str, marker: u8) -> Option<(u32, &str)> {
    let bytes = text.as_bytes();
    let mut search = 0;
    while let Some(offset) = bytes[search..].iter().position(|&b| b == marker) {
        let i = search + offset;
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits_start {
            if let Ok(value) = text[digits_start..j].parse::<u32>() {
                return Some((value, &text[j..]));
            }
        }
        search = i + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Reading, ParseError> {
        FrameParser::new().parse(line.as_bytes())
    }

    #[test]
    fn nominal_frame() {
        let r = parse("H 00449 T 01205 Z 00489").unwrap();
        assert_eq!(r.humidity_pct, 44.9);
        assert_eq!(r.temperature_c, 20.5);
        assert_eq!(r.co2_ppm, 489);
    }

    #[test]
    fn no_whitespace_between_marker_and_digits() {
        let r = parse("H449 T1205 Z489").unwrap();
        assert_eq!(r.humidity_pct, 44.9);
        assert_eq!(r.co2_ppm, 489);
    }

    #[test]
    fn surrounding_garbage_is_ignored() {
        let r = parse("!!xx H 453 junk T 990 ;; Z 600 trailing").unwrap();
        assert_eq!(r.humidity_pct, 45.3);
        assert_eq!(r.temperature_c, -1.0);
        assert_eq!(r.co2_ppm, 600);
    }

    #[test]
    fn temperature_count_below_offset_goes_negative() {
        let r = parse("H 100 T 0895 Z 420").unwrap();
        assert_eq!(r.temperature_c, -10.5);
    }

    #[test]
    fn first_match_wins() {
        let r = parse("H 111 T 1000 Z 500 H 999 T 2000 Z 900").unwrap();
        assert_eq!(r.humidity_pct, 11.1);
        assert_eq!(r.co2_ppm, 500);
    }

    #[test]
    fn marker_without_digits_is_skipped() {
        // The first H is part of a word; the scanner must move on.
        let r = parse("Hello H 250 T 1100 Z 430").unwrap();
        assert_eq!(r.humidity_pct, 25.0);
    }

    #[test]
    fn missing_co2_marker_is_no_match() {
        assert_eq!(parse("H 449 T 1205"), Err(ParseError::NoMatch));
    }

    #[test]
    fn markers_out_of_order_are_no_match() {
        assert_eq!(parse("Z 489 T 1205 H 449"), Err(ParseError::NoMatch));
    }

    #[test]
    fn empty_line_is_no_match() {
        assert_eq!(parse(""), Err(ParseError::NoMatch));
        assert_eq!(parse("garbage"), Err(ParseError::NoMatch));
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        let parser = FrameParser::new();
        assert_eq!(parser.parse(&[0xff, 0xfe, b'H', b'1']), Err(ParseError::Encoding));
    }

    #[test]
    fn oversized_digit_run_does_not_panic() {
        // 99999999999 overflows u32; the frame simply does not match.
        assert_eq!(parse("H 1 T 1000 Z 99999999999"), Err(ParseError::NoMatch));
    }
}
