// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Certgen Authors

use std::{fmt::Write, time::Duration};
use thiserror::Error;

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

// Fraction digits beyond this point cannot change the result in nanoseconds
const MAX_FRACTION_DIGITS: u32 = 20;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DurationParsingError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("negative duration {0:?}")]
    Negative(String),

    #[error("duration {0:?} overflows")]
    Overflow(String),
}

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(NANOSECOND),
        // U+00B5 micro sign and U+03BC Greek small letter mu
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parses a duration string such as `300ms`, `-1.5h` or `2h45m`
///
/// A duration is an optionally signed sequence of decimal numbers, each with
/// an optional fraction and a mandatory unit suffix. Valid units are `ns`,
/// `us` (or `µs`), `ms`, `s`, `m` and `h`. The plain string `0` is accepted
/// as zero.
///
/// Negative durations are rejected, as they have no meaning for a
/// certificate lifetime or a request timeout.
///
/// # Arguments
///
/// * `input` the string to be parsed
///
/// # Returns
///
/// The obtained `Duration`
///
/// # Examples
///
/// * `1h30m` => 5400 seconds
/// * `1.5s` => 1500 milliseconds
/// * `26280h` => 3 years of 365 days
pub fn parse_duration(input: &str) -> Result<Duration, DurationParsingError> {
    let invalid = || DurationParsingError::Invalid(input.to_string());

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        let (whole, rest) = split_digits(s);
        s = rest;

        let mut fraction: u128 = 0;
        let mut fraction_scale: u128 = 1;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (digits, rest) = split_digits(rest);
            s = rest;
            has_fraction = !digits.is_empty();
            for d in digits.bytes().take(MAX_FRACTION_DIGITS as usize) {
                fraction = fraction * 10 + u128::from(d - b'0');
                fraction_scale *= 10;
            }
        }
        if whole.is_empty() && !has_fraction {
            return Err(invalid());
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_end == 0 {
            return Err(DurationParsingError::MissingUnit(input.to_string()));
        }
        let (unit, rest) = s.split_at(unit_end);
        s = rest;
        let scale = unit_scale(unit).ok_or_else(|| {
            DurationParsingError::UnknownUnit {
                unit: unit.to_string(),
                input: input.to_string(),
            }
        })?;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| {
                DurationParsingError::Overflow(input.to_string())
            })?
        };
        let value = whole
            .checked_mul(scale)
            .and_then(|v| v.checked_add(fraction * scale / fraction_scale))
            .ok_or_else(|| DurationParsingError::Overflow(input.to_string()))?;
        total = total
            .checked_add(value)
            .ok_or_else(|| DurationParsingError::Overflow(input.to_string()))?;
    }

    if negative && total > 0 {
        return Err(DurationParsingError::Negative(input.to_string()));
    }

    let nanos = u64::try_from(total)
        .map_err(|_| DurationParsingError::Overflow(input.to_string()))?;
    Ok(Duration::from_nanos(nanos))
}

// Renders `value / 10^precision` with trailing zeros of the fraction removed
fn fixed_point(value: u128, precision: u32) -> String {
    let scale = 10u128.pow(precision);
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{fraction:0width$}", width = precision as usize);
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// Formats a duration in the notation accepted by `parse_duration`
///
/// The largest unit is the hour, so three years are rendered as
/// `26280h0m0s`. Durations under one second use the smallest unit that
/// keeps a non-zero integer part, e.g. `1.5ms`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < MICROSECOND {
        return format!("{nanos}ns");
    }
    if nanos < MILLISECOND {
        return format!("{}\u{b5}s", fixed_point(nanos, 3));
    }
    if nanos < SECOND {
        return format!("{}ms", fixed_point(nanos, 6));
    }

    let hours = nanos / HOUR;
    let minutes = (nanos % HOUR) / MINUTE;
    let seconds = nanos % MINUTE;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(out, "{}s", fixed_point(seconds, 9));
    out
}
