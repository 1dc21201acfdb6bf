//! Suffix grammars for time and byte-size setting values.
//!
//! Time values: `S` / `millis` (milliseconds), `s` (seconds), `m`
//! (minutes), `H` (hours) or a bare number in the accessor's unit.
//! Byte values: `b`, `k`/`K`, `m`/`M`, `g`/`G` or a bare number of bytes.

use crate::core::error::{Result, SextantError};

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;

fn parse_long(value: &str, number: &str) -> Result<i64> {
    number.parse::<i64>().map_err(|e| {
        SextantError::IllegalArgument(format!("Failed to parse [{value}] as a number: {e}"))
    })
}

fn scale(value: &str, number: i64, factor: i64) -> Result<i64> {
    number.checked_mul(factor).ok_or_else(|| {
        SextantError::IllegalArgument(format!("Value [{value}] overflows a 64-bit integer"))
    })
}

/// Parse a time value into milliseconds
///
/// `S` and `millis` are taken as milliseconds. `millis` is matched
/// before `s` since it shares the trailing character.
pub fn parse_time_in_millis(value: &str) -> Result<i64> {
    if let Some(number) = value.strip_suffix("millis") {
        parse_long(value, number)
    } else if let Some(number) = value.strip_suffix('S') {
        parse_long(value, number)
    } else if let Some(number) = value.strip_suffix('s') {
        scale(value, parse_long(value, number)?, 1000)
    } else if let Some(number) = value.strip_suffix('m') {
        scale(value, parse_long(value, number)?, 60 * 1000)
    } else if let Some(number) = value.strip_suffix('H') {
        scale(value, parse_long(value, number)?, 60 * 60 * 1000)
    } else {
        parse_long(value, value)
    }
}

/// Parse a time value into seconds
///
/// Millisecond suffixes (`S`, `millis`) are rejected rather than
/// truncated.
pub fn parse_time_in_seconds(value: &str) -> Result<i64> {
    if value.ends_with("millis") || value.ends_with('S') {
        Err(SextantError::IllegalArgument(format!(
            "Time value [{value}] uses a millisecond suffix where seconds are expected"
        )))
    } else if let Some(number) = value.strip_suffix('s') {
        parse_long(value, number)
    } else if let Some(number) = value.strip_suffix('m') {
        scale(value, parse_long(value, number)?, 60)
    } else if let Some(number) = value.strip_suffix('H') {
        scale(value, parse_long(value, number)?, 60 * 60)
    } else {
        parse_long(value, value)
    }
}

fn parse_fraction(value: &str, number: &str, factor: f64) -> Result<i64> {
    let parsed = number.parse::<f64>().map_err(|e| {
        SextantError::IllegalArgument(format!("Failed to parse [{value}] as a byte size: {e}"))
    })?;
    let bytes = parsed * factor;
    if !bytes.is_finite() || bytes > i64::MAX as f64 || bytes < i64::MIN as f64 {
        return Err(SextantError::IllegalArgument(format!(
            "Byte size [{value}] is out of range"
        )));
    }
    Ok(bytes as i64)
}

/// Parse a byte-size value into bytes
///
/// k, m and g scale by powers of 1024 in either case and accept
/// fractions (`1.5k`). `b` is lowercase only.
pub fn parse_bytes(value: &str) -> Result<i64> {
    let (number, factor) = match value.chars().last() {
        Some('k') | Some('K') => (&value[..value.len() - 1], KB),
        Some('m') | Some('M') => (&value[..value.len() - 1], MB),
        Some('g') | Some('G') => (&value[..value.len() - 1], GB),
        Some('b') => return parse_long(value, &value[..value.len() - 1]),
        _ => return parse_long(value, value),
    };
    parse_fraction(value, number, factor)
}
