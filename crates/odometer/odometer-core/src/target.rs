//! Conversion of caller input into a whole, non-negative target value.
//!
//! Numbers truncate toward zero. Text accepts an optional sign, ASCII digits
//! and an optional fractional part (which is truncated); anything else is
//! [`OdometerError::InvalidTarget`]. Negative values and values above
//! [`MAX_TARGET`] are [`OdometerError::UnsupportedValue`].

use serde::{Deserialize, Serialize};

use crate::error::OdometerError;

/// Largest displayable target. Wheel positions are `f64`; above this the
/// `+0.999` rollover bias no longer survives rounding.
pub const MAX_TARGET: u64 = 999_999_999_999;

/// Loosely typed target as received from JSON/JS hosts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetInput {
    Number(f64),
    Text(String),
}

/// Anything `OdometerController::set_target` accepts.
pub trait IntoTarget {
    fn into_target(self) -> Result<u64, OdometerError>;
}

fn check_range(value: u64) -> Result<u64, OdometerError> {
    if value > MAX_TARGET {
        Err(OdometerError::unsupported(value))
    } else {
        Ok(value)
    }
}

impl IntoTarget for u64 {
    fn into_target(self) -> Result<u64, OdometerError> {
        check_range(self)
    }
}

impl IntoTarget for u32 {
    fn into_target(self) -> Result<u64, OdometerError> {
        Ok(u64::from(self))
    }
}

impl IntoTarget for i64 {
    fn into_target(self) -> Result<u64, OdometerError> {
        if self < 0 {
            return Err(OdometerError::unsupported(self));
        }
        check_range(self as u64)
    }
}

impl IntoTarget for i32 {
    fn into_target(self) -> Result<u64, OdometerError> {
        i64::from(self).into_target()
    }
}

impl IntoTarget for f64 {
    fn into_target(self) -> Result<u64, OdometerError> {
        if !self.is_finite() {
            return Err(OdometerError::invalid_target(self.to_string()));
        }
        // -0.5 truncates to -0.0, which compares equal to zero.
        let whole = self.trunc();
        if whole < 0.0 {
            return Err(OdometerError::unsupported(self));
        }
        if whole > MAX_TARGET as f64 {
            return Err(OdometerError::unsupported(self));
        }
        Ok(whole as u64)
    }
}

impl IntoTarget for &str {
    fn into_target(self) -> Result<u64, OdometerError> {
        parse_text(self)
    }
}

impl IntoTarget for String {
    fn into_target(self) -> Result<u64, OdometerError> {
        parse_text(&self)
    }
}

impl IntoTarget for &String {
    fn into_target(self) -> Result<u64, OdometerError> {
        parse_text(self)
    }
}

impl IntoTarget for TargetInput {
    fn into_target(self) -> Result<u64, OdometerError> {
        match self {
            TargetInput::Number(n) => n.into_target(),
            TargetInput::Text(s) => parse_text(&s),
        }
    }
}

fn parse_text(raw: &str) -> Result<u64, OdometerError> {
    let s = raw.trim();
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };

    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(OdometerError::invalid_target(raw));
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(OdometerError::invalid_target(raw));
    }

    let significant = int_part.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    if negative {
        return Err(OdometerError::unsupported(s));
    }
    // More digits than MAX_TARGET has would overflow the parse below.
    if significant.len() > 12 {
        return Err(OdometerError::unsupported(s));
    }
    let value: u64 = significant
        .parse()
        .map_err(|_| OdometerError::invalid_target(raw))?;
    check_range(value)
}
