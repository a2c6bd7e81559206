//! Reminder interval validation.

use crate::error::ReminderError;

pub const MIN_INTERVAL_MINUTES: u32 = 1;
pub const MAX_INTERVAL_MINUTES: u32 = 240;

/// Accept `minutes` if it lies in `[MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES]`.
pub fn validate_interval(minutes: i64) -> Result<u32, ReminderError> {
    if (i64::from(MIN_INTERVAL_MINUTES)..=i64::from(MAX_INTERVAL_MINUTES)).contains(&minutes) {
        Ok(minutes as u32)
    } else {
        Err(ReminderError::InvalidInterval {
            raw: minutes.to_string(),
        })
    }
}

/// Parse user input leniently: leading whitespace and an optional sign, then
/// the longest run of digits. Anything after the digits is ignored, so
/// `"45min"` is 45 and `"1.5"` is 1. Input without leading digits is invalid.
pub fn parse_interval(raw: &str) -> Result<u32, ReminderError> {
    let invalid = || ReminderError::InvalidInterval {
        raw: raw.to_string(),
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(invalid());
    }

    let magnitude: i64 = rest[..digits_len].parse().map_err(|_| invalid())?;
    let minutes = if negative { -magnitude } else { magnitude };
    validate_interval(minutes).map_err(|_| invalid())
}
