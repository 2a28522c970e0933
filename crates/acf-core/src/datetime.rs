//! `yyyy-mm-dd` parsing and the end-of-day-UTC-exclusive expiration rule.

use crate::error::AcfError;
use chrono::{NaiveDate, TimeZone, Utc};

/// Parse `yyyy-mm-dd`. Each component must be present and strictly
/// positive before calendar validation is even attempted.
pub fn parse_expiration_date(s: &str) -> Result<NaiveDate, AcfError> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(AcfError::DateFromStringInvalidFormat);
    }
    let year: i32 = parts[0]
        .parse()
        .map_err(|_| AcfError::DateFromStringInvalidFormat)?;
    let month: i32 = parts[1]
        .parse()
        .map_err(|_| AcfError::DateFromStringInvalidFormat)?;
    let day: i32 = parts[2]
        .parse()
        .map_err(|_| AcfError::DateFromStringInvalidFormat)?;
    if year <= 0 || month <= 0 || day <= 0 {
        return Err(AcfError::DateFromStringNonPositiveComponent);
    }
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .ok_or(AcfError::DateFromStringInvalidFormat)
}

/// Unix timestamp of midnight UTC on the day *after* `date` — the instant
/// at and after which an ACF expiring on `date` is considered expired.
pub fn expiration_instant_unix(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().expect("expiration date near chrono's range limit");
    Utc.from_utc_datetime(&next_day.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
        .timestamp()
}

/// An ACF expiring on `date` is expired once `now_unix` reaches midnight
/// UTC of the following day (inclusive of that instant).
pub fn is_expired(date: NaiveDate, now_unix: i64) -> bool {
    now_unix >= expiration_instant_unix(date)
}
