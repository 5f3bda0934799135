//! UTC date utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for the date handling a
//! sitemap needs: parsing `lastmod` values and formatting them as
//! `yyyy-MM-dd`.
//!
//! # Features
//!
//! - Zero external dependencies for date parsing
//! - ISO 8601 (`YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SSZ`) and `dd.MM.yyyy` input
//! - Validation with clear error messages
//! - Leap year handling
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15").unwrap();
//! let dt = DateTimeUtc::parse_dotted("15.06.2024").unwrap();
//! assert_eq!(dt.to_ymd(), "2024-06-15");
//! ```

use anyhow::{Result, bail};
use std::time::SystemTime;

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse from "YYYY-MM-DD" or "YYYY-MM-DDTHH:MM:SSZ" format
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        // Parse date part
        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        // Check for time part (RFC3339)
        let (hour, minute, second) = if bytes.len() >= 20 && bytes[10] == b'T' && bytes[19] == b'Z'
        {
            if bytes[13] != b':' || bytes[16] != b':' {
                return None;
            }
            (
                parse_u8(&bytes[11..13])?,
                parse_u8(&bytes[14..16])?,
                parse_u8(&bytes[17..19])?,
            )
        } else if bytes.len() == 10 {
            (0, 0, 0)
        } else {
            return None;
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    /// Parse from "dd.MM.yyyy" format (legacy feed date token)
    pub fn parse_dotted(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        if bytes.len() != 10 || bytes[2] != b'.' || bytes[5] != b'.' {
            return None;
        }

        let day = parse_u8(&bytes[0..2])?;
        let month = parse_u8(&bytes[3..5])?;
        let year = parse_u16(&bytes[6..10])?;

        let dt = Self::from_ymd(year, month, day);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as sitemap `lastmod` date: `YYYY-MM-DD`
    pub fn to_ymd(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Current UTC date from the system clock.
///
/// Days-since-epoch to civil date conversion (Gregorian, proleptic).
pub fn today_utc() -> DateTimeUtc {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let days = (secs / 86_400) as i64;
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    DateTimeUtc::from_ymd(year as u16, month as u8, day as u8)
}

/// Normalize a date token to `YYYY-MM-DD`.
///
/// Tries ISO 8601 first, then `dd.MM.yyyy`; anything unrecognized passes
/// through unchanged so an odd token never fails a whole run. Idempotent:
/// the output always parses as ISO or is returned verbatim.
pub fn format_date(raw: &str) -> String {
    let s = raw.trim();
    if let Some(dt) = DateTimeUtc::parse(s) {
        return dt.to_ymd();
    }
    if let Some(dt) = DateTimeUtc::parse_dotted(s) {
        return dt.to_ymd();
    }
    raw.to_string()
}

/// True if the token parses as a recognized date (ISO or `dd.MM.yyyy`)
pub fn is_date_token(s: &str) -> bool {
    let s = s.trim();
    DateTimeUtc::parse(s).is_some() || DateTimeUtc::parse_dotted(s).is_some()
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let dt = DateTimeUtc::parse("2024-06-15").unwrap();
        assert_eq!(dt.year, 2024);
        assert_eq!(dt.month, 6);
        assert_eq!(dt.day, 15);
        assert_eq!(dt.hour, 0);
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt.hour, 14);
        assert_eq!(dt.minute, 30);
        assert_eq!(dt.second, 45);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(DateTimeUtc::parse("2024-6-15").is_none());
        assert!(DateTimeUtc::parse("2024-13-01").is_none());
        assert!(DateTimeUtc::parse("not a date").is_none());
        assert!(DateTimeUtc::parse("2024-06-15T14:30:45").is_none());
    }

    #[test]
    fn test_parse_dotted() {
        let dt = DateTimeUtc::parse_dotted("05.01.2024").unwrap();
        assert_eq!(dt.year, 2024);
        assert_eq!(dt.month, 1);
        assert_eq!(dt.day, 5);
    }

    #[test]
    fn test_parse_dotted_invalid() {
        assert!(DateTimeUtc::parse_dotted("2024-01-05").is_none());
        assert!(DateTimeUtc::parse_dotted("32.01.2024").is_none());
        assert!(DateTimeUtc::parse_dotted("05.13.2024").is_none());
        assert!(DateTimeUtc::parse_dotted("5.1.2024").is_none());
    }

    #[test]
    fn test_validate_leap_year() {
        // Leap year - Feb 29 is valid
        assert!(DateTimeUtc::from_ymd(2024, 2, 29).validate().is_ok());
        assert!(DateTimeUtc::from_ymd(2000, 2, 29).validate().is_ok()); // divisible by 400

        // Non-leap year - Feb 29 is invalid
        assert!(DateTimeUtc::from_ymd(2023, 2, 29).validate().is_err());
        assert!(DateTimeUtc::from_ymd(1900, 2, 29).validate().is_err()); // divisible by 100 but not 400
    }

    #[test]
    fn test_validate_invalid_day() {
        assert!(DateTimeUtc::from_ymd(2024, 6, 0).validate().is_err());
        assert!(DateTimeUtc::from_ymd(2024, 4, 31).validate().is_err());
        assert!(DateTimeUtc::from_ymd(2024, 1, 32).validate().is_err());
    }

    #[test]
    fn test_format_date_iso() {
        assert_eq!(format_date("2024-06-15"), "2024-06-15");
        assert_eq!(format_date("2024-06-15T14:30:45Z"), "2024-06-15");
    }

    #[test]
    fn test_format_date_dotted() {
        assert_eq!(format_date("05.01.2024"), "2024-01-05");
        assert_eq!(format_date("29.02.2024"), "2024-02-29");
    }

    #[test]
    fn test_format_date_passthrough() {
        assert_eq!(format_date("soon"), "soon");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("30.02.2024"), "30.02.2024");
    }

    #[test]
    fn test_format_date_idempotent() {
        for input in ["2024-06-15", "05.01.2024", "soon", "", "2024-06-15T14:30:45Z"] {
            let once = format_date(input);
            assert_eq!(format_date(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_is_date_token() {
        assert!(is_date_token("2024-06-15"));
        assert!(is_date_token("15.06.2024"));
        assert!(!is_date_token("slug"));
        assert!(!is_date_token("soon"));
    }

    #[test]
    fn test_today_utc_is_valid() {
        let today = today_utc();
        assert!(today.validate().is_ok());
        assert!(today.year >= 2024);
    }

    #[test]
    fn test_today_utc_format() {
        let ymd = today_utc().to_ymd();
        assert_eq!(ymd.len(), 10);
        assert!(DateTimeUtc::parse(&ymd).is_some());
    }
}
