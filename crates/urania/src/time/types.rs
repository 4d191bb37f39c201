use chrono::{DateTime, Datelike, FixedOffset, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ChartError, Result};

/// First Gregorian date supported: 1582-10-15.
pub const MIN_DATE: (i32, u32, u32) = (1582, 10, 15);
/// Last supported date: 2100-12-31.
pub const MAX_DATE: (i32, u32, u32) = (2100, 12, 31);

/// A validated Gregorian calendar instant with an explicit UTC offset.
///
/// Fields are civil time at `utc_offset_secs` east of Greenwich. A
/// `Timestamp` is never mutated; conversions produce new values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
    utc_offset_secs: i32,
}

impl Timestamp {
    /// Create a UTC timestamp, validating every calendar field.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self> {
        validate_fields(year, month, day, hour, minute, second)?;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            utc_offset_secs: 0,
        })
    }

    /// Reinterpret the civil fields as local time at `offset`.
    pub fn with_offset(self, offset: FixedOffset) -> Self {
        Self {
            utc_offset_secs: offset.local_minus_utc(),
            ..self
        }
    }

    /// Build a timestamp from any chrono datetime, keeping its offset.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Result<Self> {
        let offset = dt.offset().fix();
        let local = dt.naive_local();
        let second = local.second() as f64 + local.nanosecond() as f64 / 1e9;
        // Leap-second nanoseconds spill past 60s; clamp into the last second
        let second = second.min(59.999_999_999);
        Ok(Self::new(
            local.year(),
            local.month(),
            local.day(),
            local.hour(),
            local.minute(),
            second,
        )?
        .with_offset(offset))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> f64 {
        self.second
    }

    /// Offset east of UTC in seconds.
    pub fn utc_offset_secs(&self) -> i32 {
        self.utc_offset_secs
    }

    /// Seconds elapsed since local midnight.
    pub(crate) fn seconds_of_day(&self) -> f64 {
        (self.hour * 3600 + self.minute * 60) as f64 + self.second
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        let off = self.utc_offset_secs;
        if off == 0 {
            write!(f, "Z")
        } else {
            let sign = if off < 0 { '-' } else { '+' };
            let abs = off.unsigned_abs();
            write!(f, "{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
        }
    }
}

/// Continuous day count from noon, 1 January 4713 BC (proleptic Julian).
///
/// Always expressed on the UT scale; this is the only time variable the
/// position and house layers consume.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDay(pub f64);

impl JulianDay {
    pub fn value(self) -> f64 {
        self.0
    }

    /// Shift by a (possibly fractional) number of days.
    pub fn add_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }

    /// Convert to a UTC chrono datetime, rounded to the millisecond.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        // 2440587.5 is the Unix epoch
        let millis = ((self.0 - 2_440_587.5) * 86_400_000.0).round();
        if !millis.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(millis as i64)
    }
}

impl From<JulianDay> for f64 {
    fn from(jd: JulianDay) -> Self {
        jd.0
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.6}", self.0)
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn validate_fields(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(ChartError::timestamp(format!("month {month} is not in 1..=12")));
    }
    let max_day = days_in_month(year, month);
    if day == 0 || day > max_day {
        return Err(ChartError::timestamp(format!(
            "day {day} is not valid for {year:04}-{month:02} (1..={max_day})"
        )));
    }
    if hour > 23 {
        return Err(ChartError::timestamp(format!("hour {hour} is not in 0..=23")));
    }
    if minute > 59 {
        return Err(ChartError::timestamp(format!("minute {minute} is not in 0..=59")));
    }
    if !second.is_finite() || !(0.0..60.0).contains(&second) {
        return Err(ChartError::timestamp(format!("second {second} is not in [0, 60)")));
    }
    if (year, month, day) < MIN_DATE || (year, month, day) > MAX_DATE {
        return Err(ChartError::timestamp(format!(
            "{year:04}-{month:02}-{day:02} is outside the supported Gregorian range \
             {:04}-{:02}-{:02}..={:04}-{:02}-{:02}",
            MIN_DATE.0, MIN_DATE.1, MIN_DATE.2, MAX_DATE.0, MAX_DATE.1, MAX_DATE.2
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years_follow_gregorian_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(Timestamp::new(2023, 2, 29, 0, 0, 0.0).is_err());
        assert!(Timestamp::new(2024, 13, 1, 0, 0, 0.0).is_err());
        assert!(Timestamp::new(2024, 4, 31, 0, 0, 0.0).is_err());
        assert!(Timestamp::new(2024, 1, 1, 24, 0, 0.0).is_err());
        assert!(Timestamp::new(2024, 1, 1, 0, 60, 0.0).is_err());
        assert!(Timestamp::new(2024, 1, 1, 0, 0, 60.0).is_err());
        assert!(Timestamp::new(2024, 1, 1, 0, 0, f64::NAN).is_err());
        assert!(Timestamp::new(1582, 10, 14, 0, 0, 0.0).is_err());
        assert!(Timestamp::new(2101, 1, 1, 0, 0, 0.0).is_err());
        assert!(Timestamp::new(1582, 10, 15, 0, 0, 0.0).is_ok());
    }

    #[test]
    fn display_includes_offset() {
        let ts = Timestamp::new(1990, 7, 4, 9, 30, 0.0)
            .unwrap()
            .with_offset(FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(ts.to_string(), "1990-07-04T09:30:00.000-05:00");
    }
}
