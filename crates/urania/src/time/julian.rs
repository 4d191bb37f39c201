//! Gregorian calendar <-> Julian Day conversion.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), chapter 7.

use chrono::FixedOffset;

use super::types::{JulianDay, Timestamp, MAX_DATE};
use crate::error::{ChartError, Result};

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

const SECONDS_PER_DAY: f64 = 86_400.0;
const MILLIS_PER_DAY: i64 = 86_400_000;

/// Julian Day (UT) of a validated timestamp.
///
/// January and February are counted as months 13 and 14 of the previous
/// year; `B` is the Gregorian century correction. The UTC offset is removed
/// so the result is always on the UT scale.
pub fn julian_day(ts: &Timestamp) -> JulianDay {
    let (mut y, mut m) = (ts.year() as f64, ts.month() as f64);
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    let day = ts.day() as f64;

    let jd0 = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5;
    let seconds = ts.seconds_of_day() - ts.utc_offset_secs() as f64;
    JulianDay(jd0 + seconds / SECONDS_PER_DAY)
}

/// Validate the fields and convert in one step.
pub fn julian_day_from_fields(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
) -> Result<JulianDay> {
    let ts = Timestamp::new(year, month, day, hour, minute, second)?;
    Ok(julian_day(&ts))
}

/// Inverse of [`julian_day`]: the UTC calendar instant of a Julian Day.
///
/// The time of day is resolved to whole milliseconds; an f64 Julian Day
/// near the present carries about 4e-5 s of rounding error, so finer
/// digits are noise. A time that rounds up to midnight rolls into the next
/// date, except at the end of the last supported date, which stays at
/// 23:59:59.999. Fails with `InvalidTimestamp` when the day falls outside
/// the supported Gregorian range.
pub fn calendar_from_julian_day(jd: JulianDay) -> Result<Timestamp> {
    if !jd.0.is_finite() {
        return Err(ChartError::timestamp(format!("{} is not a finite Julian Day", jd.0)));
    }
    let shifted = jd.0 + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let mut day_start = z;
    let mut day_ms = (f * MILLIS_PER_DAY as f64).round() as i64;
    if day_ms >= MILLIS_PER_DAY {
        day_start += 1.0;
        day_ms -= MILLIS_PER_DAY;
    }
    let (mut year, mut month, mut day) = civil_date(day_start);
    // Midnight closing the last supported day belongs to that day
    if day_ms == 0 && civil_date(day_start - 1.0) == MAX_DATE {
        (year, month, day) = MAX_DATE;
        day_ms = MILLIS_PER_DAY - 1;
    }

    let hour = (day_ms / 3_600_000) as u32;
    let minute = (day_ms % 3_600_000 / 60_000) as u32;
    let second = (day_ms % 60_000) as f64 / 1000.0;

    Timestamp::new(year, month, day, hour, minute, second)
}

/// Gregorian (year, month, day) of the civil day starting at JD `z - 0.5`.
fn civil_date(z: f64) -> (i32, u32, u32) {
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 } as u32;
    let year = if month > 2 { c - 4716.0 } else { c - 4715.0 } as i32;
    (year, month, day)
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries(jd: JulianDay) -> f64 {
    (jd.0 - J2000_JD) / DAYS_PER_CENTURY
}

/// Express a UT Julian Day as civil time at `offset`.
pub fn calendar_from_julian_day_at(jd: JulianDay, offset: FixedOffset) -> Result<Timestamp> {
    let local = JulianDay(jd.0 + offset.local_minus_utc() as f64 / SECONDS_PER_DAY);
    Ok(calendar_from_julian_day(local)?.with_offset(offset))
}
