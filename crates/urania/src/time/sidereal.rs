//! Greenwich and local mean sidereal time, in degrees.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), eq. 12.4 (GMST) and
//! eq. 22.2 (mean obliquity, IAU 1980).

use super::julian::{julian_centuries, J2000_JD};
use super::types::JulianDay;
use crate::angle::normalize_angle;
use crate::error::{ChartError, Result};

/// Default obliquity of the ecliptic in degrees.
///
/// Callers can override it everywhere an obliquity is accepted; it drifts by
/// roughly 47 arcseconds per century.
pub const DEFAULT_OBLIQUITY: f64 = 23.43661;

/// Accept an obliquity only when it is finite and strictly inside (0, 90).
pub fn check_obliquity(obliquity: f64) -> Result<f64> {
    if obliquity.is_finite() && obliquity > 0.0 && obliquity < 90.0 {
        Ok(obliquity)
    } else {
        Err(ChartError::setting("obliquity", obliquity, "must be within (0, 90) degrees"))
    }
}

/// Greenwich Mean Sidereal Time in degrees, [0, 360).
///
/// `θ0 = 280.46061837 + 360.98564736629·(JD − J2000) + 0.000387933·T² − T³/38710000`
pub fn greenwich_mean_sidereal_time(jd: JulianDay) -> f64 {
    let t = julian_centuries(jd);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd.0 - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_angle(theta)
}

/// Local Sidereal Time in degrees from GMST and east-positive longitude.
pub fn local_sidereal_time(gmst: f64, longitude: f64) -> f64 {
    normalize_angle(gmst + longitude)
}

/// GMST and LST composed: the sidereal time at `longitude` for a Julian Day.
pub fn sidereal_time(jd: JulianDay, longitude: f64) -> f64 {
    local_sidereal_time(greenwich_mean_sidereal_time(jd), longitude)
}

/// Mean obliquity of the ecliptic of date, in degrees.
pub fn mean_obliquity(jd: JulianDay) -> f64 {
    let t = julian_centuries(jd);
    let arcsec = 21.448 - 46.815 * t - 0.000_59 * t * t + 0.001_813 * t * t * t;
    23.0 + 26.0 / 60.0 + arcsec / 3600.0
}
