//! Ascendant and Midheaven.
//!
//! Source: standard spherical astronomy (Meeus ch. 13). The ascendant form
//! below puts the result in the correct quadrant without a follow-up
//! correction.

use crate::angle::normalize_angle;
use crate::error::{ChartError, Result};
use crate::time::check_obliquity;

/// Ecliptic longitude rising on the eastern horizon.
///
/// `Asc = atan2(cos LST, −sin LST·cos ε − tan φ·sin ε)`
///
/// All arguments in degrees. Fails with `InvalidLatitude` when
/// |latitude| >= 90, where `tan φ` is singular, and with `InvalidSetting`
/// for a non-finite sidereal time or an obliquity outside (0, 90).
pub fn ascendant(local_sidereal_time: f64, latitude: f64, obliquity: f64) -> Result<f64> {
    if !latitude.is_finite() || latitude.abs() >= 90.0 {
        return Err(ChartError::InvalidLatitude { latitude });
    }
    if !local_sidereal_time.is_finite() {
        return Err(ChartError::setting(
            "local sidereal time",
            local_sidereal_time,
            "must be finite",
        ));
    }
    check_obliquity(obliquity)?;
    Ok(ascendant_unchecked(local_sidereal_time, latitude, obliquity))
}

/// The ascendant formula without the latitude check; callers guarantee
/// |latitude| < 90.
pub(crate) fn ascendant_unchecked(local_sidereal_time: f64, latitude: f64, obliquity: f64) -> f64 {
    let lst = local_sidereal_time.to_radians();
    let phi = latitude.to_radians();
    let (sin_eps, cos_eps) = obliquity.to_radians().sin_cos();
    let asc = f64::atan2(lst.cos(), -lst.sin() * cos_eps - phi.tan() * sin_eps);
    normalize_angle(asc.to_degrees())
}

/// Midheaven taken as the local sidereal time itself.
///
/// This is the right ascension of the meridian read directly as an
/// ecliptic longitude; it agrees with the projected MC at the cardinal
/// points and differs by at most about 2.5 degrees in between.
pub fn midheaven(local_sidereal_time: f64) -> f64 {
    normalize_angle(local_sidereal_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DEFAULT_OBLIQUITY;

    #[test]
    fn equator_at_lst_zero_rises_cancer() {
        let asc = ascendant(0.0, 0.0, DEFAULT_OBLIQUITY).unwrap();
        assert!((asc - 90.0).abs() < 1e-12);
    }

    #[test]
    fn asc_is_ahead_of_mc() {
        for i in 0..36 {
            let lst = i as f64 * 10.0;
            let asc = ascendant(lst, 45.0, DEFAULT_OBLIQUITY).unwrap();
            let arc = crate::angle::forward_arc(midheaven(lst), asc);
            assert!(arc > 0.0 && arc < 180.0, "lst {lst}: arc {arc}");
        }
    }

    #[test]
    fn rejects_poles() {
        assert!(matches!(
            ascendant(0.0, 90.0, DEFAULT_OBLIQUITY),
            Err(ChartError::InvalidLatitude { .. })
        ));
        assert!(ascendant(0.0, f64::NAN, DEFAULT_OBLIQUITY).is_err());
    }

    #[test]
    fn rejects_non_finite_inputs() {
        assert!(matches!(
            ascendant(f64::NAN, 40.0, DEFAULT_OBLIQUITY),
            Err(ChartError::InvalidSetting { .. })
        ));
        assert!(matches!(
            ascendant(10.0, 40.0, f64::INFINITY),
            Err(ChartError::InvalidSetting { .. })
        ));
        // Latitude is checked first
        assert!(matches!(
            ascendant(f64::NAN, 95.0, f64::NAN),
            Err(ChartError::InvalidLatitude { .. })
        ));
    }
}
