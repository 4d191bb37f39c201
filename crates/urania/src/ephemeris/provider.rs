use crate::angle::signed_difference;
use crate::ephemeris::types::{Body, BodyPosition};
use crate::error::Result;
use crate::time::JulianDay;

/// Default half-width, in days, of the central difference used for speeds.
pub const DEFAULT_SPEED_STEP: f64 = 0.5;

/// Source of tropical ecliptic longitudes.
///
/// This is the single seam for swapping the built-in low-precision model for
/// a full ephemeris: house and aspect code only ever see `BodyPosition`s.
/// Implementations must be pure: the same `(body, jd)` always gives the same
/// longitude.
pub trait PositionProvider {
    /// Apparent tropical longitude of `body` at `jd`, degrees in [0, 360).
    ///
    /// Providers that do not model a body return `UnsupportedBody`.
    fn longitude(&self, body: Body, jd: JulianDay) -> Result<f64>;

    /// Longitude speed in degrees/day from a central difference of width
    /// `2 * step` days.
    fn speed(&self, body: Body, jd: JulianDay, step: f64) -> Result<f64> {
        let before = self.longitude(body, jd.add_days(-step))?;
        let after = self.longitude(body, jd.add_days(step))?;
        Ok(signed_difference(after, before) / (2.0 * step))
    }

    /// Longitude and speed together.
    fn position(&self, body: Body, jd: JulianDay, step: f64) -> Result<BodyPosition> {
        let lon = self.longitude(body, jd)?;
        let speed = self.speed(body, jd, step)?;
        Ok(BodyPosition::new(body, lon).with_speed(speed))
    }

    /// Positions for several bodies; fails on the first unsupported body.
    fn positions(&self, bodies: &[Body], jd: JulianDay, step: f64) -> Result<Vec<BodyPosition>> {
        bodies
            .iter()
            .map(|&body| self.position(body, jd, step))
            .collect()
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn longitude(&self, body: Body, jd: JulianDay) -> Result<f64> {
        (**self).longitude(body, jd)
    }
}
