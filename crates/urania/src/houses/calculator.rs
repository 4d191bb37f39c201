//! House cusp computation for every supported system.
//!
//! Cusps 1/7 and 4/10 are the horizon and meridian axes in the quadrant
//! systems. Intermediate cusps 11, 12, 2 and 3 are computed directly and
//! 5, 6, 8, 9 are their opposites, so `cusp[i]` and `cusp[i + 6]` are
//! always 180 degrees apart.
//!
//! Sources: Meeus ch. 13; Holden, "A Treatise on House Systems";
//! the Koch and Regiomontanus pole-height forms follow the Swiss Ephemeris
//! house documentation.

use std::f64::consts::FRAC_PI_2;

use crate::angle::{forward_arc, normalize_angle};
use crate::error::{ChartError, Result};
use crate::houses::angles::{ascendant, ascendant_unchecked, midheaven};
use crate::houses::types::{HouseCusps, HouseSystem};

const PLACIDUS_MAX_ITER: usize = 100;
const PLACIDUS_TOLERANCE: f64 = 1e-12;

/// Compute the twelve cusps of `system`.
///
/// `latitude` and `obliquity` in degrees; `local_sidereal_time` in degrees
/// (equal to the RAMC). Either all twelve cusps are returned or an error:
/// `InvalidLatitude` first, then `InvalidSetting` for a non-finite sidereal
/// time or an obliquity outside (0, 90), then the system's own limit.
pub fn houses(
    system: HouseSystem,
    local_sidereal_time: f64,
    latitude: f64,
    obliquity: f64,
) -> Result<HouseCusps> {
    let asc = ascendant(local_sidereal_time, latitude, obliquity)?;
    let mc = midheaven(local_sidereal_time);

    if let Some(limit) = system.latitude_limit(obliquity) {
        let exceeds = match system {
            // Koch is undefined on the polar circle itself
            HouseSystem::Koch => latitude.abs() >= limit,
            _ => latitude.abs() > limit,
        };
        if exceeds {
            return Err(ChartError::UnsupportedLatitude {
                system: system.to_string(),
                latitude,
                limit,
            });
        }
    }

    let lons = match system {
        HouseSystem::Equal => equal(asc),
        HouseSystem::Porphyry => porphyry(asc, mc),
        HouseSystem::Placidus => placidus(asc, mc, local_sidereal_time, latitude, obliquity)?,
        HouseSystem::Koch => koch(asc, mc, local_sidereal_time, latitude, obliquity)?,
        HouseSystem::Regiomontanus => regiomontanus(asc, mc, local_sidereal_time, latitude, obliquity),
    };

    Ok(HouseCusps::from_longitudes(system, asc, mc, lons))
}

/// Convenience wrapper returning bare longitudes.
pub fn house_cusps(
    system: HouseSystem,
    local_sidereal_time: f64,
    latitude: f64,
    obliquity: f64,
) -> Result<[f64; 12]> {
    Ok(houses(system, local_sidereal_time, latitude, obliquity)?.longitudes())
}

fn equal(asc: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_angle(asc + 30.0 * i as f64))
}

/// Fill cusps from the axes and the four computed intermediates
/// (houses 11, 12, 2, 3); the rest are opposites.
fn assemble(asc: f64, mc: f64, c11: f64, c12: f64, c2: f64, c3: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    cusps[0] = asc;
    cusps[1] = c2;
    cusps[2] = c3;
    cusps[9] = mc;
    cusps[10] = c11;
    cusps[11] = c12;
    for i in [0, 1, 2, 9, 10, 11] {
        cusps[(i + 6) % 12] = normalize_angle(cusps[i] + 180.0);
    }
    cusps
}

fn porphyry(asc: f64, mc: f64) -> [f64; 12] {
    let upper = forward_arc(mc, asc);
    let ic = normalize_angle(mc + 180.0);
    let lower = forward_arc(asc, ic);
    assemble(
        asc,
        mc,
        normalize_angle(mc + upper / 3.0),
        normalize_angle(mc + 2.0 * upper / 3.0),
        normalize_angle(asc + lower / 3.0),
        normalize_angle(asc + 2.0 * lower / 3.0),
    )
}

fn placidus(asc: f64, mc: f64, ramc: f64, lat: f64, eps: f64) -> Result<[f64; 12]> {
    let cusp = |fraction: f64, diurnal: bool| placidus_cusp(ramc, lat, eps, fraction, diurnal);
    Ok(assemble(
        asc,
        mc,
        cusp(1.0 / 3.0, true)?,
        cusp(2.0 / 3.0, true)?,
        cusp(2.0 / 3.0, false)?,
        cusp(1.0 / 3.0, false)?,
    ))
}

/// One Placidus cusp by fixed-point iteration on right ascension.
///
/// Above the horizon the cusp's RA is `RAMC + f·SA_d`; below it is
/// `RAMC + 180° − f·SA_n`, where the semi-arcs belong to the cusp's own
/// declination.
fn placidus_cusp(ramc: f64, lat: f64, eps: f64, fraction: f64, diurnal: bool) -> Result<f64> {
    let ramc_r = ramc.to_radians();
    let tan_phi = lat.to_radians().tan();
    let eps_r = eps.to_radians();
    let tan_eps = eps_r.tan();

    let next_ra = |semi_arc_d: f64| {
        if diurnal {
            ramc_r + fraction * semi_arc_d
        } else {
            ramc_r + std::f64::consts::PI - fraction * (std::f64::consts::PI - semi_arc_d)
        }
    };

    let mut ra = next_ra(FRAC_PI_2);
    for _ in 0..PLACIDUS_MAX_ITER {
        let dec = (tan_eps * ra.sin()).atan();
        let cos_h = -tan_phi * dec.tan();
        if cos_h.abs() > 1.0 {
            return Err(unsupported(HouseSystem::Placidus, lat, eps));
        }
        let updated = next_ra(cos_h.acos());
        let done = (updated - ra).abs() < PLACIDUS_TOLERANCE;
        ra = updated;
        if done {
            return Ok(ecliptic_from_ra(ra, eps_r));
        }
    }
    Err(unsupported(HouseSystem::Placidus, lat, eps))
}

fn koch(asc: f64, mc: f64, ramc: f64, lat: f64, eps: f64) -> Result<[f64; 12]> {
    let tan_dec_mc = eps.to_radians().tan() * ramc.to_radians().sin();
    let x = lat.to_radians().tan() * tan_dec_mc;
    if x.abs() >= 1.0 {
        return Err(unsupported(HouseSystem::Koch, lat, eps));
    }
    // One third of the MC degree's ascensional difference
    let ad3 = x.asin().to_degrees() / 3.0;
    let at = |oblique_ramc: f64| ascendant_unchecked(oblique_ramc, lat, eps);
    Ok(assemble(
        asc,
        mc,
        at(ramc - 60.0 - 2.0 * ad3),
        at(ramc - 30.0 - ad3),
        at(ramc + 30.0 + ad3),
        at(ramc + 60.0 + 2.0 * ad3),
    ))
}

fn regiomontanus(asc: f64, mc: f64, ramc: f64, lat: f64, eps: f64) -> [f64; 12] {
    let tan_phi = lat.to_radians().tan();
    let pole_30 = (tan_phi * 0.5).atan().to_degrees();
    let pole_60 = (tan_phi * 30f64.to_radians().cos()).atan().to_degrees();
    assemble(
        asc,
        mc,
        ascendant_unchecked(ramc - 60.0, pole_30, eps),
        ascendant_unchecked(ramc - 30.0, pole_60, eps),
        ascendant_unchecked(ramc + 30.0, pole_60, eps),
        ascendant_unchecked(ramc + 60.0, pole_30, eps),
    )
}

/// Ecliptic longitude of the ecliptic point with right ascension `ra`.
fn ecliptic_from_ra(ra: f64, eps: f64) -> f64 {
    normalize_angle(f64::atan2(ra.sin(), ra.cos() * eps.cos()).to_degrees())
}

fn unsupported(system: HouseSystem, latitude: f64, obliquity: f64) -> ChartError {
    ChartError::UnsupportedLatitude {
        system: system.to_string(),
        latitude,
        limit: system.latitude_limit(obliquity).unwrap_or(90.0),
    }
}
