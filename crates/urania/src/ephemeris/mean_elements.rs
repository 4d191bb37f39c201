//! Built-in low-precision position model.
//!
//! - Sun: mean longitude plus the equation of centre (Meeus ch. 25).
//! - Moon: mean longitude plus the ten largest periodic terms of the
//!   ELP-2000/82 longitude series (Meeus ch. 47).
//! - Planets: JPL "Approximate Positions of the Planets" mean Keplerian
//!   elements (Standish, table 1, valid 1800-2050), Kepler's equation solved
//!   by Newton iteration, heliocentric vectors differenced against the
//!   Earth-Moon barycentre, then precessed from the J2000 ecliptic to the
//!   equinox of date.
//!
//! Typical error is a few arcminutes for the Sun and planets and about
//! 0.3 degrees for the Moon.

use std::f64::consts::TAU;

use crate::angle::normalize_angle;
use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::Body;
use crate::error::Result;
use crate::time::{julian_centuries, JulianDay};

/// General precession in longitude, degrees per Julian century.
const PRECESSION_PER_CENTURY: f64 = 1.396_971_3;

const KEPLER_MAX_ITER: usize = 30;
const KEPLER_TOLERANCE: f64 = 1e-12;

/// Mean orbital elements at J2000 and their rates per Julian century:
/// a (au), e, I (deg), L (deg), long. perihelion (deg), long. node (deg).
struct Elements {
    base: [f64; 6],
    rate: [f64; 6],
}

const MERCURY: Elements = Elements {
    base: [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    rate: [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
};
const VENUS: Elements = Elements {
    base: [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    rate: [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
};
const EARTH_MOON: Elements = Elements {
    base: [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    rate: [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
};
const MARS: Elements = Elements {
    base: [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    rate: [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
};
const JUPITER: Elements = Elements {
    base: [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    rate: [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
};
const SATURN: Elements = Elements {
    base: [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    rate: [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
};
const URANUS: Elements = Elements {
    base: [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
    rate: [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
};
const NEPTUNE: Elements = Elements {
    base: [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
    rate: [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
};
const PLUTO: Elements = Elements {
    base: [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
    rate: [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
};

/// (coefficient in degrees, D, M, M', F) multipliers of the lunar arguments.
const MOON_TERMS: [(f64, f64, f64, f64, f64); 10] = [
    (6.288_774, 0.0, 0.0, 1.0, 0.0),
    (1.274_027, 2.0, 0.0, -1.0, 0.0),
    (0.658_314, 2.0, 0.0, 0.0, 0.0),
    (0.213_618, 0.0, 0.0, 2.0, 0.0),
    (-0.185_116, 0.0, 1.0, 0.0, 0.0),
    (-0.114_332, 0.0, 0.0, 0.0, 2.0),
    (0.058_793, 2.0, 0.0, -2.0, 0.0),
    (0.057_066, 2.0, -1.0, -1.0, 0.0),
    (0.053_322, 2.0, 0.0, 1.0, 0.0),
    (0.045_758, 2.0, -1.0, 0.0, 0.0),
];

/// The built-in analytic position model.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanElements;

impl MeanElements {
    pub fn new() -> Self {
        Self
    }
}

impl PositionProvider for MeanElements {
    fn longitude(&self, body: Body, jd: JulianDay) -> Result<f64> {
        let t = julian_centuries(jd);
        let lon = match body {
            Body::Sun => sun_longitude(t),
            Body::Moon => moon_longitude(t),
            Body::Mercury => planet_longitude(&MERCURY, t),
            Body::Venus => planet_longitude(&VENUS, t),
            Body::Mars => planet_longitude(&MARS, t),
            Body::Jupiter => planet_longitude(&JUPITER, t),
            Body::Saturn => planet_longitude(&SATURN, t),
            Body::Uranus => planet_longitude(&URANUS, t),
            Body::Neptune => planet_longitude(&NEPTUNE, t),
            Body::Pluto => planet_longitude(&PLUTO, t),
        };
        Ok(normalize_angle(lon))
    }
}

/// Longitude of `body` from the built-in model.
pub fn body_longitude(body: Body, jd: JulianDay) -> Result<f64> {
    MeanElements.longitude(body, jd)
}

fn sun_longitude(t: f64) -> f64 {
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    l0 + c
}

fn moon_longitude(t: f64) -> f64 {
    let mean_lon = 218.316_447_7 + 481_267.881_234_21 * t;
    let d = (297.850_192_1 + 445_267.111_403_4 * t).to_radians();
    let m = (357.529_109_2 + 35_999.050_290_9 * t).to_radians();
    let mp = (134.963_396_4 + 477_198.867_505_5 * t).to_radians();
    let f = (93.272_095_0 + 483_202.017_523_3 * t).to_radians();

    let periodic: f64 = MOON_TERMS
        .iter()
        .map(|&(coef, kd, km, kmp, kf)| coef * (kd * d + km * m + kmp * mp + kf * f).sin())
        .sum();
    mean_lon + periodic
}

fn planet_longitude(planet: &Elements, t: f64) -> f64 {
    let [px, py, _] = heliocentric(planet, t);
    let [ex, ey, _] = heliocentric(&EARTH_MOON, t);
    let lon_j2000 = (py - ey).atan2(px - ex).to_degrees();
    lon_j2000 + PRECESSION_PER_CENTURY * t
}

/// Heliocentric ecliptic (J2000) rectangular coordinates in au.
fn heliocentric(el: &Elements, t: f64) -> [f64; 3] {
    let at = |i: usize| el.base[i] + el.rate[i] * t;
    let (a, e) = (at(0), at(1));
    let incl = at(2).to_radians();
    let mean_lon = at(3);
    let peri = at(4);
    let node = at(5);

    let arg_peri = (peri - node).to_radians();
    let node = node.to_radians();
    // Mean anomaly folded to [-180, 180) for a well-behaved Newton start
    let mean_anomaly = (normalize_angle(mean_lon - peri + 180.0) - 180.0).to_radians();
    let ecc_anomaly = solve_kepler(mean_anomaly, e);

    let xp = a * (ecc_anomaly.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sw, cw) = arg_peri.sin_cos();
    let (so, co) = node.sin_cos();
    let (si, ci) = incl.sin_cos();

    [
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        (sw * si) * xp + (cw * si) * yp,
    ]
}

/// Solve `E - e·sin(E) = M` (radians) by Newton iteration.
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    ecc.rem_euclid(TAU)
}
