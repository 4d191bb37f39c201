//! Zodiac signs for tropical longitudes.
//!
//! Each sign spans 30 degrees starting at 0 Aries; each is divided into
//! three 10 degree decans.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::angle::normalize_angle;
use crate::ephemeris::Body;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_NAMES: [&str; 12] = [
    "aries",
    "taurus",
    "gemini",
    "cancer",
    "leo",
    "virgo",
    "libra",
    "scorpio",
    "sagittarius",
    "capricorn",
    "aquarius",
    "pisces",
];

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign from its zero-based index; wraps modulo 12.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// Sign containing `longitude`.
    pub fn from_longitude(longitude: f64) -> Self {
        Self::from_index(sign_index(longitude))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.index()]
    }

    /// Longitude of 0 degrees of this sign.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Planetary ruler; `modern` swaps in the outer planets for Scorpio,
    /// Aquarius and Pisces.
    pub fn ruler(self, modern: bool) -> Body {
        match self {
            ZodiacSign::Aries => Body::Mars,
            ZodiacSign::Taurus | ZodiacSign::Libra => Body::Venus,
            ZodiacSign::Gemini | ZodiacSign::Virgo => Body::Mercury,
            ZodiacSign::Cancer => Body::Moon,
            ZodiacSign::Leo => Body::Sun,
            ZodiacSign::Scorpio if modern => Body::Pluto,
            ZodiacSign::Scorpio => Body::Mars,
            ZodiacSign::Sagittarius => Body::Jupiter,
            ZodiacSign::Capricorn => Body::Saturn,
            ZodiacSign::Aquarius if modern => Body::Uranus,
            ZodiacSign::Aquarius => Body::Saturn,
            ZodiacSign::Pisces if modern => Body::Neptune,
            ZodiacSign::Pisces => Body::Jupiter,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign index (0-11) of a longitude; any real input is accepted.
pub fn sign_index(longitude: f64) -> usize {
    ((normalize_angle(longitude) / 30.0) as usize).min(11)
}

/// A longitude expressed as a sign plus degrees into that sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: ZodiacSign,
    /// Degrees into the sign, [0, 30)
    pub degree: f64,
}

impl SignPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_angle(longitude);
        let sign = ZodiacSign::from_longitude(lon);
        Self {
            sign,
            degree: lon - sign.start_longitude(),
        }
    }

    /// Back to an absolute longitude.
    pub fn longitude(&self) -> f64 {
        self.sign.start_longitude() + self.degree
    }

    /// Decan number, 1..=3.
    pub fn decan(&self) -> u8 {
        ((self.degree / 10.0) as u8).min(2) + 1
    }

    /// Whole degrees and minutes into the sign.
    pub fn degrees_minutes(&self) -> (u32, u32) {
        let total_minutes = (self.degree * 60.0).floor() as u32;
        (total_minutes / 60, total_minutes % 60)
    }
}

impl fmt::Display for SignPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (deg, min) = self.degrees_minutes();
        write!(f, "{deg}°{min:02}' {}", self.sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_boundaries() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(29.999), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(30.0), ZodiacSign::Taurus);
        assert_eq!(ZodiacSign::from_longitude(359.9), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(-0.5), ZodiacSign::Pisces);
    }

    #[test]
    fn elements_cycle() {
        assert_eq!(ZodiacSign::Leo.element(), Element::Fire);
        assert_eq!(ZodiacSign::Capricorn.element(), Element::Earth);
        assert_eq!(ZodiacSign::Aquarius.element(), Element::Air);
        assert_eq!(ZodiacSign::Pisces.element(), Element::Water);
    }

    #[test]
    fn rulers() {
        assert_eq!(ZodiacSign::Scorpio.ruler(false), Body::Mars);
        assert_eq!(ZodiacSign::Scorpio.ruler(true), Body::Pluto);
        assert_eq!(ZodiacSign::Aquarius.ruler(true), Body::Uranus);
        assert_eq!(ZodiacSign::Leo.ruler(true), Body::Sun);
    }

    #[test]
    fn position_in_sign() {
        let pos = SignPosition::from_longitude(280.5);
        assert_eq!(pos.sign, ZodiacSign::Capricorn);
        assert!((pos.degree - 10.5).abs() < 1e-12);
        assert_eq!(pos.decan(), 2);
        assert_eq!(pos.to_string(), "10°30' capricorn");
    }
}
