use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, Result};

/// Geographic location coordinates (north/east positive, degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Validated constructor: |lat| < 90 and lon within [-180, 180].
    ///
    /// The poles are rejected because every ascendant and house formula is
    /// singular there.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || lat.abs() >= 90.0 {
            return Err(ChartError::InvalidLatitude { latitude: lat });
        }
        if !lon.is_finite() || lon.abs() > 180.0 {
            return Err(ChartError::InvalidLongitude { longitude: lon });
        }
        Ok(Self { lat, lon })
    }
}

/// The ten canonical chart bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// All bodies in traditional chart order.
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    /// Sun and Moon never station; every other body can.
    pub fn can_retrograde(self) -> bool {
        !matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.name() == lower)
            .ok_or_else(|| ChartError::UnsupportedBody {
                body: s.to_string(),
                valid: Body::ALL.iter().map(|b| b.name().to_string()).collect(),
            })
    }
}

/// A body's tropical longitude and, optionally, its speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Longitude in degrees, [0, 360)
    pub lon: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: Option<f64>,
}

impl BodyPosition {
    pub fn new(body: Body, lon: f64) -> Self {
        Self {
            body,
            lon: crate::angle::normalize_angle(lon),
            speed_lon: None,
        }
    }

    pub fn with_speed(self, speed_lon: f64) -> Self {
        Self {
            speed_lon: Some(speed_lon),
            ..self
        }
    }

    /// Retrograde when the longitude speed is known and negative.
    pub fn is_retrograde(&self) -> bool {
        self.speed_lon.is_some_and(|s| s < 0.0)
    }
}
