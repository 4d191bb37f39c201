use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::aspects::{all_aspects, cross_aspects, AspectPair};
use crate::chart::settings::ChartSettings;
use crate::ephemeris::{Body, BodyPosition, GeoLocation, MeanElements, PositionProvider};
use crate::error::{ChartError, Result};
use crate::houses::{houses, HouseCusps};
use crate::time::{julian_day, sidereal_time, JulianDay, Timestamp};
use crate::western::SignPosition;

/// Everything computed for one moment and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub timestamp: Timestamp,
    pub location: GeoLocation,
    pub julian_day: JulianDay,
    /// Local sidereal time, degrees
    pub sidereal_time: f64,
    pub houses: HouseCusps,
    pub positions: Vec<BodyPosition>,
    pub aspects: Vec<AspectPair>,
    pub settings: ChartSettings,
}

impl Chart {
    /// Build a chart from an arbitrary position provider.
    ///
    /// Settings are validated first; an invalid obliquity or speed step is
    /// an `InvalidSetting` error, never a chart full of NaN.
    pub fn compute<P: PositionProvider>(
        timestamp: Timestamp,
        location: GeoLocation,
        settings: &ChartSettings,
        provider: &P,
    ) -> Result<Self> {
        settings.validate()?;
        let jd = julian_day(&timestamp);
        let lst = sidereal_time(jd, location.lon);

        let houses = compute_houses(settings, lst, location.lat)?;
        let positions = provider.positions(&settings.bodies, jd, settings.speed_step_days)?;
        let aspects = all_aspects(&positions, &settings.aspects);

        debug!(
            "Chart at JD {:.5}: {} houses, {} bodies, {} aspects",
            jd.0,
            houses.system,
            positions.len(),
            aspects.len()
        );

        Ok(Self {
            timestamp,
            location,
            julian_day: jd,
            sidereal_time: lst,
            houses,
            positions,
            aspects,
            settings: settings.clone(),
        })
    }

    /// Chart using the built-in position model.
    pub fn natal(timestamp: Timestamp, location: GeoLocation, settings: &ChartSettings) -> Result<Self> {
        Self::compute(timestamp, location, settings, &MeanElements)
    }

    /// Aspects from this chart's bodies to `natal`'s, using this chart's
    /// aspect table.
    pub fn transits_to(&self, natal: &Chart) -> Vec<AspectPair> {
        let pairs = cross_aspects(&self.positions, &natal.positions, &self.settings.aspects);
        debug!("Transits at JD {:.5}: {} aspects", self.julian_day.0, pairs.len());
        pairs
    }

    pub fn ascendant(&self) -> f64 {
        self.houses.ascendant
    }

    pub fn midheaven(&self) -> f64 {
        self.houses.midheaven
    }

    pub fn position(&self, body: Body) -> Option<&BodyPosition> {
        self.positions.iter().find(|p| p.body == body)
    }

    pub fn sign_of(&self, body: Body) -> Option<SignPosition> {
        self.position(body).map(|p| SignPosition::from_longitude(p.lon))
    }

    /// House (1..=12) occupied by `body`.
    pub fn house_of(&self, body: Body) -> Option<u8> {
        self.position(body).map(|p| self.houses.house_of(p.lon))
    }

    /// Aspects involving `body` on either side.
    pub fn aspects_of(&self, body: Body) -> impl Iterator<Item = &AspectPair> {
        self.aspects
            .iter()
            .filter(move |pair| pair.from == body || pair.to == body)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Houses in the configured system, switching to the fallback system only
/// when the primary one rejects the latitude.
fn compute_houses(settings: &ChartSettings, lst: f64, latitude: f64) -> Result<HouseCusps> {
    let primary = houses(settings.house_system, lst, latitude, settings.obliquity);
    match (primary, settings.fallback_house_system) {
        (Err(ChartError::UnsupportedLatitude { system, limit, .. }), Some(fallback)) => {
            warn!(
                "{system} houses unsupported at latitude {latitude} (limit {limit}); using {fallback}"
            );
            houses(fallback, lst, latitude, settings.obliquity)
        }
        (result, _) => result,
    }
}
