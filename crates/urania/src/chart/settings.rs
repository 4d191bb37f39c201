use serde::{Deserialize, Serialize};

use crate::aspects::AspectTable;
use crate::ephemeris::{Body, DEFAULT_SPEED_STEP};
use crate::error::{ChartError, Result};
use crate::houses::HouseSystem;
use crate::time::{check_obliquity, DEFAULT_OBLIQUITY};

/// Tunables for one chart computation.
///
/// Missing fields deserialize to their defaults. Fields are public, so
/// [`ChartSettings::validate`] runs before every chart computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    /// Used only when `house_system` rejects the latitude
    pub fallback_house_system: Option<HouseSystem>,
    /// Obliquity of the ecliptic, degrees
    pub obliquity: f64,
    /// Bodies to place, in output order
    pub bodies: Vec<Body>,
    pub aspects: AspectTable,
    /// Half-width of the speed central difference, days
    pub speed_step_days: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::default(),
            fallback_house_system: None,
            obliquity: DEFAULT_OBLIQUITY,
            bodies: Body::ALL.to_vec(),
            aspects: AspectTable::default(),
            speed_step_days: DEFAULT_SPEED_STEP,
        }
    }
}

impl ChartSettings {
    pub fn with_house_system(mut self, system: HouseSystem) -> Self {
        self.house_system = system;
        self
    }

    pub fn with_fallback(mut self, system: HouseSystem) -> Self {
        self.fallback_house_system = Some(system);
        self
    }

    pub fn with_obliquity(mut self, obliquity: f64) -> Self {
        self.obliquity = obliquity;
        self
    }

    pub fn with_bodies(mut self, bodies: Vec<Body>) -> Self {
        self.bodies = bodies;
        self
    }

    pub fn with_aspects(mut self, aspects: AspectTable) -> Self {
        self.aspects = aspects;
        self
    }

    pub fn with_speed_step(mut self, days: f64) -> Self {
        self.speed_step_days = days;
        self
    }

    /// Reject numeric tunables that would otherwise yield NaN positions or
    /// cusps. The aspect table validates itself on construction.
    pub fn validate(&self) -> Result<()> {
        check_obliquity(self.obliquity)?;
        if !(self.speed_step_days.is_finite() && self.speed_step_days > 0.0) {
            return Err(ChartError::setting(
                "speed_step_days",
                self.speed_step_days,
                "must be a positive number of days",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let settings: ChartSettings =
            serde_json::from_str(r#"{"house_system":"koch","bodies":["sun","moon"]}"#).unwrap();
        assert_eq!(settings.house_system, HouseSystem::Koch);
        assert_eq!(settings.bodies, vec![Body::Sun, Body::Moon]);
        assert_eq!(settings.obliquity, DEFAULT_OBLIQUITY);
        assert_eq!(settings.aspects, AspectTable::default());
        assert_eq!(settings.fallback_house_system, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_tunables() {
        let zero_step: ChartSettings = serde_json::from_str(r#"{"speed_step_days":0.0}"#).unwrap();
        assert!(matches!(
            zero_step.validate(),
            Err(ChartError::InvalidSetting { ref name, .. }) if name == "speed_step_days"
        ));
        assert!(ChartSettings::default().with_speed_step(f64::NAN).validate().is_err());
        assert!(ChartSettings::default().with_obliquity(-400.0).validate().is_err());
        assert!(ChartSettings::default().with_obliquity(f64::INFINITY).validate().is_err());
    }
}
