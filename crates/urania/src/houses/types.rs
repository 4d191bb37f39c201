use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::angle::forward_arc;
use crate::error::{ChartError, Result};

/// Maximum |latitude| accepted by the Placidus system.
pub const PLACIDUS_MAX_LATITUDE: f64 = 60.0;

/// House division systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    /// Semi-arc trisection in time.
    #[default]
    Placidus,
    /// Trisection of the MC degree's diurnal semi-arc (birthplace system).
    Koch,
    /// 30 degree houses from the Ascendant.
    Equal,
    /// Space trisection of each quadrant arc on the ecliptic.
    Porphyry,
    /// 30 degree arcs of the celestial equator projected from the horizon poles.
    Regiomontanus,
}

/// Name <-> variant mapping, also used for error messages.
const HOUSE_SYSTEMS: &[(&str, HouseSystem)] = &[
    ("placidus", HouseSystem::Placidus),
    ("koch", HouseSystem::Koch),
    ("equal", HouseSystem::Equal),
    ("porphyry", HouseSystem::Porphyry),
    ("regiomontanus", HouseSystem::Regiomontanus),
];

impl HouseSystem {
    pub const ALL: [HouseSystem; 5] = [
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::Equal,
        HouseSystem::Porphyry,
        HouseSystem::Regiomontanus,
    ];

    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, sys)| *sys == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Largest |latitude| the system accepts for a given obliquity, if it is
    /// stricter than the ascendant's own pole restriction.
    pub fn latitude_limit(self, obliquity: f64) -> Option<f64> {
        match self {
            HouseSystem::Placidus => Some(PLACIDUS_MAX_LATITUDE),
            HouseSystem::Koch => Some(90.0 - obliquity),
            HouseSystem::Equal | HouseSystem::Porphyry | HouseSystem::Regiomontanus => None,
        }
    }

    /// Whether cusps 10 and 4 sit on the meridian.
    pub fn is_quadrant(self) -> bool {
        !matches!(self, HouseSystem::Equal)
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, sys)| *sys)
            .ok_or_else(|| ChartError::UnknownHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
            })
    }
}

/// A single house cusp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number, 1..=12
    pub house: u8,
    /// Longitude in degrees, [0, 360)
    pub lon: f64,
}

/// A complete set of twelve cusps plus the angles they were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub system: HouseSystem,
    pub ascendant: f64,
    pub midheaven: f64,
    pub cusps: [HouseCusp; 12],
}

impl HouseCusps {
    pub(crate) fn from_longitudes(
        system: HouseSystem,
        ascendant: f64,
        midheaven: f64,
        lons: [f64; 12],
    ) -> Self {
        let cusps = std::array::from_fn(|i| HouseCusp {
            house: (i + 1) as u8,
            lon: lons[i],
        });
        Self {
            system,
            ascendant,
            midheaven,
            cusps,
        }
    }

    /// Cusp of house `house` (1-based).
    pub fn cusp(&self, house: u8) -> Option<f64> {
        match house {
            1..=12 => Some(self.cusps[(house - 1) as usize].lon),
            _ => None,
        }
    }

    pub fn longitudes(&self) -> [f64; 12] {
        std::array::from_fn(|i| self.cusps[i].lon)
    }

    pub fn descendant(&self) -> f64 {
        crate::angle::normalize_angle(self.ascendant + 180.0)
    }

    pub fn imum_coeli(&self) -> f64 {
        crate::angle::normalize_angle(self.midheaven + 180.0)
    }

    /// House (1..=12) whose arc `[cusp n, cusp n+1)` contains `lon`.
    pub fn house_of(&self, lon: f64) -> u8 {
        for i in 0..12 {
            let start = self.cusps[i].lon;
            let end = self.cusps[(i + 1) % 12].lon;
            if forward_arc(start, lon) < forward_arc(start, end) {
                return (i + 1) as u8;
            }
        }
        // Only reachable for degenerate cusps where every arc is empty
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        for sys in HouseSystem::ALL {
            assert_eq!(sys.to_string().parse::<HouseSystem>().unwrap(), sys);
        }
        assert_eq!("Placidus".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
    }

    #[test]
    fn unknown_system_lists_valid_names() {
        let err = "campanus".parse::<HouseSystem>().unwrap_err();
        match err {
            ChartError::UnknownHouseSystem { valid, .. } => assert!(valid.contains(&"koch".to_string())),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn house_of_handles_wrap() {
        let lons: [f64; 12] = std::array::from_fn(|i| crate::angle::normalize_angle(350.0 + 30.0 * i as f64));
        let cusps = HouseCusps::from_longitudes(HouseSystem::Equal, 350.0, 260.0, lons);
        assert_eq!(cusps.house_of(355.0), 1);
        assert_eq!(cusps.house_of(5.0), 1);
        assert_eq!(cusps.house_of(20.0), 2);
        assert_eq!(cusps.house_of(349.0), 12);
    }
}
