use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::Body;
use crate::error::{ChartError, Result};

/// Largest orb an aspect table accepts, in degrees.
pub const MAX_ORB: f64 = 15.0;

/// Deviation below which an aspect counts as exact.
pub const EXACT_THRESHOLD: f64 = 0.1;

/// Named angular relationships between two longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Quintile,
    Square,
    Trine,
    Sesquiquadrate,
    Biquintile,
    Quincunx,
    Opposition,
}

/// (name, kind, exact angle, default orb), in default table order.
const ASPECT_KINDS: &[(&str, AspectKind, f64, f64)] = &[
    ("conjunction", AspectKind::Conjunction, 0.0, 8.0),
    ("semi_sextile", AspectKind::SemiSextile, 30.0, 2.0),
    ("semi_square", AspectKind::SemiSquare, 45.0, 2.0),
    ("sextile", AspectKind::Sextile, 60.0, 6.0),
    ("quintile", AspectKind::Quintile, 72.0, 2.0),
    ("square", AspectKind::Square, 90.0, 8.0),
    ("trine", AspectKind::Trine, 120.0, 8.0),
    ("sesquiquadrate", AspectKind::Sesquiquadrate, 135.0, 2.0),
    ("biquintile", AspectKind::Biquintile, 144.0, 2.0),
    ("quincunx", AspectKind::Quincunx, 150.0, 3.0),
    ("opposition", AspectKind::Opposition, 180.0, 8.0),
];

impl AspectKind {
    pub const ALL: [AspectKind; 11] = [
        AspectKind::Conjunction,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::Sextile,
        AspectKind::Quintile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Sesquiquadrate,
        AspectKind::Biquintile,
        AspectKind::Quincunx,
        AspectKind::Opposition,
    ];

    fn entry(self) -> &'static (&'static str, AspectKind, f64, f64) {
        // ASPECT_KINDS is indexed in declaration order
        &ASPECT_KINDS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().0
    }

    /// Exact angle in degrees.
    pub fn angle(self) -> f64 {
        self.entry().2
    }

    pub fn default_orb(self) -> f64 {
        self.entry().3
    }

    /// Ptolemaic aspects.
    pub fn is_major(self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction
                | AspectKind::Sextile
                | AspectKind::Square
                | AspectKind::Trine
                | AspectKind::Opposition
        )
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = ChartError;

    /// Accepts `semi_square`, `semi-square` and `semisquare` alike.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();
        ASPECT_KINDS
            .iter()
            .find(|(name, ..)| name.replace('_', "") == key)
            .map(|(_, kind, ..)| *kind)
            .ok_or_else(|| ChartError::UnknownAspect {
                aspect: s.to_string(),
                valid: ASPECT_KINDS.iter().map(|(name, ..)| name.to_string()).collect(),
            })
    }
}

/// One row of an aspect table: which aspect, and how far from exact it may be.
///
/// Only [`AspectDefinition::new`] builds one, deserialization included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAspectDefinition")]
pub struct AspectDefinition {
    kind: AspectKind,
    orb: f64,
}

#[derive(Deserialize)]
struct RawAspectDefinition {
    kind: AspectKind,
    orb: f64,
}

impl TryFrom<RawAspectDefinition> for AspectDefinition {
    type Error = ChartError;

    fn try_from(raw: RawAspectDefinition) -> Result<Self> {
        Self::new(raw.kind, raw.orb)
    }
}

impl AspectDefinition {
    /// Fails with `InvalidOrb` unless `0 < orb <= MAX_ORB`.
    pub fn new(kind: AspectKind, orb: f64) -> Result<Self> {
        if !(orb > 0.0 && orb <= MAX_ORB) {
            return Err(ChartError::InvalidOrb {
                aspect: kind.to_string(),
                orb,
                max: MAX_ORB,
            });
        }
        Ok(Self { kind, orb })
    }

    pub fn kind(&self) -> AspectKind {
        self.kind
    }

    pub fn orb(&self) -> f64 {
        self.orb
    }

    pub fn angle(&self) -> f64 {
        self.kind.angle()
    }
}

/// An immutable set of aspect definitions passed into every aspect search.
///
/// Entry order is the tie-break order when two aspects match with the same
/// deviation. Deserialization runs the same orb validation as `new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AspectDefinition>", into = "Vec<AspectDefinition>")]
pub struct AspectTable {
    entries: Vec<AspectDefinition>,
}

impl AspectTable {
    /// Validated table. A kind listed twice keeps its last orb.
    pub fn new(entries: Vec<AspectDefinition>) -> Result<Self> {
        let mut table = Self {
            entries: Vec::with_capacity(entries.len()),
        };
        for def in entries {
            table = table.with_orb(def.kind, def.orb)?;
        }
        Ok(table)
    }

    /// The five Ptolemaic aspects with their default orbs.
    pub fn major() -> Self {
        Self {
            entries: AspectKind::ALL
                .into_iter()
                .filter(|k| k.is_major())
                .map(|kind| AspectDefinition {
                    kind,
                    orb: kind.default_orb(),
                })
                .collect(),
        }
    }

    /// Set the orb of `kind`, adding it to the end of the table if absent.
    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Result<Self> {
        let def = AspectDefinition::new(kind, orb)?;
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(existing) => existing.orb = orb,
            None => self.entries.push(def),
        }
        Ok(self)
    }

    /// Drop `kind` from the table.
    pub fn without(mut self, kind: AspectKind) -> Self {
        self.entries.retain(|e| e.kind != kind);
        self
    }

    pub fn orb(&self, kind: AspectKind) -> Option<f64> {
        self.entries.iter().find(|e| e.kind == kind).map(|e| e.orb)
    }

    pub fn entries(&self) -> &[AspectDefinition] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &AspectDefinition> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AspectTable {
    /// All eleven aspects with their default orbs.
    fn default() -> Self {
        Self {
            entries: AspectKind::ALL
                .into_iter()
                .map(|kind| AspectDefinition {
                    kind,
                    orb: kind.default_orb(),
                })
                .collect(),
        }
    }
}

impl TryFrom<Vec<AspectDefinition>> for AspectTable {
    type Error = ChartError;

    fn try_from(entries: Vec<AspectDefinition>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<AspectTable> for Vec<AspectDefinition> {
    fn from(table: AspectTable) -> Self {
        table.entries
    }
}

/// Whether an aspect is closing toward exactness or opening away from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectMotion {
    Applying,
    Separating,
}

/// A matched aspect between two longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub kind: AspectKind,
    /// Exact angle of `kind`
    pub angle: f64,
    /// Orb the match was made with
    pub orb: f64,
    /// Shortest-arc distance between the two longitudes, [0, 180]
    pub separation: f64,
    /// |angle - separation|
    pub deviation: f64,
    /// 1.0 at exact, 0.0 at the orb boundary
    pub strength: f64,
    pub exact: bool,
    /// Known only when both bodies carry a speed
    pub motion: Option<AspectMotion>,
}

impl Aspect {
    pub fn is_applying(&self) -> bool {
        self.motion == Some(AspectMotion::Applying)
    }
}

/// An aspect together with the two bodies that form it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectPair {
    pub from: Body,
    pub to: Body,
    pub aspect: Aspect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_table_matches_declaration_order() {
        for (i, kind) in AspectKind::ALL.into_iter().enumerate() {
            assert_eq!(ASPECT_KINDS[i].1, kind);
        }
    }

    #[test]
    fn parse_accepts_separators() {
        assert_eq!("semi-square".parse::<AspectKind>().unwrap(), AspectKind::SemiSquare);
        assert_eq!("Semi Sextile".parse::<AspectKind>().unwrap(), AspectKind::SemiSextile);
        assert_eq!("quincunx".parse::<AspectKind>().unwrap(), AspectKind::Quincunx);
        assert!(matches!(
            "novile".parse::<AspectKind>(),
            Err(ChartError::UnknownAspect { .. })
        ));
    }

    #[test]
    fn orb_bounds() {
        assert!(AspectDefinition::new(AspectKind::Trine, 0.0).is_err());
        assert!(AspectDefinition::new(AspectKind::Trine, -1.0).is_err());
        assert!(AspectDefinition::new(AspectKind::Trine, 15.5).is_err());
        assert!(AspectDefinition::new(AspectKind::Trine, f64::NAN).is_err());
        assert!(AspectDefinition::new(AspectKind::Trine, 15.0).is_ok());
    }

    #[test]
    fn with_orb_replaces_in_place() {
        let table = AspectTable::major().with_orb(AspectKind::Square, 5.0).unwrap();
        assert_eq!(table.orb(AspectKind::Square), Some(5.0));
        assert_eq!(table.entries().len(), 5);
        assert_eq!(table.entries()[2].kind, AspectKind::Square);
    }

    #[test]
    fn deserialize_validates_orbs() {
        let bad = r#"[{"kind":"trine","orb":20.0}]"#;
        assert!(serde_json::from_str::<AspectTable>(bad).is_err());
        let good = r#"[{"kind":"trine","orb":6.0}]"#;
        let table: AspectTable = serde_json::from_str(good).unwrap();
        assert_eq!(table.orb(AspectKind::Trine), Some(6.0));
    }
}
