use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use urania::aspects::{AspectKind, AspectTable};
use urania::ephemeris::Body;
use urania::houses::HouseSystem;
use urania::ChartSettings;

/// Relative locations tried, in order, when no explicit path is given.
pub const CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    fallback_house_system: Option<String>,
    #[serde(default)]
    obliquity: Option<f64>,
    #[serde(default)]
    bodies: Option<Vec<String>>,
    #[serde(default)]
    speed_step_days: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AspectsToml {
    /// Start from the five Ptolemaic aspects instead of all eleven
    #[serde(default)]
    major_only: bool,
    /// Per-aspect orb overrides; naming an aspect absent from the base table adds it
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartToml>,
    #[serde(default)]
    aspects: Option<AspectsToml>,
}

/// Try the common relative paths for `configs/urania.toml`.
pub fn read_config_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            info!("Loaded chart settings from {p}");
            return Ok(text);
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", CONFIG_PATHS);
}

/// Load settings from the first candidate path.
pub fn load_settings() -> anyhow::Result<ChartSettings> {
    parse_settings(&read_config_text()?)
}

/// Load settings from an explicit file.
pub fn load_settings_from(path: &Path) -> anyhow::Result<ChartSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    info!("Loaded chart settings from {}", path.display());
    parse_settings(&text)
}

/// Parse TOML text into validated settings. Missing sections and keys keep
/// their defaults.
pub fn parse_settings(text: &str) -> anyhow::Result<ChartSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;

    let mut settings = ChartSettings::default();

    let chart = root.chart.unwrap_or_default();
    if let Some(name) = chart.house_system {
        settings.house_system = name.parse::<HouseSystem>()?;
    }
    if let Some(name) = chart.fallback_house_system {
        settings.fallback_house_system = Some(name.parse::<HouseSystem>()?);
    }
    if let Some(obliquity) = chart.obliquity {
        settings.obliquity = obliquity;
    }
    if let Some(names) = chart.bodies {
        settings.bodies = names
            .iter()
            .map(|n| n.parse::<Body>())
            .collect::<Result<Vec<_>, _>>()?;
    }
    if let Some(step) = chart.speed_step_days {
        settings.speed_step_days = step;
    }

    settings.aspects = aspect_table(root.aspects.unwrap_or_default())?;
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [chart] settings in urania.toml: {e}"))?;
    Ok(settings)
}

fn aspect_table(cfg: AspectsToml) -> anyhow::Result<AspectTable> {
    let mut table = if cfg.major_only {
        AspectTable::major()
    } else {
        AspectTable::default()
    };
    for (name, orb) in cfg.orbs {
        let kind = name.parse::<AspectKind>()?;
        table = table.with_orb(kind, orb)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(parse_settings("").unwrap(), ChartSettings::default());
    }

    #[test]
    fn full_config() {
        let text = r#"
            [chart]
            house_system = "Koch"
            fallback_house_system = "equal"
            obliquity = 23.44
            bodies = ["sun", "Moon"]
            speed_step_days = 0.25

            [aspects]
            major_only = true

            [aspects.orbs]
            conjunction = 10.0
            quincunx = 2.5
        "#;
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.house_system, HouseSystem::Koch);
        assert_eq!(settings.fallback_house_system, Some(HouseSystem::Equal));
        assert_eq!(settings.obliquity, 23.44);
        assert_eq!(settings.bodies, vec![Body::Sun, Body::Moon]);
        assert_eq!(settings.speed_step_days, 0.25);
        assert_eq!(settings.aspects.orb(AspectKind::Conjunction), Some(10.0));
        assert_eq!(settings.aspects.orb(AspectKind::Quincunx), Some(2.5));
        assert_eq!(settings.aspects.orb(AspectKind::Quintile), None);
        assert_eq!(settings.aspects.entries().len(), 6);
    }

    #[test]
    fn invalid_orb_is_reported() {
        let err = parse_settings("[aspects.orbs]\ntrine = 20.0\n").unwrap_err();
        assert!(err.to_string().contains("trine"), "{err}");
    }

    #[test]
    fn unknown_names_are_reported() {
        assert!(parse_settings("[chart]\nhouse_system = \"campanus\"\n").is_err());
        assert!(parse_settings("[chart]\nbodies = [\"chiron\"]\n").is_err());
        assert!(parse_settings("[aspects.orbs]\nnovile = 1.0\n").is_err());
        assert!(parse_settings("[chart]\nhouses = \"koch\"\n").is_err());
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = parse_settings("[chart]\nobliquity = 95.0\n").unwrap_err();
        assert!(err.to_string().contains("obliquity"), "{err}");
        let err = parse_settings("[chart]\nspeed_step_days = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("speed_step_days"), "{err}");
        assert!(parse_settings("[chart]\nspeed_step_days = nan\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chart]\nhouse_system = \"regiomontanus\"").unwrap();
        let settings = load_settings_from(file.path()).unwrap();
        assert_eq!(settings.house_system, HouseSystem::Regiomontanus);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings_from(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn shipped_config_parses() {
        let text = include_str!("../../../configs/urania.toml");
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.fallback_house_system, Some(HouseSystem::Porphyry));
        assert_eq!(settings.bodies.len(), 10);
    }
}
