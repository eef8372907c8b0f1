//! Configuration models and loaders for the Aero Design Calculator.

use std::fs::File;
use std::path::{Path, PathBuf};

use aero_optimizer::SearchSettings;
use aero_performance::MissionProfile;
use serde::Deserialize;
use thiserror::Error;

/// Aircraft record parsed from catalog files.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AircraftConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub wing: WingConfig,
    #[serde(default)]
    pub fuselage: FuselageConfig,
    pub mass: MassConfig,
    pub aerodynamics: AerodynamicsConfig,
    pub propulsion: PropulsionConfig,
}

/// Wing planform. Unswept, untapered, 12 % thick unless stated.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct WingConfig {
    pub span_m: f64,
    pub area_m2: f64,
    #[serde(default)]
    pub sweep_deg: f64,
    #[serde(default)]
    pub dihedral_deg: f64,
    #[serde(default = "default_taper_ratio")]
    pub taper_ratio: f64,
    #[serde(default = "default_thickness_ratio")]
    pub thickness_ratio: f64,
}

fn default_taper_ratio() -> f64 {
    1.0
}

fn default_thickness_ratio() -> f64 {
    0.12
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct FuselageConfig {
    #[serde(default)]
    pub length_m: f64,
    #[serde(default)]
    pub diameter_m: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct MassConfig {
    pub empty_kg: f64,
    pub fuel_capacity_kg: f64,
    pub payload_kg: f64,
    pub mtow_kg: f64,
}

/// Drag polar and lift parameters. Lift-curve details fall back to thin-airfoil values.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct AerodynamicsConfig {
    pub cd0: f64,
    pub oswald_efficiency: f64,
    pub cl_max: f64,
    #[serde(default)]
    pub section_lift_slope: Option<f64>,
    #[serde(default)]
    pub zero_lift_aoa_deg: f64,
    #[serde(default)]
    pub stall_aoa_deg: Option<f64>,
}

/// Propulsion configuration in aircraft catalogs.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "type")]
pub enum PropulsionConfig {
    #[serde(rename = "jet")]
    Jet {
        static_thrust_n: f64,
        #[serde(default)]
        tsfc_per_s: Option<f64>,
    },
    #[serde(other)]
    Unsupported,
}

/// Optimization study: a base aircraft, free variables, and weighted criteria.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StudyConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the catalog aircraft the study starts from.
    pub aircraft: String,
    #[serde(default)]
    pub mission: MissionProfile,
    #[serde(default)]
    pub search: SearchSettings,
    pub variables: Vec<VariableBoundsConfig>,
    #[serde(default)]
    pub objectives: Vec<ObjectiveConfig>,
    #[serde(default)]
    pub constraints: Vec<ConstraintConfig>,
}

/// Bounds for one design variable, named in snake_case (`wing_area`, `cd0`, ...).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VariableBoundsConfig {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Objective entries. Omitted mission parameters take the optimizer defaults.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectiveConfig {
    MaximizeRange {
        #[serde(default = "default_weight")]
        weight: f64,
        #[serde(default)]
        cruise_altitude_m: Option<f64>,
        #[serde(default)]
        cruise_speed_m_s: Option<f64>,
        #[serde(default)]
        fuel_fraction: Option<f64>,
    },
    MaximizeEndurance {
        #[serde(default = "default_weight")]
        weight: f64,
        #[serde(default)]
        altitude_m: Option<f64>,
        #[serde(default)]
        fuel_fraction: Option<f64>,
    },
    MaximizeLiftToDrag {
        #[serde(default = "default_weight")]
        weight: f64,
    },
    MinimizeFuelBurn {
        #[serde(default = "default_weight")]
        weight: f64,
        mission_range_km: f64,
        #[serde(default)]
        cruise_speed_m_s: Option<f64>,
    },
    MinimizeStallSpeed {
        #[serde(default = "default_weight")]
        weight: f64,
    },
    MinimizeTakeoffDistance {
        #[serde(default = "default_weight")]
        weight: f64,
    },
    MinimizeMtow {
        #[serde(default = "default_weight")]
        weight: f64,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintConfig {
    MaxStallSpeed {
        limit_m_s: f64,
        #[serde(default)]
        altitude_m: f64,
    },
    MaxTakeoffDistance {
        limit_m: f64,
    },
    MaxWingLoading {
        limit_pa: f64,
    },
    MinRange {
        limit_km: f64,
        #[serde(default)]
        cruise_altitude_m: Option<f64>,
        #[serde(default)]
        cruise_speed_m_s: Option<f64>,
    },
    MinLiftToDrag {
        limit: f64,
    },
    MinClimbRate {
        limit_m_s: f64,
    },
    #[serde(other)]
    Unsupported,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load aircraft records from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_aircraft_configs<P: AsRef<Path>>(path: P) -> Result<Vec<AircraftConfig>, ConfigError> {
    let records: Vec<AircraftConfig> = load_records(path.as_ref())?;
    log::debug!(
        "loaded {} aircraft record(s) from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// Load one optimization study from TOML (`.toml`) or YAML (anything else).
pub fn load_study<P: AsRef<Path>>(path: P) -> Result<StudyConfig, ConfigError> {
    let path = path.as_ref();
    let study: StudyConfig = if is_toml(path) {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    log::debug!("loaded study '{}' from {}", study.name, path.display());
    Ok(study)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    let mut records = Vec::with_capacity(entries.len());
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        records.push(toml::from_str(&contents)?);
    }
    Ok(records)
}
