//! Aircraft geometry, mass properties, and powerplant descriptors with construction-time validation.

pub mod samples;

use aero_aerodynamics::{AerodynamicCoefficients, AerodynamicModel, CoefficientError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Landing weight limit as a fraction of MTOW.
pub const MAX_LANDING_WEIGHT_FRACTION: f64 = 0.85;
/// Default thrust-specific fuel consumption (1/s).
pub const DEFAULT_TSFC_PER_S: f64 = 0.5e-4;

/// Wing and fuselage geometry. Aspect ratio and mean chord are derived from span and area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftGeometry {
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
    #[serde(default)]
    pub fuselage_length_m: f64,
    #[serde(default)]
    pub fuselage_diameter_m: f64,
}

fn default_taper_ratio() -> f64 {
    1.0
}

fn default_thickness_ratio() -> f64 {
    0.12
}

impl AircraftGeometry {
    /// Aspect ratio `b²/S`.
    pub fn aspect_ratio(&self) -> f64 {
        self.span_m * self.span_m / self.area_m2
    }

    /// Mean geometric chord `S/b`.
    pub fn mean_chord_m(&self) -> f64 {
        self.area_m2 / self.span_m
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.area_m2.is_finite() && self.area_m2 > 0.0) {
            return Err(ValidationError::WingArea(self.area_m2));
        }
        if !(self.span_m.is_finite() && self.span_m > 0.0) {
            return Err(ValidationError::WingSpan(self.span_m));
        }
        if !(self.sweep_deg.is_finite() && (0.0..80.0).contains(&self.sweep_deg)) {
            return Err(ValidationError::Sweep(self.sweep_deg));
        }
        if !self.dihedral_deg.is_finite() {
            return Err(ValidationError::Dihedral(self.dihedral_deg));
        }
        if !(self.taper_ratio > 0.0 && self.taper_ratio <= 1.0) {
            return Err(ValidationError::TaperRatio(self.taper_ratio));
        }
        if !(self.thickness_ratio > 0.0 && self.thickness_ratio < 0.5) {
            return Err(ValidationError::ThicknessRatio(self.thickness_ratio));
        }
        if !(self.fuselage_length_m >= 0.0 && self.fuselage_diameter_m >= 0.0) {
            return Err(ValidationError::Fuselage);
        }
        Ok(())
    }
}

/// Mass budget in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    pub empty_kg: f64,
    pub fuel_capacity_kg: f64,
    pub payload_kg: f64,
    pub mtow_kg: f64,
}

impl MassProperties {
    /// Fuel capacity as a fraction of MTOW.
    pub fn fuel_fraction(&self) -> f64 {
        self.fuel_capacity_kg / self.mtow_kg
    }

    pub fn payload_fraction(&self) -> f64 {
        self.payload_kg / self.mtow_kg
    }

    pub fn empty_fraction(&self) -> f64 {
        self.empty_kg / self.mtow_kg
    }

    /// Landing weight limit (kg).
    pub fn max_landing_kg(&self) -> f64 {
        self.mtow_kg * MAX_LANDING_WEIGHT_FRACTION
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let all_finite = [
            self.empty_kg,
            self.fuel_capacity_kg,
            self.payload_kg,
            self.mtow_kg,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0);
        if !all_finite {
            return Err(ValidationError::NegativeMass);
        }
        if self.mtow_kg <= 0.0 {
            return Err(ValidationError::Mtow(self.mtow_kg));
        }
        if self.empty_kg >= self.mtow_kg {
            return Err(ValidationError::EmptyExceedsMtow {
                empty_kg: self.empty_kg,
                mtow_kg: self.mtow_kg,
            });
        }
        let total = self.empty_kg + self.fuel_capacity_kg + self.payload_kg;
        // Allow rounding noise from configuration files.
        if total > self.mtow_kg * (1.0 + 1e-9) {
            return Err(ValidationError::MassBudget {
                total_kg: total,
                mtow_kg: self.mtow_kg,
            });
        }
        Ok(())
    }
}

/// Thrust-producing installation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Powerplant {
    /// Total static sea-level thrust (N).
    pub static_thrust_n: f64,
    /// Thrust-specific fuel consumption (1/s).
    #[serde(default = "default_tsfc")]
    pub tsfc_per_s: f64,
}

fn default_tsfc() -> f64 {
    DEFAULT_TSFC_PER_S
}

impl Powerplant {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.static_thrust_n.is_finite() && self.static_thrust_n > 0.0) {
            return Err(ValidationError::Thrust(self.static_thrust_n));
        }
        if !(self.tsfc_per_s.is_finite() && self.tsfc_per_s > 0.0) {
            return Err(ValidationError::Tsfc(self.tsfc_per_s));
        }
        Ok(())
    }
}

/// Malformed aircraft definition.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("wing area must be positive (got {0} m²)")]
    WingArea(f64),
    #[error("wing span must be positive (got {0} m)")]
    WingSpan(f64),
    #[error("sweep must lie in [0, 80) degrees (got {0})")]
    Sweep(f64),
    #[error("dihedral must be finite (got {0})")]
    Dihedral(f64),
    #[error("taper ratio must lie in (0, 1] (got {0})")]
    TaperRatio(f64),
    #[error("thickness ratio must lie in (0, 0.5) (got {0})")]
    ThicknessRatio(f64),
    #[error("fuselage dimensions must be non-negative")]
    Fuselage,
    #[error("masses must be finite and non-negative")]
    NegativeMass,
    #[error("maximum takeoff weight must be positive (got {0} kg)")]
    Mtow(f64),
    #[error("empty weight {empty_kg} kg must be below MTOW {mtow_kg} kg")]
    EmptyExceedsMtow { empty_kg: f64, mtow_kg: f64 },
    #[error("empty + fuel + payload = {total_kg} kg exceeds MTOW {mtow_kg} kg")]
    MassBudget { total_kg: f64, mtow_kg: f64 },
    #[error("static thrust must be positive (got {0} N)")]
    Thrust(f64),
    #[error("TSFC must be positive (got {0} 1/s)")]
    Tsfc(f64),
    #[error(transparent)]
    Coefficients(#[from] CoefficientError),
}

/// A validated aircraft. Construct through [`Aircraft::new`]; clone to derive variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    name: String,
    geometry: AircraftGeometry,
    mass: MassProperties,
    coefficients: AerodynamicCoefficients,
    powerplant: Powerplant,
    aerodynamics: AerodynamicModel,
}

impl Aircraft {
    pub fn new(
        name: impl Into<String>,
        geometry: AircraftGeometry,
        mass: MassProperties,
        coefficients: AerodynamicCoefficients,
        powerplant: Powerplant,
    ) -> Result<Self, ValidationError> {
        geometry.validate()?;
        mass.validate()?;
        powerplant.validate()?;
        let aerodynamics = AerodynamicModel::new(geometry.aspect_ratio(), coefficients)?;
        Ok(Self {
            name: name.into(),
            geometry,
            mass,
            coefficients,
            powerplant,
            aerodynamics,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &AircraftGeometry {
        &self.geometry
    }

    pub fn mass(&self) -> &MassProperties {
        &self.mass
    }

    pub fn coefficients(&self) -> &AerodynamicCoefficients {
        &self.coefficients
    }

    pub fn powerplant(&self) -> &Powerplant {
        &self.powerplant
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.geometry.aspect_ratio()
    }

    /// Aerodynamic model built from the wing aspect ratio and coefficient set.
    pub fn aerodynamics(&self) -> &AerodynamicModel {
        &self.aerodynamics
    }
}
