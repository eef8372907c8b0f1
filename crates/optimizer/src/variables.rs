//! Design variables: the aircraft fields an optimization is allowed to move.

use std::fmt;
use std::str::FromStr;

use aero_airframe::{Aircraft, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Mutable aircraft parameter. Ordering fixes the application order when building candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum DesignVariable {
    WingSpan,
    WingArea,
    /// Applied after span and area: rescales the span to `sqrt(AR·S)`.
    AspectRatio,
    SweepAngle,
    DihedralAngle,
    TaperRatio,
    ThicknessRatio,
    FuselageLength,
    FuselageDiameter,
    EmptyWeight,
    FuelCapacity,
    PayloadCapacity,
    MaxTakeoffWeight,
    ParasiticDrag,
    OswaldEfficiency,
    MaxLiftCoefficient,
    StaticThrust,
}

/// A variable name that matches no [`DesignVariable`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown design variable '{0}'")]
pub struct UnknownVariable(pub String);

impl DesignVariable {
    pub const ALL: [DesignVariable; 17] = [
        DesignVariable::WingSpan,
        DesignVariable::WingArea,
        DesignVariable::AspectRatio,
        DesignVariable::SweepAngle,
        DesignVariable::DihedralAngle,
        DesignVariable::TaperRatio,
        DesignVariable::ThicknessRatio,
        DesignVariable::FuselageLength,
        DesignVariable::FuselageDiameter,
        DesignVariable::EmptyWeight,
        DesignVariable::FuelCapacity,
        DesignVariable::PayloadCapacity,
        DesignVariable::MaxTakeoffWeight,
        DesignVariable::ParasiticDrag,
        DesignVariable::OswaldEfficiency,
        DesignVariable::MaxLiftCoefficient,
        DesignVariable::StaticThrust,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DesignVariable::WingSpan => "wing_span",
            DesignVariable::WingArea => "wing_area",
            DesignVariable::AspectRatio => "aspect_ratio",
            DesignVariable::SweepAngle => "sweep_angle",
            DesignVariable::DihedralAngle => "dihedral_angle",
            DesignVariable::TaperRatio => "taper_ratio",
            DesignVariable::ThicknessRatio => "thickness_ratio",
            DesignVariable::FuselageLength => "fuselage_length",
            DesignVariable::FuselageDiameter => "fuselage_diameter",
            DesignVariable::EmptyWeight => "empty_weight",
            DesignVariable::FuelCapacity => "fuel_capacity",
            DesignVariable::PayloadCapacity => "payload_capacity",
            DesignVariable::MaxTakeoffWeight => "max_takeoff_weight",
            DesignVariable::ParasiticDrag => "cd0",
            DesignVariable::OswaldEfficiency => "oswald_efficiency",
            DesignVariable::MaxLiftCoefficient => "cl_max",
            DesignVariable::StaticThrust => "static_thrust",
        }
    }

    /// Current value of this variable on an aircraft.
    pub fn value_of(self, aircraft: &Aircraft) -> f64 {
        let geometry = aircraft.geometry();
        let mass = aircraft.mass();
        let coefficients = aircraft.coefficients();
        match self {
            DesignVariable::WingSpan => geometry.span_m,
            DesignVariable::WingArea => geometry.area_m2,
            DesignVariable::AspectRatio => geometry.aspect_ratio(),
            DesignVariable::SweepAngle => geometry.sweep_deg,
            DesignVariable::DihedralAngle => geometry.dihedral_deg,
            DesignVariable::TaperRatio => geometry.taper_ratio,
            DesignVariable::ThicknessRatio => geometry.thickness_ratio,
            DesignVariable::FuselageLength => geometry.fuselage_length_m,
            DesignVariable::FuselageDiameter => geometry.fuselage_diameter_m,
            DesignVariable::EmptyWeight => mass.empty_kg,
            DesignVariable::FuelCapacity => mass.fuel_capacity_kg,
            DesignVariable::PayloadCapacity => mass.payload_kg,
            DesignVariable::MaxTakeoffWeight => mass.mtow_kg,
            DesignVariable::ParasiticDrag => coefficients.cd0,
            DesignVariable::OswaldEfficiency => coefficients.oswald_efficiency,
            DesignVariable::MaxLiftCoefficient => coefficients.cl_max,
            DesignVariable::StaticThrust => aircraft.powerplant().static_thrust_n,
        }
    }
}

impl fmt::Display for DesignVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<DesignVariable> for &'static str {
    fn from(value: DesignVariable) -> Self {
        value.name()
    }
}

impl FromStr for DesignVariable {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DesignVariable::ALL
            .into_iter()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| UnknownVariable(s.to_string()))
    }
}

/// Build a candidate from `base` with the given variables overwritten.
///
/// `assignments` must be sorted by variable; every field not listed keeps the base value.
pub fn apply(
    base: &Aircraft,
    assignments: &[(DesignVariable, f64)],
    name: &str,
) -> Result<Aircraft, ValidationError> {
    let mut geometry = *base.geometry();
    let mut mass = *base.mass();
    let mut coefficients = *base.coefficients();
    let mut powerplant = *base.powerplant();

    for &(variable, value) in assignments {
        match variable {
            DesignVariable::WingSpan => geometry.span_m = value,
            DesignVariable::WingArea => geometry.area_m2 = value,
            DesignVariable::AspectRatio => {
                geometry.span_m = (value * geometry.area_m2).max(0.0).sqrt();
            }
            DesignVariable::SweepAngle => geometry.sweep_deg = value,
            DesignVariable::DihedralAngle => geometry.dihedral_deg = value,
            DesignVariable::TaperRatio => geometry.taper_ratio = value,
            DesignVariable::ThicknessRatio => geometry.thickness_ratio = value,
            DesignVariable::FuselageLength => geometry.fuselage_length_m = value,
            DesignVariable::FuselageDiameter => geometry.fuselage_diameter_m = value,
            DesignVariable::EmptyWeight => mass.empty_kg = value,
            DesignVariable::FuelCapacity => mass.fuel_capacity_kg = value,
            DesignVariable::PayloadCapacity => mass.payload_kg = value,
            DesignVariable::MaxTakeoffWeight => mass.mtow_kg = value,
            DesignVariable::ParasiticDrag => coefficients.cd0 = value,
            DesignVariable::OswaldEfficiency => coefficients.oswald_efficiency = value,
            DesignVariable::MaxLiftCoefficient => coefficients.cl_max = value,
            DesignVariable::StaticThrust => powerplant.static_thrust_n = value,
        }
    }

    Aircraft::new(name, geometry, mass, coefficients, powerplant)
}
