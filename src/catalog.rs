//! Conversion of catalog records into validated [`Aircraft`] values.

use aero_aerodynamics::AerodynamicCoefficients;
use aero_airframe::{
    Aircraft, AircraftGeometry, DEFAULT_TSFC_PER_S, MassProperties, Powerplant, ValidationError,
};
use aero_config::{AircraftConfig, PropulsionConfig};
use thiserror::Error;

/// Errors surfaced when selecting or converting aircraft.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("aircraft '{0}' not found in catalog")]
    NotFound(String),
    #[error("aircraft catalog is empty")]
    EmptyCatalog,
    #[error("propulsion configuration of '{0}' is not supported")]
    UnsupportedPropulsion(String),
    #[error("aircraft '{name}' is invalid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// Convert an `AircraftConfig` into a validated runtime `Aircraft`.
pub fn from_config(config: &AircraftConfig) -> Result<Aircraft, CatalogError> {
    let powerplant = match config.propulsion {
        PropulsionConfig::Jet {
            static_thrust_n,
            tsfc_per_s,
        } => Powerplant {
            static_thrust_n,
            tsfc_per_s: tsfc_per_s.unwrap_or(DEFAULT_TSFC_PER_S),
        },
        PropulsionConfig::Unsupported => {
            return Err(CatalogError::UnsupportedPropulsion(config.name.clone()));
        }
    };

    let geometry = AircraftGeometry {
        span_m: config.wing.span_m,
        area_m2: config.wing.area_m2,
        sweep_deg: config.wing.sweep_deg,
        dihedral_deg: config.wing.dihedral_deg,
        taper_ratio: config.wing.taper_ratio,
        thickness_ratio: config.wing.thickness_ratio,
        fuselage_length_m: config.fuselage.length_m,
        fuselage_diameter_m: config.fuselage.diameter_m,
    };
    let mass = MassProperties {
        empty_kg: config.mass.empty_kg,
        fuel_capacity_kg: config.mass.fuel_capacity_kg,
        payload_kg: config.mass.payload_kg,
        mtow_kg: config.mass.mtow_kg,
    };
    let aero = &config.aerodynamics;
    let defaults = AerodynamicCoefficients::default();
    let coefficients = AerodynamicCoefficients {
        cd0: aero.cd0,
        oswald_efficiency: aero.oswald_efficiency,
        cl_max: aero.cl_max,
        section_lift_slope: aero
            .section_lift_slope
            .unwrap_or(defaults.section_lift_slope),
        zero_lift_aoa_deg: aero.zero_lift_aoa_deg,
        stall_aoa_deg: aero.stall_aoa_deg,
    };

    Aircraft::new(config.name.clone(), geometry, mass, coefficients, powerplant).map_err(
        |source| CatalogError::Invalid {
            name: config.name.clone(),
            source,
        },
    )
}

/// Select an aircraft by case-insensitive name, defaulting to the first catalog entry.
pub fn select(configs: &[AircraftConfig], requested: Option<&str>) -> Result<Aircraft, CatalogError> {
    let first = configs.first().ok_or(CatalogError::EmptyCatalog)?;
    let chosen = match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            configs
                .iter()
                .find(|cfg| cfg.name.to_uppercase() == upper)
                .ok_or_else(|| CatalogError::NotFound(name.to_string()))?
        }
        None => first,
    };
    from_config(chosen)
}

/// Convert every record, stopping at the first failure.
pub fn from_configs(configs: &[AircraftConfig]) -> Result<Vec<Aircraft>, CatalogError> {
    configs.iter().map(from_config).collect()
}
