//! Piecewise International Standard Atmosphere (ISA) up to the upper stratosphere.

use aero_core::constants::{
    G0, GAMMA_AIR, R_AIR, SEA_LEVEL_PRESSURE_PA, SEA_LEVEL_TEMPERATURE_K,
};
use serde::Serialize;
use thiserror::Error;

/// Highest altitude covered by the layer table (m).
pub const MAX_ALTITUDE_M: f64 = 47_000.0;

const SUTHERLAND_C1: f64 = 1.458e-6;
const SUTHERLAND_S_K: f64 = 110.4;

#[derive(Debug, Clone, Copy)]
struct Layer {
    base_altitude_m: f64,
    base_temperature_k: f64,
    base_pressure_pa: f64,
    /// Temperature gradient (K/m); zero marks an isothermal layer.
    lapse_rate_k_m: f64,
}

const LAYERS: [Layer; 4] = [
    // troposphere
    Layer {
        base_altitude_m: 0.0,
        base_temperature_k: SEA_LEVEL_TEMPERATURE_K,
        base_pressure_pa: SEA_LEVEL_PRESSURE_PA,
        lapse_rate_k_m: -0.0065,
    },
    // tropopause
    Layer {
        base_altitude_m: 11_000.0,
        base_temperature_k: 216.65,
        base_pressure_pa: 22_632.1,
        lapse_rate_k_m: 0.0,
    },
    Layer {
        base_altitude_m: 20_000.0,
        base_temperature_k: 216.65,
        base_pressure_pa: 5_474.89,
        lapse_rate_k_m: 0.001,
    },
    Layer {
        base_altitude_m: 32_000.0,
        base_temperature_k: 228.65,
        base_pressure_pa: 868.02,
        lapse_rate_k_m: 0.0028,
    },
];

/// Errors raised when the requested altitude lies outside the modelled envelope.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AtmosphereError {
    #[error("altitude {0} m is not a finite number")]
    NonFinite(f64),
    #[error("altitude {0} m is below sea level")]
    BelowSeaLevel(f64),
    #[error("altitude {altitude_m} m exceeds the modelled ceiling of {ceiling_m} m")]
    AboveModelCeiling { altitude_m: f64, ceiling_m: f64 },
}

/// Immutable snapshot of the air properties at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericConditions {
    pub altitude_m: f64,
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub density_kg_m3: f64,
    pub speed_of_sound_m_s: f64,
}

impl AtmosphericConditions {
    /// ISA conditions at mean sea level.
    pub fn sea_level() -> Self {
        conditions_in_layer(&LAYERS[0], 0.0)
    }

    /// Density relative to the ISA sea-level value (σ).
    pub fn density_ratio(&self) -> f64 {
        self.density_kg_m3 / Self::sea_level().density_kg_m3
    }

    /// Dynamic viscosity from Sutherland's law (Pa·s).
    pub fn dynamic_viscosity(&self) -> f64 {
        let t = self.temperature_k;
        SUTHERLAND_C1 * t.powf(1.5) / (t + SUTHERLAND_S_K)
    }
}

/// Evaluate the standard atmosphere at a geopotential altitude in metres.
///
/// Temperature follows the layer's lapse rate, pressure the barometric formula
/// (power law in gradient layers, exponential in isothermal ones), density the
/// ideal gas law, and the speed of sound `sqrt(γ·R·T)`.
pub fn standard_atmosphere(altitude_m: f64) -> Result<AtmosphericConditions, AtmosphereError> {
    if !altitude_m.is_finite() {
        return Err(AtmosphereError::NonFinite(altitude_m));
    }
    if altitude_m < 0.0 {
        return Err(AtmosphereError::BelowSeaLevel(altitude_m));
    }
    if altitude_m > MAX_ALTITUDE_M {
        return Err(AtmosphereError::AboveModelCeiling {
            altitude_m,
            ceiling_m: MAX_ALTITUDE_M,
        });
    }

    let layer = LAYERS
        .iter()
        .rev()
        .find(|layer| altitude_m >= layer.base_altitude_m)
        .unwrap_or(&LAYERS[0]);
    Ok(conditions_in_layer(layer, altitude_m))
}

fn conditions_in_layer(layer: &Layer, altitude_m: f64) -> AtmosphericConditions {
    let dh = altitude_m - layer.base_altitude_m;
    let temperature_k = layer.base_temperature_k + layer.lapse_rate_k_m * dh;

    let pressure_pa = if layer.lapse_rate_k_m.abs() < 1e-12 {
        layer.base_pressure_pa * (-G0 * dh / (R_AIR * layer.base_temperature_k)).exp()
    } else {
        let exponent = -G0 / (layer.lapse_rate_k_m * R_AIR);
        layer.base_pressure_pa * (temperature_k / layer.base_temperature_k).powf(exponent)
    };

    AtmosphericConditions {
        altitude_m,
        temperature_k,
        pressure_pa,
        density_kg_m3: pressure_pa / (R_AIR * temperature_k),
        speed_of_sound_m_s: (GAMMA_AIR * R_AIR * temperature_k).sqrt(),
    }
}
