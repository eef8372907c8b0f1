//! Validated flight condition: where the air is, how fast and at what attitude the aircraft flies.

use aero_atmosphere::AtmosphericConditions;
use aero_core::constants::SEA_LEVEL_DENSITY_KG_M3;
use serde::Serialize;
use thiserror::Error;

/// Non-physical flight condition.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConditionError {
    #[error("airspeed must be positive and finite (got {0} m/s)")]
    Airspeed(f64),
    #[error("angle of attack must be finite (got {0} deg)")]
    AngleOfAttack(f64),
    #[error("bank angle must lie in (-90, 90) degrees (got {0})")]
    BankAngle(f64),
    #[error("load factor must be positive and finite (got {0})")]
    LoadFactor(f64),
}

/// Steady flight condition. Mach number and dynamic pressure are computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightConditions {
    atmosphere: AtmosphericConditions,
    airspeed_m_s: f64,
    aoa_deg: f64,
    bank_deg: f64,
    load_factor: f64,
    mach: f64,
    dynamic_pressure_pa: f64,
}

impl FlightConditions {
    pub fn new(
        atmosphere: AtmosphericConditions,
        airspeed_m_s: f64,
        aoa_deg: f64,
        bank_deg: f64,
        load_factor: f64,
    ) -> Result<Self, ConditionError> {
        if !(airspeed_m_s.is_finite() && airspeed_m_s > 0.0) {
            return Err(ConditionError::Airspeed(airspeed_m_s));
        }
        if !aoa_deg.is_finite() {
            return Err(ConditionError::AngleOfAttack(aoa_deg));
        }
        if !(bank_deg.is_finite() && bank_deg.abs() < 90.0) {
            return Err(ConditionError::BankAngle(bank_deg));
        }
        if !(load_factor.is_finite() && load_factor > 0.0) {
            return Err(ConditionError::LoadFactor(load_factor));
        }

        Ok(Self {
            atmosphere,
            airspeed_m_s,
            aoa_deg,
            bank_deg,
            load_factor,
            mach: airspeed_m_s / atmosphere.speed_of_sound_m_s,
            dynamic_pressure_pa: 0.5 * atmosphere.density_kg_m3 * airspeed_m_s * airspeed_m_s,
        })
    }

    /// Wings-level, unaccelerated flight (n = 1).
    pub fn level(
        atmosphere: AtmosphericConditions,
        airspeed_m_s: f64,
        aoa_deg: f64,
    ) -> Result<Self, ConditionError> {
        Self::new(atmosphere, airspeed_m_s, aoa_deg, 0.0, 1.0)
    }

    /// Coordinated level turn; the load factor follows from the bank angle as `1/cos φ`.
    pub fn level_turn(
        atmosphere: AtmosphericConditions,
        airspeed_m_s: f64,
        aoa_deg: f64,
        bank_deg: f64,
    ) -> Result<Self, ConditionError> {
        if !(bank_deg.is_finite() && bank_deg.abs() < 90.0) {
            return Err(ConditionError::BankAngle(bank_deg));
        }
        let load_factor = 1.0 / bank_deg.to_radians().cos();
        Self::new(atmosphere, airspeed_m_s, aoa_deg, bank_deg, load_factor)
    }

    pub fn atmosphere(&self) -> &AtmosphericConditions {
        &self.atmosphere
    }

    pub fn airspeed_m_s(&self) -> f64 {
        self.airspeed_m_s
    }

    pub fn aoa_deg(&self) -> f64 {
        self.aoa_deg
    }

    pub fn bank_deg(&self) -> f64 {
        self.bank_deg
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    pub fn mach(&self) -> f64 {
        self.mach
    }

    /// Dynamic pressure `q = ½·ρ·V²` (Pa).
    pub fn dynamic_pressure_pa(&self) -> f64 {
        self.dynamic_pressure_pa
    }

    /// Equivalent airspeed referenced to ISA sea-level density.
    pub fn equivalent_airspeed_m_s(&self) -> f64 {
        self.airspeed_m_s * (self.atmosphere.density_kg_m3 / SEA_LEVEL_DENSITY_KG_M3).sqrt()
    }

    /// Reynolds number for a characteristic length (e.g. mean chord).
    pub fn reynolds_number(&self, characteristic_length_m: f64) -> f64 {
        self.atmosphere.density_kg_m3 * self.airspeed_m_s * characteristic_length_m
            / self.atmosphere.dynamic_viscosity()
    }
}
