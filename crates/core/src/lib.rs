//! Core units, constants, and shared primitives for the Aero Design Calculator workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity used by the ISA pressure integration (m/s²).
    pub const G0: f64 = 9.80665;
    /// Gravity used to turn masses into weights in performance formulas (m/s²).
    pub const GRAVITY_M_S2: f64 = 9.81;
    /// Specific gas constant for dry air (J/(kg·K)).
    pub const R_AIR: f64 = 287.052_87;
    /// Ratio of specific heats for air.
    pub const GAMMA_AIR: f64 = 1.4;
    /// ISA sea-level temperature (K).
    pub const SEA_LEVEL_TEMPERATURE_K: f64 = 288.15;
    /// ISA sea-level pressure (Pa).
    pub const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;
    /// ISA sea-level density (kg/m³).
    pub const SEA_LEVEL_DENSITY_KG_M3: f64 = 1.225;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::SECONDS_PER_HOUR;

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres per second to kilometres per hour.
    #[inline]
    pub fn ms_to_kmh(v: f64) -> f64 {
        v * 3.6
    }

    /// Convert kilometres per hour to metres per second.
    #[inline]
    pub fn kmh_to_ms(v: f64) -> f64 {
        v / 3.6
    }

    /// Convert seconds to hours.
    #[inline]
    pub fn seconds_to_hours(seconds: f64) -> f64 {
        seconds / SECONDS_PER_HOUR
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(deg: f64) -> f64 {
        deg.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(rad: f64) -> f64 {
        rad.to_degrees()
    }
}

/// Mass/weight helpers shared by the performance and optimizer crates.
pub mod weight {
    use super::constants::GRAVITY_M_S2;

    /// Weight in newtons for a mass in kilograms.
    #[inline]
    pub fn newtons(mass_kg: f64) -> f64 {
        mass_kg * GRAVITY_M_S2
    }
}
