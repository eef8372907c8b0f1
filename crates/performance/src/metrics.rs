//! Performance metric bundle handed to scorers, optimizers, and exporters.

use aero_airframe::Aircraft;
use serde::Serialize;

/// Value copy of the design parameters the metrics were computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSummary {
    pub name: String,
    pub wing_span_m: f64,
    pub wing_area_m2: f64,
    pub aspect_ratio: f64,
    pub sweep_deg: f64,
    pub empty_kg: f64,
    pub mtow_kg: f64,
    pub fuel_fraction: f64,
    pub payload_fraction: f64,
    pub empty_fraction: f64,
    pub max_landing_kg: f64,
    pub static_thrust_n: f64,
}

impl DesignSummary {
    pub fn of(aircraft: &Aircraft) -> Self {
        let geometry = aircraft.geometry();
        let mass = aircraft.mass();
        Self {
            name: aircraft.name().to_string(),
            wing_span_m: geometry.span_m,
            wing_area_m2: geometry.area_m2,
            aspect_ratio: geometry.aspect_ratio(),
            sweep_deg: geometry.sweep_deg,
            empty_kg: mass.empty_kg,
            mtow_kg: mass.mtow_kg,
            fuel_fraction: mass.fuel_fraction(),
            payload_fraction: mass.payload_fraction(),
            empty_fraction: mass.empty_fraction(),
            max_landing_kg: mass.max_landing_kg(),
            static_thrust_n: aircraft.powerplant().static_thrust_n,
        }
    }
}

/// Full performance evaluation of one aircraft, SI units throughout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub optimal_aoa_deg: f64,
    pub optimal_cl: f64,
    pub optimal_cd: f64,
    pub max_lift_drag: f64,
    pub stall_speed_m_s: f64,
    pub range_m: f64,
    pub endurance_s: f64,
    pub climb_rate_m_s: f64,
    pub takeoff_distance_m: f64,
    /// Wing loading at MTOW (N/m²).
    pub wing_loading_pa: f64,
    pub service_ceiling_m: f64,
    pub design: DesignSummary,
}
