//! Objectives and constraints evaluated on candidate aircraft.
//!
//! Objective values use mission-planning units (range in km, endurance in hours,
//! fuel in kg) so that the default penalty coefficient dominates typical objective
//! differences. Constraint violations are expressed in the unit of their limit.

use aero_airframe::Aircraft;
use aero_atmosphere::standard_atmosphere;
use aero_core::units::{km_to_m, m_to_km, seconds_to_hours};
use aero_performance::{DomainError, PerformanceAnalyzer};
use serde::Serialize;

/// Scalar figure of merit. Maximising variants are negated internally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Objective {
    /// Breguet range (km) burning `fuel_fraction` of MTOW.
    MaximizeRange {
        cruise_altitude_m: f64,
        cruise_speed_m_s: f64,
        fuel_fraction: f64,
    },
    /// Breguet endurance (h) burning `fuel_fraction` of MTOW.
    MaximizeEndurance { altitude_m: f64, fuel_fraction: f64 },
    MaximizeLiftToDrag,
    /// Fuel (kg) needed to fly `mission_range_km` at maximum L/D.
    MinimizeFuelBurn {
        mission_range_km: f64,
        cruise_speed_m_s: f64,
    },
    /// Sea-level stall speed at MTOW (m/s).
    MinimizeStallSpeed,
    /// Takeoff distance including the obstacle segment (m).
    MinimizeTakeoffDistance,
    MinimizeMtow,
}

impl Objective {
    pub fn maximize_range() -> Self {
        Objective::MaximizeRange {
            cruise_altitude_m: 10_000.0,
            cruise_speed_m_s: 200.0,
            fuel_fraction: 0.3,
        }
    }

    pub fn maximize_endurance() -> Self {
        Objective::MaximizeEndurance {
            altitude_m: 10_000.0,
            fuel_fraction: 0.3,
        }
    }

    pub fn minimize_fuel_burn(mission_range_km: f64) -> Self {
        Objective::MinimizeFuelBurn {
            mission_range_km,
            cruise_speed_m_s: 200.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Objective::MaximizeRange { .. } => "Maximize Range",
            Objective::MaximizeEndurance { .. } => "Maximize Endurance",
            Objective::MaximizeLiftToDrag => "Maximize L/D",
            Objective::MinimizeFuelBurn { .. } => "Minimize Fuel Consumption",
            Objective::MinimizeStallSpeed => "Minimize Stall Speed",
            Objective::MinimizeTakeoffDistance => "Minimize Takeoff Distance",
            Objective::MinimizeMtow => "Minimize MTOW",
        }
    }

    pub fn is_maximization(&self) -> bool {
        matches!(
            self,
            Objective::MaximizeRange { .. }
                | Objective::MaximizeEndurance { .. }
                | Objective::MaximizeLiftToDrag
        )
    }

    /// Objective value in its natural sense and unit.
    pub fn value(&self, aircraft: &Aircraft) -> Result<f64, DomainError> {
        let analyzer = PerformanceAnalyzer::new(aircraft);
        let mtow = aircraft.mass().mtow_kg;
        match *self {
            Objective::MaximizeRange {
                cruise_altitude_m,
                cruise_speed_m_s,
                fuel_fraction,
            } => analyzer
                .range(cruise_altitude_m, cruise_speed_m_s, mtow * fuel_fraction)
                .map(m_to_km),
            Objective::MaximizeEndurance {
                altitude_m,
                fuel_fraction,
            } => analyzer
                .endurance(altitude_m, mtow * fuel_fraction)
                .map(seconds_to_hours),
            Objective::MaximizeLiftToDrag => Ok(analyzer.optimal_cruise().lift_drag),
            Objective::MinimizeFuelBurn {
                mission_range_km,
                cruise_speed_m_s,
            } => analyzer.fuel_for_range(km_to_m(mission_range_km), cruise_speed_m_s),
            Objective::MinimizeStallSpeed => Ok(analyzer.stall_speed()),
            Objective::MinimizeTakeoffDistance => analyzer
                .takeoff_performance(aircraft.powerplant().static_thrust_n, f64::INFINITY)
                .map(|t| t.total_distance_m),
            Objective::MinimizeMtow => Ok(mtow),
        }
    }

    /// Value to minimise: the natural value, negated for maximising objectives.
    pub fn minimized_value(&self, aircraft: &Aircraft) -> Result<f64, DomainError> {
        let value = self.value(aircraft)?;
        Ok(if self.is_maximization() { -value } else { value })
    }
}

/// Objective with its weight in the combined sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedObjective {
    pub objective: Objective,
    pub weight: f64,
}

/// Performance requirement evaluated as `(satisfied, violation ≥ 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    MaxStallSpeed { limit_m_s: f64, altitude_m: f64 },
    /// Limit on total takeoff distance, obstacle segment included.
    MaxTakeoffDistance { limit_m: f64 },
    MaxWingLoading { limit_pa: f64 },
    /// Minimum Breguet range (km) with full fuel capacity.
    MinRange {
        limit_km: f64,
        cruise_altitude_m: f64,
        cruise_speed_m_s: f64,
    },
    MinLiftToDrag { limit: f64 },
    /// Minimum sea-level climb rate at 1.3·V_s with static thrust.
    MinClimbRate { limit_m_s: f64 },
}

impl Constraint {
    pub fn max_stall_speed(limit_m_s: f64) -> Self {
        Constraint::MaxStallSpeed {
            limit_m_s,
            altitude_m: 0.0,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Constraint::MaxStallSpeed { limit_m_s, .. } => {
                format!("Stall Speed <= {limit_m_s} m/s")
            }
            Constraint::MaxTakeoffDistance { limit_m } => {
                format!("Takeoff Distance <= {limit_m} m")
            }
            Constraint::MaxWingLoading { limit_pa } => {
                format!("Wing Loading <= {limit_pa} N/m²")
            }
            Constraint::MinRange { limit_km, .. } => format!("Range >= {limit_km} km"),
            Constraint::MinLiftToDrag { limit } => format!("L/D >= {limit}"),
            Constraint::MinClimbRate { limit_m_s } => format!("Climb Rate >= {limit_m_s} m/s"),
        }
    }

    /// Measured quantity in the unit of the limit.
    pub fn measure(&self, aircraft: &Aircraft) -> Result<f64, DomainError> {
        let analyzer = PerformanceAnalyzer::new(aircraft);
        match *self {
            Constraint::MaxStallSpeed { altitude_m, .. } => {
                let atmosphere = standard_atmosphere(altitude_m)?;
                Ok(analyzer.stall_speed_at(&atmosphere, None, 1.0))
            }
            Constraint::MaxTakeoffDistance { limit_m } => analyzer
                .takeoff_performance(aircraft.powerplant().static_thrust_n, limit_m)
                .map(|t| t.total_distance_m),
            Constraint::MaxWingLoading { .. } => Ok(analyzer.wing_loading()),
            Constraint::MinRange {
                cruise_altitude_m,
                cruise_speed_m_s,
                ..
            } => analyzer
                .range(
                    cruise_altitude_m,
                    cruise_speed_m_s,
                    aircraft.mass().fuel_capacity_kg,
                )
                .map(m_to_km),
            Constraint::MinLiftToDrag { .. } => Ok(analyzer.optimal_cruise().lift_drag),
            Constraint::MinClimbRate { .. } => analyzer.sea_level_climb_rate(1.3),
        }
    }

    /// `(satisfied, violation)`; the violation is zero exactly when satisfied.
    pub fn evaluate(&self, aircraft: &Aircraft) -> Result<(bool, f64), DomainError> {
        let measured = self.measure(aircraft)?;
        let violation = match *self {
            Constraint::MaxStallSpeed { limit_m_s, .. } => measured - limit_m_s,
            Constraint::MaxTakeoffDistance { limit_m } => measured - limit_m,
            Constraint::MaxWingLoading { limit_pa } => measured - limit_pa,
            Constraint::MinRange { limit_km, .. } => limit_km - measured,
            Constraint::MinLiftToDrag { limit } => limit - measured,
            Constraint::MinClimbRate { limit_m_s } => limit_m_s - measured,
        };
        let violation = if violation.is_nan() {
            f64::INFINITY
        } else {
            violation.max(0.0)
        };
        Ok((violation == 0.0, violation))
    }
}

/// Registered criterion, kept in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Criterion {
    Objective(WeightedObjective),
    Constraint(Constraint),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveReport {
    pub name: &'static str,
    pub weight: f64,
    /// Value in the objective's natural sense.
    pub value: f64,
    /// Contribution to the minimised objective sum.
    pub weighted: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintReport {
    pub name: String,
    pub measured: f64,
    pub satisfied: bool,
    pub violation: f64,
}
