//! Performance calculations for a single validated aircraft.

use aero_aerodynamics::{AerodynamicModel, CruiseOptimum};
use aero_airframe::Aircraft;
use aero_atmosphere::{AtmosphereError, AtmosphericConditions, standard_atmosphere};
use aero_core::constants::GRAVITY_M_S2;
use aero_core::weight::newtons;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conditions::{ConditionError, FlightConditions};
use crate::envelope::{EnvelopeLimits, FlightEnvelope};
use crate::metrics::{DesignSummary, PerformanceMetrics};

/// Climb rate defining the service ceiling (100 ft/min).
pub const SERVICE_CEILING_CLIMB_RATE_M_S: f64 = 0.508;
/// Screen height cleared at the end of the takeoff (50 ft).
pub const OBSTACLE_HEIGHT_M: f64 = 15.24;
const OBSTACLE_CLIMB_GRADIENT: f64 = 0.06;
const LIFTOFF_SPEED_FACTOR: f64 = 1.2;
const CLIMB_PROFILE_SAMPLES: usize = 50;
const MIN_EMPIRICAL_CEILING_M: f64 = 1_000.0;
const OPTIMUM_SEARCH_TOLERANCE_DEG: f64 = 1e-6;

/// A formula's precondition is not met for this aircraft and input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("fuel weight {fuel_kg} kg is outside [0, {weight_kg}) kg")]
    FuelFractionOutOfRange { fuel_kg: f64, weight_kg: f64 },
    #[error("drag coefficient must be positive (got {0})")]
    NonPositiveDrag(f64),
    #[error("thrust must be positive (got {0} N)")]
    NonPositiveThrust(f64),
    #[error("aircraft weight must be positive (got {0} kg)")]
    NonPositiveWeight(f64),
    #[error("airspeed must be positive (got {0} m/s)")]
    NonPositiveSpeed(f64),
    #[error("required lift coefficient {required:.3} exceeds CL_max {cl_max:.3}")]
    LiftExceedsMaximum { required: f64, cl_max: f64 },
    #[error("altitude range [{min_m}, {max_m}] m is empty")]
    AltitudeRange { min_m: f64, max_m: f64 },
    #[error(transparent)]
    Atmosphere(#[from] AtmosphereError),
    #[error(transparent)]
    Condition(#[from] ConditionError),
}

/// Cruise mission used when bundling metrics.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MissionProfile {
    pub cruise_altitude_m: f64,
    pub cruise_speed_m_s: f64,
    /// Climb speed as a multiple of the 1-g stall speed.
    pub climb_speed_factor: f64,
}

impl Default for MissionProfile {
    fn default() -> Self {
        Self {
            cruise_altitude_m: 10_000.0,
            cruise_speed_m_s: 200.0,
            climb_speed_factor: 1.3,
        }
    }
}

/// Takeoff breakdown for a given thrust and runway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TakeoffPerformance {
    pub stall_speed_m_s: f64,
    pub liftoff_speed_m_s: f64,
    pub ground_roll_m: f64,
    pub obstacle_distance_m: f64,
    pub total_distance_m: f64,
    pub runway_adequate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimbSample {
    pub altitude_m: f64,
    pub climb_speed_m_s: f64,
    pub climb_rate_m_s: f64,
    pub climb_angle_deg: f64,
}

/// Climb capability sampled over an altitude band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimbProfile {
    pub samples: Vec<ClimbSample>,
    /// First sampled altitude where the climb rate drops to 100 ft/min, else the top of the band.
    pub service_ceiling_m: f64,
}

/// Pure performance calculator bound to one aircraft.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceAnalyzer<'a> {
    aircraft: &'a Aircraft,
}

impl<'a> PerformanceAnalyzer<'a> {
    pub fn new(aircraft: &'a Aircraft) -> Self {
        Self { aircraft }
    }

    pub fn aircraft(&self) -> &'a Aircraft {
        self.aircraft
    }

    fn aero(&self) -> &'a AerodynamicModel {
        self.aircraft.aerodynamics()
    }

    fn area(&self) -> f64 {
        self.aircraft.geometry().area_m2
    }

    fn cl_max(&self) -> f64 {
        self.aircraft.coefficients().cl_max
    }

    fn tsfc(&self) -> f64 {
        self.aircraft.powerplant().tsfc_per_s
    }

    /// Lift-to-drag ratio at an angle of attack (degrees).
    pub fn lift_drag_ratio(&self, aoa_deg: f64) -> Result<f64, DomainError> {
        let cl = self.aero().lift_coefficient(aoa_deg);
        let cd = self.aero().drag_coefficient(cl);
        if !(cd > 0.0 && cd.is_finite()) {
            return Err(DomainError::NonPositiveDrag(cd));
        }
        Ok(cl / cd)
    }

    /// Angle of attack of maximum L/D found by golden-section search.
    pub fn optimal_cruise(&self) -> CruiseOptimum {
        self.aero().search_optimum(OPTIMUM_SEARCH_TOLERANCE_DEG)
    }

    /// Sea-level 1-g stall speed at MTOW (m/s).
    pub fn stall_speed(&self) -> f64 {
        self.stall_speed_at(&AtmosphericConditions::sea_level(), None, 1.0)
    }

    /// Stall speed `sqrt(2·W·n/(ρ·S·CL_max))`; weight defaults to MTOW.
    pub fn stall_speed_at(
        &self,
        atmosphere: &AtmosphericConditions,
        weight_kg: Option<f64>,
        load_factor: f64,
    ) -> f64 {
        let weight = newtons(weight_kg.unwrap_or(self.aircraft.mass().mtow_kg));
        (2.0 * weight * load_factor.abs() / (atmosphere.density_kg_m3 * self.area() * self.cl_max()))
            .sqrt()
    }

    /// Lift coefficient needed to hold `load_factor·W` at the given air and speed.
    pub fn required_lift_coefficient(
        &self,
        atmosphere: &AtmosphericConditions,
        airspeed_m_s: f64,
        weight_kg: f64,
        load_factor: f64,
    ) -> f64 {
        let q = 0.5 * atmosphere.density_kg_m3 * airspeed_m_s * airspeed_m_s;
        load_factor * newtons(weight_kg) / (q * self.area())
    }

    fn check_fuel(&self, fuel_kg: f64) -> Result<(f64, f64), DomainError> {
        let mtow = self.aircraft.mass().mtow_kg;
        if !(fuel_kg.is_finite() && fuel_kg >= 0.0 && fuel_kg < mtow) {
            return Err(DomainError::FuelFractionOutOfRange {
                fuel_kg,
                weight_kg: mtow,
            });
        }
        Ok((newtons(mtow), newtons(mtow - fuel_kg)))
    }

    /// Breguet range (m) starting at MTOW and burning `fuel_kg`.
    ///
    /// L/D is taken at the cruise condition: the lift coefficient required for
    /// level flight at the initial weight, altitude, and speed.
    pub fn range(
        &self,
        altitude_m: f64,
        cruise_speed_m_s: f64,
        fuel_kg: f64,
    ) -> Result<f64, DomainError> {
        if !(cruise_speed_m_s.is_finite() && cruise_speed_m_s > 0.0) {
            return Err(DomainError::NonPositiveSpeed(cruise_speed_m_s));
        }
        let (w_initial, w_final) = self.check_fuel(fuel_kg)?;
        let atmosphere = standard_atmosphere(altitude_m)?;

        let cl = self.required_lift_coefficient(
            &atmosphere,
            cruise_speed_m_s,
            self.aircraft.mass().mtow_kg,
            1.0,
        );
        if cl > self.cl_max() {
            return Err(DomainError::LiftExceedsMaximum {
                required: cl,
                cl_max: self.cl_max(),
            });
        }
        let cd = self.aero().drag_coefficient(cl);
        if !(cd > 0.0 && cd.is_finite()) {
            return Err(DomainError::NonPositiveDrag(cd));
        }

        Ok(cruise_speed_m_s / self.tsfc() * (cl / cd) * (w_initial / w_final).ln())
    }

    /// Breguet endurance (s) at maximum L/D.
    ///
    /// The altitude must lie inside the atmosphere model; jet endurance itself is density independent.
    pub fn endurance(&self, altitude_m: f64, fuel_kg: f64) -> Result<f64, DomainError> {
        let (w_initial, w_final) = self.check_fuel(fuel_kg)?;
        standard_atmosphere(altitude_m)?;
        Ok(self.aero().max_lift_drag_ratio() / self.tsfc() * (w_initial / w_final).ln())
    }

    /// Fuel (kg) needed to cover `range_m` from MTOW at maximum L/D.
    pub fn fuel_for_range(&self, range_m: f64, cruise_speed_m_s: f64) -> Result<f64, DomainError> {
        if !(cruise_speed_m_s.is_finite() && cruise_speed_m_s > 0.0) {
            return Err(DomainError::NonPositiveSpeed(cruise_speed_m_s));
        }
        let ld = self.aero().max_lift_drag_ratio();
        let weight_ratio = (-range_m.max(0.0) * self.tsfc() / (cruise_speed_m_s * ld)).exp();
        Ok(self.aircraft.mass().mtow_kg * (1.0 - weight_ratio))
    }

    /// Rate of climb `(T − D)·V/W` at MTOW (m/s). Negative values mean the aircraft cannot climb.
    ///
    /// Drag uses the lift coefficient required by the condition's load factor.
    pub fn rate_of_climb(&self, thrust_n: f64, conditions: &FlightConditions) -> f64 {
        let mtow = self.aircraft.mass().mtow_kg;
        let weight = newtons(mtow);
        let cl = self.required_lift_coefficient(
            conditions.atmosphere(),
            conditions.airspeed_m_s(),
            mtow,
            conditions.load_factor(),
        );
        let drag = conditions.dynamic_pressure_pa() * self.area() * self.aero().drag_coefficient(cl);
        (thrust_n - drag) * conditions.airspeed_m_s() / weight
    }

    /// Sea-level climb rate at MTOW with static thrust, flying at `speed_factor·V_s`.
    pub fn sea_level_climb_rate(&self, speed_factor: f64) -> Result<f64, DomainError> {
        let sea_level = AtmosphericConditions::sea_level();
        let speed = speed_factor * self.stall_speed();
        let cl = self.required_lift_coefficient(&sea_level, speed, self.aircraft.mass().mtow_kg, 1.0);
        let conditions = FlightConditions::level(sea_level, speed, self.aero().angle_for_lift(cl))?;
        Ok(self.rate_of_climb(self.aircraft.powerplant().static_thrust_n, &conditions))
    }

    /// Sea-level ground roll `1.44·W²/(ρ·g·CL_max·S·T)` at MTOW (m).
    pub fn takeoff_distance(&self, thrust_n: f64) -> Result<f64, DomainError> {
        if !(thrust_n.is_finite() && thrust_n > 0.0) {
            return Err(DomainError::NonPositiveThrust(thrust_n));
        }
        let weight = newtons(self.aircraft.mass().mtow_kg);
        let rho = AtmosphericConditions::sea_level().density_kg_m3;
        Ok(1.44 * weight * weight / (rho * GRAVITY_M_S2 * self.cl_max() * self.area() * thrust_n))
    }

    /// Ground roll plus the climb to a 15.24 m screen at a 6 % gradient.
    pub fn takeoff_performance(
        &self,
        thrust_n: f64,
        runway_length_m: f64,
    ) -> Result<TakeoffPerformance, DomainError> {
        let ground_roll_m = self.takeoff_distance(thrust_n)?;
        let stall_speed_m_s = self.stall_speed();
        let obstacle_distance_m = OBSTACLE_HEIGHT_M / OBSTACLE_CLIMB_GRADIENT;
        let total_distance_m = ground_roll_m + obstacle_distance_m;
        Ok(TakeoffPerformance {
            stall_speed_m_s,
            liftoff_speed_m_s: LIFTOFF_SPEED_FACTOR * stall_speed_m_s,
            ground_roll_m,
            obstacle_distance_m,
            total_distance_m,
            runway_adequate: total_distance_m <= runway_length_m,
        })
    }

    /// Climb rate and angle at 1.3·V_s over an altitude band with constant thrust.
    pub fn climb_profile(
        &self,
        min_altitude_m: f64,
        max_altitude_m: f64,
        weight_kg: f64,
        thrust_n: f64,
    ) -> Result<ClimbProfile, DomainError> {
        if !(min_altitude_m.is_finite() && max_altitude_m.is_finite())
            || min_altitude_m > max_altitude_m
        {
            return Err(DomainError::AltitudeRange {
                min_m: min_altitude_m,
                max_m: max_altitude_m,
            });
        }
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(DomainError::NonPositiveWeight(weight_kg));
        }
        let weight = newtons(weight_kg);
        let step = (max_altitude_m - min_altitude_m) / (CLIMB_PROFILE_SAMPLES - 1) as f64;

        let mut samples = Vec::with_capacity(CLIMB_PROFILE_SAMPLES);
        for i in 0..CLIMB_PROFILE_SAMPLES {
            let altitude_m = min_altitude_m + step * i as f64;
            let atmosphere = standard_atmosphere(altitude_m)?;
            let climb_speed_m_s = 1.3 * self.stall_speed_at(&atmosphere, Some(weight_kg), 1.0);
            let cl = self.required_lift_coefficient(&atmosphere, climb_speed_m_s, weight_kg, 1.0);
            let q = 0.5 * atmosphere.density_kg_m3 * climb_speed_m_s * climb_speed_m_s;
            let excess = thrust_n - q * self.area() * self.aero().drag_coefficient(cl);

            let (climb_rate_m_s, climb_angle_deg) = if excess > 0.0 {
                (
                    excess * climb_speed_m_s / weight,
                    (excess / weight).clamp(-1.0, 1.0).asin().to_degrees(),
                )
            } else {
                (0.0, 0.0)
            };
            samples.push(ClimbSample {
                altitude_m,
                climb_speed_m_s,
                climb_rate_m_s,
                climb_angle_deg,
            });
        }

        let service_ceiling_m = samples
            .iter()
            .find(|s| s.climb_rate_m_s <= SERVICE_CEILING_CLIMB_RATE_M_S)
            .map(|s| s.altitude_m)
            .unwrap_or(max_altitude_m);

        Ok(ClimbProfile {
            samples,
            service_ceiling_m,
        })
    }

    /// Wing loading at MTOW (N/m²).
    pub fn wing_loading(&self) -> f64 {
        newtons(self.aircraft.mass().mtow_kg) / self.area()
    }

    /// Empirical service ceiling estimate from wing loading (m).
    pub fn service_ceiling(&self) -> f64 {
        let wing_loading = self.wing_loading();
        let ceiling = if wing_loading < 1_000.0 {
            4_000.0 + (1_000.0 - wing_loading) * 10.0
        } else {
            4_000.0 + (5_000.0 - wing_loading) * 2.0
        };
        ceiling.max(MIN_EMPIRICAL_CEILING_M)
    }

    /// Sea-level V-n boundary at MTOW with default limits.
    pub fn flight_envelope(&self) -> FlightEnvelope {
        FlightEnvelope::new(self.stall_speed(), EnvelopeLimits::default())
    }

    /// V-n boundary at a given altitude and weight.
    pub fn flight_envelope_with(
        &self,
        limits: EnvelopeLimits,
        altitude_m: f64,
        weight_kg: Option<f64>,
    ) -> Result<FlightEnvelope, DomainError> {
        let atmosphere = standard_atmosphere(altitude_m)?;
        Ok(FlightEnvelope::new(
            self.stall_speed_at(&atmosphere, weight_kg, 1.0),
            limits,
        ))
    }

    /// Evaluate the full metric bundle for a mission.
    pub fn analyze(&self, mission: &MissionProfile) -> Result<PerformanceMetrics, DomainError> {
        let optimum = self.optimal_cruise();
        let stall_speed_m_s = self.stall_speed();
        let fuel_kg = self.aircraft.mass().fuel_capacity_kg;
        let thrust_n = self.aircraft.powerplant().static_thrust_n;

        let range_m = self.range(mission.cruise_altitude_m, mission.cruise_speed_m_s, fuel_kg)?;
        let endurance_s = self.endurance(mission.cruise_altitude_m, fuel_kg)?;

        let climb_rate_m_s = self.sea_level_climb_rate(mission.climb_speed_factor)?;
        let takeoff_distance_m = self.takeoff_distance(thrust_n)?;

        log::debug!(
            "analyzed '{}': L/D {:.2}, stall {:.1} m/s, range {:.0} km",
            self.aircraft.name(),
            optimum.lift_drag,
            stall_speed_m_s,
            range_m / 1_000.0
        );

        Ok(PerformanceMetrics {
            optimal_aoa_deg: optimum.aoa_deg,
            optimal_cl: optimum.cl,
            optimal_cd: optimum.cd,
            max_lift_drag: optimum.lift_drag,
            stall_speed_m_s,
            range_m,
            endurance_s,
            climb_rate_m_s,
            takeoff_distance_m,
            wing_loading_pa: self.wing_loading(),
            service_ceiling_m: self.service_ceiling(),
            design: DesignSummary::of(self.aircraft),
        })
    }
}
