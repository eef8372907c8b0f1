//! Finite-wing lift line and parabolic drag polar.

use std::f64::consts::PI;

use aero_core::units::{deg_to_rad, rad_to_deg};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::golden_section_max;

/// Coefficient set describing the clean-wing aerodynamics of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AerodynamicCoefficients {
    /// Zero-lift (parasitic) drag coefficient.
    pub cd0: f64,
    /// Oswald span efficiency factor.
    pub oswald_efficiency: f64,
    /// Maximum lift coefficient of the clean configuration.
    pub cl_max: f64,
    /// Two-dimensional lift-curve slope (per radian).
    #[serde(default = "default_section_lift_slope")]
    pub section_lift_slope: f64,
    /// Angle of attack producing zero lift (degrees).
    #[serde(default)]
    pub zero_lift_aoa_deg: f64,
    /// Stall angle of attack (degrees). Derived from `cl_max` when absent.
    #[serde(default)]
    pub stall_aoa_deg: Option<f64>,
}

fn default_section_lift_slope() -> f64 {
    2.0 * PI
}

impl Default for AerodynamicCoefficients {
    fn default() -> Self {
        Self {
            cd0: 0.025,
            oswald_efficiency: 0.8,
            cl_max: 1.6,
            section_lift_slope: default_section_lift_slope(),
            zero_lift_aoa_deg: 0.0,
            stall_aoa_deg: None,
        }
    }
}

impl AerodynamicCoefficients {
    /// Check the physical ranges of every coefficient.
    pub fn validate(&self) -> Result<(), CoefficientError> {
        if !(self.cd0.is_finite() && self.cd0 > 0.0) {
            return Err(CoefficientError::ParasiticDrag(self.cd0));
        }
        if !(self.oswald_efficiency.is_finite()
            && self.oswald_efficiency > 0.0
            && self.oswald_efficiency <= 1.0)
        {
            return Err(CoefficientError::OswaldEfficiency(self.oswald_efficiency));
        }
        if !(self.cl_max.is_finite() && self.cl_max > 0.0) {
            return Err(CoefficientError::MaxLift(self.cl_max));
        }
        if !(self.section_lift_slope.is_finite() && self.section_lift_slope > 0.0) {
            return Err(CoefficientError::LiftSlope(self.section_lift_slope));
        }
        if !self.zero_lift_aoa_deg.is_finite() {
            return Err(CoefficientError::ZeroLiftAngle(self.zero_lift_aoa_deg));
        }
        if let Some(stall) = self.stall_aoa_deg {
            if !stall.is_finite() || stall <= self.zero_lift_aoa_deg {
                return Err(CoefficientError::StallAngle(stall));
            }
        }
        Ok(())
    }
}

/// Reasons a coefficient set or aspect ratio is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoefficientError {
    #[error("parasitic drag coefficient must be positive (got {0})")]
    ParasiticDrag(f64),
    #[error("Oswald efficiency must lie in (0, 1] (got {0})")]
    OswaldEfficiency(f64),
    #[error("maximum lift coefficient must be positive (got {0})")]
    MaxLift(f64),
    #[error("section lift-curve slope must be positive (got {0})")]
    LiftSlope(f64),
    #[error("zero-lift angle must be finite (got {0})")]
    ZeroLiftAngle(f64),
    #[error("stall angle must exceed the zero-lift angle (got {0} deg)")]
    StallAngle(f64),
    #[error("aspect ratio must be positive (got {0})")]
    AspectRatio(f64),
}

/// Operating point of best lift-to-drag ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CruiseOptimum {
    pub aoa_deg: f64,
    pub cl: f64,
    pub cd: f64,
    pub lift_drag: f64,
}

/// Aerodynamic model of a finite wing with a parabolic drag polar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AerodynamicModel {
    aspect_ratio: f64,
    coefficients: AerodynamicCoefficients,
    lift_slope: f64,
    induced_drag_factor: f64,
}

impl AerodynamicModel {
    /// Build the model for a wing of the given aspect ratio.
    pub fn new(
        aspect_ratio: f64,
        coefficients: AerodynamicCoefficients,
    ) -> Result<Self, CoefficientError> {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(CoefficientError::AspectRatio(aspect_ratio));
        }
        coefficients.validate()?;

        let a0 = coefficients.section_lift_slope;
        let lift_slope = a0 / (1.0 + a0 / (PI * aspect_ratio));
        let induced_drag_factor = 1.0 / (PI * aspect_ratio * coefficients.oswald_efficiency);

        Ok(Self {
            aspect_ratio,
            coefficients,
            lift_slope,
            induced_drag_factor,
        })
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn coefficients(&self) -> &AerodynamicCoefficients {
        &self.coefficients
    }

    /// Finite-wing lift-curve slope (per radian).
    pub fn lift_slope(&self) -> f64 {
        self.lift_slope
    }

    /// Induced drag factor `k = 1 / (π·AR·e)`.
    pub fn induced_drag_factor(&self) -> f64 {
        self.induced_drag_factor
    }

    /// Stall angle in degrees: explicit when configured, otherwise where the lift line reaches `CL_max`.
    pub fn stall_aoa_deg(&self) -> f64 {
        self.coefficients.stall_aoa_deg.unwrap_or_else(|| {
            self.coefficients.zero_lift_aoa_deg
                + rad_to_deg(self.coefficients.cl_max / self.lift_slope)
        })
    }

    /// Lift coefficient at an angle of attack in degrees.
    ///
    /// Linear in `α − α0`, clipped to `±CL_max`, and held at `CL_max` past stall.
    pub fn lift_coefficient(&self, aoa_deg: f64) -> f64 {
        let cl_max = self.coefficients.cl_max;
        if aoa_deg >= self.stall_aoa_deg() {
            return cl_max;
        }
        let cl = self.lift_slope * deg_to_rad(aoa_deg - self.coefficients.zero_lift_aoa_deg);
        cl.clamp(-cl_max, cl_max)
    }

    /// Angle of attack (degrees) at which the linear lift line produces `cl`.
    pub fn angle_for_lift(&self, cl: f64) -> f64 {
        self.coefficients.zero_lift_aoa_deg + rad_to_deg(cl / self.lift_slope)
    }

    /// Drag coefficient from the parabolic polar `CD0 + k·CL²`.
    pub fn drag_coefficient(&self, cl: f64) -> f64 {
        self.coefficients.cd0 + self.induced_drag_factor * cl * cl
    }

    /// Lift-to-drag ratio at an angle of attack; `None` when drag is not positive.
    pub fn lift_drag_ratio(&self, aoa_deg: f64) -> Option<f64> {
        let cl = self.lift_coefficient(aoa_deg);
        let cd = self.drag_coefficient(cl);
        (cd > 0.0 && cd.is_finite()).then(|| cl / cd)
    }

    /// Lift coefficient of maximum L/D, `sqrt(CD0/k)`.
    pub fn optimal_lift_coefficient(&self) -> f64 {
        (self.coefficients.cd0 / self.induced_drag_factor).sqrt()
    }

    /// Lift coefficient of minimum power (maximum `CL^1.5/CD`), `sqrt(3·CD0/k)`.
    pub fn endurance_lift_coefficient(&self) -> f64 {
        (3.0 * self.coefficients.cd0 / self.induced_drag_factor).sqrt()
    }

    /// Maximum lift-to-drag ratio, `1 / (2·sqrt(CD0·k))`.
    pub fn max_lift_drag_ratio(&self) -> f64 {
        1.0 / (2.0 * (self.coefficients.cd0 * self.induced_drag_factor).sqrt())
    }

    /// Closed-form optimum. When `sqrt(CD0/k)` exceeds `CL_max` the optimum sits at stall.
    pub fn optimum(&self) -> CruiseOptimum {
        let cl_opt = self.optimal_lift_coefficient();
        let cl = cl_opt.min(self.coefficients.cl_max);
        let cd = self.drag_coefficient(cl);
        let aoa_deg = if cl_opt <= self.coefficients.cl_max {
            self.angle_for_lift(cl)
        } else {
            self.stall_aoa_deg()
        };
        CruiseOptimum {
            aoa_deg,
            cl,
            cd,
            lift_drag: cl / cd,
        }
    }

    pub fn optimal_angle_of_attack(&self) -> f64 {
        self.optimum().aoa_deg
    }

    /// Numerically search `[α0, α_stall]` for the angle of maximum L/D.
    pub fn search_optimum(&self, tolerance_deg: f64) -> CruiseOptimum {
        let lower = self.coefficients.zero_lift_aoa_deg;
        let upper = self.stall_aoa_deg();
        let found = golden_section_max(
            |aoa| self.lift_drag_ratio(aoa).unwrap_or(f64::NEG_INFINITY),
            lower,
            upper,
            tolerance_deg,
        );
        let cl = self.lift_coefficient(found.x);
        let cd = self.drag_coefficient(cl);
        CruiseOptimum {
            aoa_deg: found.x,
            cl,
            cd,
            lift_drag: cl / cd,
        }
    }
}
