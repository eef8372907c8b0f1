//! Aerodynamic coefficient models: finite-wing lift line, parabolic drag polar, and cruise optimum.

pub mod polar;
pub mod search;

pub use polar::{AerodynamicCoefficients, AerodynamicModel, CoefficientError, CruiseOptimum};
pub use search::{GoldenSectionResult, golden_section_max};
