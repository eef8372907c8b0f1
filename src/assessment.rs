//! Analysis followed by feasibility scoring in one call.

use aero_airframe::Aircraft;
use aero_feasibility::{FeasibilityReport, FeasibilityScorer};
use aero_performance::{DomainError, MissionProfile, PerformanceAnalyzer, PerformanceMetrics};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub metrics: PerformanceMetrics,
    pub feasibility: FeasibilityReport,
}

/// Analyze `aircraft` on `mission` and score how flyable the result is.
pub fn assess(aircraft: &Aircraft, mission: &MissionProfile) -> Result<Assessment, DomainError> {
    let metrics = PerformanceAnalyzer::new(aircraft).analyze(mission)?;
    let feasibility = FeasibilityScorer::new().score(&metrics);
    log::debug!(
        "'{}' scored {:.1} ({})",
        aircraft.name(),
        feasibility.score,
        feasibility.verdict
    );
    Ok(Assessment {
        metrics,
        feasibility,
    })
}
