//! Optimization studies: configuration records turned into a ready [`DesignOptimizer`].

use aero_config::{AircraftConfig, ConstraintConfig, ObjectiveConfig, StudyConfig};
use aero_optimizer::{
    Constraint, DesignOptimizer, DesignVariable, Objective, OptimizationResult, OptimizerError,
    UnknownVariable,
};
use aero_performance::MissionProfile;
use thiserror::Error;

use crate::catalog::{self, CatalogError};

const DEFAULT_FUEL_FRACTION: f64 = 0.3;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error(transparent)]
    UnknownVariable(#[from] UnknownVariable),
    #[error("objective #{0} has an unsupported type")]
    UnsupportedObjective(usize),
    #[error("constraint #{0} has an unsupported type")]
    UnsupportedConstraint(usize),
    #[error(transparent)]
    Optimizer(#[from] OptimizerError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Objective and weight for one config entry; missing mission parameters come from `mission`.
pub fn objective_from_config(
    config: &ObjectiveConfig,
    mission: &MissionProfile,
) -> Option<(Objective, f64)> {
    let entry = match *config {
        ObjectiveConfig::MaximizeRange {
            weight,
            cruise_altitude_m,
            cruise_speed_m_s,
            fuel_fraction,
        } => (
            Objective::MaximizeRange {
                cruise_altitude_m: cruise_altitude_m.unwrap_or(mission.cruise_altitude_m),
                cruise_speed_m_s: cruise_speed_m_s.unwrap_or(mission.cruise_speed_m_s),
                fuel_fraction: fuel_fraction.unwrap_or(DEFAULT_FUEL_FRACTION),
            },
            weight,
        ),
        ObjectiveConfig::MaximizeEndurance {
            weight,
            altitude_m,
            fuel_fraction,
        } => (
            Objective::MaximizeEndurance {
                altitude_m: altitude_m.unwrap_or(mission.cruise_altitude_m),
                fuel_fraction: fuel_fraction.unwrap_or(DEFAULT_FUEL_FRACTION),
            },
            weight,
        ),
        ObjectiveConfig::MaximizeLiftToDrag { weight } => (Objective::MaximizeLiftToDrag, weight),
        ObjectiveConfig::MinimizeFuelBurn {
            weight,
            mission_range_km,
            cruise_speed_m_s,
        } => (
            Objective::MinimizeFuelBurn {
                mission_range_km,
                cruise_speed_m_s: cruise_speed_m_s.unwrap_or(mission.cruise_speed_m_s),
            },
            weight,
        ),
        ObjectiveConfig::MinimizeStallSpeed { weight } => (Objective::MinimizeStallSpeed, weight),
        ObjectiveConfig::MinimizeTakeoffDistance { weight } => {
            (Objective::MinimizeTakeoffDistance, weight)
        }
        ObjectiveConfig::MinimizeMtow { weight } => (Objective::MinimizeMtow, weight),
        ObjectiveConfig::Unsupported => return None,
    };
    Some(entry)
}

pub fn constraint_from_config(
    config: &ConstraintConfig,
    mission: &MissionProfile,
) -> Option<Constraint> {
    let constraint = match *config {
        ConstraintConfig::MaxStallSpeed {
            limit_m_s,
            altitude_m,
        } => Constraint::MaxStallSpeed {
            limit_m_s,
            altitude_m,
        },
        ConstraintConfig::MaxTakeoffDistance { limit_m } => {
            Constraint::MaxTakeoffDistance { limit_m }
        }
        ConstraintConfig::MaxWingLoading { limit_pa } => Constraint::MaxWingLoading { limit_pa },
        ConstraintConfig::MinRange {
            limit_km,
            cruise_altitude_m,
            cruise_speed_m_s,
        } => Constraint::MinRange {
            limit_km,
            cruise_altitude_m: cruise_altitude_m.unwrap_or(mission.cruise_altitude_m),
            cruise_speed_m_s: cruise_speed_m_s.unwrap_or(mission.cruise_speed_m_s),
        },
        ConstraintConfig::MinLiftToDrag { limit } => Constraint::MinLiftToDrag { limit },
        ConstraintConfig::MinClimbRate { limit_m_s } => Constraint::MinClimbRate { limit_m_s },
        ConstraintConfig::Unsupported => return None,
    };
    Some(constraint)
}

/// Build a configured optimizer (criteria, variables, search settings, mission).
pub fn optimizer_from_config(study: &StudyConfig) -> Result<DesignOptimizer, StudyError> {
    let mut optimizer =
        DesignOptimizer::with_settings(study.search.clone()).with_mission(study.mission);

    for (index, entry) in study.objectives.iter().enumerate() {
        let (objective, weight) = objective_from_config(entry, &study.mission)
            .ok_or(StudyError::UnsupportedObjective(index))?;
        optimizer.add_objective(objective, weight)?;
    }
    for (index, entry) in study.constraints.iter().enumerate() {
        let constraint = constraint_from_config(entry, &study.mission)
            .ok_or(StudyError::UnsupportedConstraint(index))?;
        optimizer.add_constraint(constraint);
    }

    let bounds = study
        .variables
        .iter()
        .map(|v| Ok((v.name.parse::<DesignVariable>()?, (v.min, v.max))))
        .collect::<Result<Vec<_>, UnknownVariable>>()?;
    optimizer.set_design_variables(bounds)?;

    Ok(optimizer)
}

/// Resolve the study's base aircraft in `catalog` and run the optimization.
pub fn run(
    study: &StudyConfig,
    catalog: &[AircraftConfig],
) -> Result<OptimizationResult, StudyError> {
    let base = catalog::select(catalog, Some(&study.aircraft))?;
    let mut optimizer = optimizer_from_config(study)?;
    log::info!(
        "running study '{}' on '{}' with {}",
        study.name,
        base.name(),
        optimizer.backend_name()
    );
    Ok(optimizer.optimize(&base)?)
}
