//! `DesignOptimizer`: configuration, candidate evaluation, and result assembly.

use std::collections::BTreeMap;

use aero_airframe::{Aircraft, ValidationError};
use aero_performance::{DomainError, MissionProfile, PerformanceAnalyzer, PerformanceMetrics};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::criteria::{
    Constraint, ConstraintReport, Criterion, Objective, ObjectiveReport, WeightedObjective,
};
use crate::differential_evolution::DifferentialEvolution;
use crate::monte_carlo::MonteCarloSearch;
use crate::search::{Bounds, Evaluation, GenerationRecord, GlobalOptimizer, SearchBudget};
use crate::variables::{self, DesignVariable};

/// Fitness assigned to candidates that fail validation or hit a domain error.
pub const INVALID_PENALTY: f64 = 1e9;

/// Lifecycle of a [`DesignOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptimizerState {
    Configured,
    Running,
    Converged,
    Exhausted,
    Failed,
}

/// Terminal status of one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptimizationStatus {
    /// A feasible best was found and the search met its convergence test.
    Converged,
    /// A feasible best was found but the budget ran out first.
    Exhausted,
    /// No candidate satisfied every constraint; the best infeasible one is reported.
    Failed,
}

impl From<OptimizationStatus> for OptimizerState {
    fn from(status: OptimizationStatus) -> Self {
        match status {
            OptimizationStatus::Converged => OptimizerState::Converged,
            OptimizationStatus::Exhausted => OptimizerState::Exhausted,
            OptimizationStatus::Failed => OptimizerState::Failed,
        }
    }
}

/// Which built-in backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    #[default]
    DifferentialEvolution,
    MonteCarlo,
}

/// Search configuration. Each backend reads its own tuning fields; budget, seed,
/// and tolerances are shared.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    pub strategy: SearchStrategy,
    pub max_iterations: usize,
    pub max_evaluations: Option<usize>,
    pub population_per_dimension: usize,
    pub mutation: f64,
    pub crossover: f64,
    /// Monte Carlo batch size per search dimension.
    pub samples_per_dimension: usize,
    /// Monte Carlo starting spread as a fraction of each bound's width.
    pub initial_spread: f64,
    pub contraction: f64,
    /// Non-improving Monte Carlo iterations before declaring convergence.
    pub patience: usize,
    pub seed: u64,
    pub tolerance: f64,
    pub absolute_tolerance: f64,
    pub penalty_coefficient: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::DifferentialEvolution,
            max_iterations: 100,
            max_evaluations: None,
            population_per_dimension: 15,
            mutation: 0.8,
            crossover: 0.7,
            samples_per_dimension: 20,
            initial_spread: 0.25,
            contraction: 0.8,
            patience: 3,
            seed: 42,
            tolerance: 0.01,
            absolute_tolerance: 0.0,
            penalty_coefficient: 1_000.0,
        }
    }
}

impl SearchSettings {
    pub fn budget(&self) -> SearchBudget {
        SearchBudget {
            max_iterations: self.max_iterations,
            max_evaluations: self.max_evaluations,
            tolerance: self.tolerance,
            absolute_tolerance: self.absolute_tolerance,
        }
    }

    /// Instantiate the configured backend.
    pub fn backend(&self) -> Box<dyn GlobalOptimizer> {
        match self.strategy {
            SearchStrategy::DifferentialEvolution => Box::new(DifferentialEvolution {
                population_per_dimension: self.population_per_dimension,
                mutation: self.mutation,
                crossover: self.crossover,
                seed: self.seed,
            }),
            SearchStrategy::MonteCarlo => Box::new(MonteCarloSearch {
                samples_per_dimension: self.samples_per_dimension,
                initial_spread: self.initial_spread,
                contraction: self.contraction,
                patience: self.patience,
                seed: self.seed,
            }),
        }
    }
}

/// Configuration mistakes. A search that finds nothing feasible is not an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("no design variables specified")]
    NoDesignVariables,
    #[error("no objectives or constraints registered")]
    NoCriteria,
    #[error("bounds for '{variable}' are invalid: [{min}, {max}]")]
    InvalidBounds {
        variable: DesignVariable,
        min: f64,
        max: f64,
    },
    #[error("design variable '{0}' listed more than once")]
    DuplicateVariable(DesignVariable),
    #[error("design variables '{0}' and '{1}' cannot both be free")]
    ConflictingVariables(DesignVariable, DesignVariable),
    #[error("objective '{objective}' weight must be positive and finite (got {weight})")]
    InvalidWeight {
        objective: &'static str,
        weight: f64,
    },
    #[error("penalty coefficient must be positive and finite (got {0})")]
    InvalidPenalty(f64),
    #[error("base aircraft is invalid: {0}")]
    InvalidBase(#[from] ValidationError),
}

/// Best design found by [`DesignOptimizer::optimize`].
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Best candidate as an aircraft; `None` only if every visited point was invalid.
    pub aircraft: Option<Aircraft>,
    /// Mission metrics of the best candidate when it could be analyzed.
    pub metrics: Option<PerformanceMetrics>,
    pub design_variables: Vec<(DesignVariable, f64)>,
    /// Weighted objective sum (minimised sense) without penalties.
    pub objective_value: f64,
    pub fitness: f64,
    pub violation: f64,
    pub objectives: Vec<ObjectiveReport>,
    pub constraints: Vec<ConstraintReport>,
    pub status: OptimizationStatus,
    pub backend: &'static str,
    pub iterations: usize,
    pub evaluations: usize,
    pub history: Vec<GenerationRecord>,
}

impl OptimizationResult {
    pub fn is_feasible(&self) -> bool {
        self.violation == 0.0
    }

    pub fn variable(&self, variable: DesignVariable) -> Option<f64> {
        self.design_variables
            .iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, value)| *value)
    }

    /// Serializable view for reporting.
    pub fn summary(&self) -> OptimizationSummary {
        OptimizationSummary {
            aircraft: self.aircraft.as_ref().map(|a| a.name().to_string()),
            status: self.status,
            backend: self.backend,
            design_variables: self
                .design_variables
                .iter()
                .map(|(variable, value)| VariableValue {
                    name: variable.name(),
                    value: *value,
                })
                .collect(),
            objective_value: self.objective_value,
            fitness: self.fitness,
            violation: self.violation,
            objectives: self.objectives.clone(),
            constraints: self.constraints.clone(),
            metrics: self.metrics.clone(),
            iterations: self.iterations,
            evaluations: self.evaluations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableValue {
    pub name: &'static str,
    pub value: f64,
}

/// JSON-friendly projection of an [`OptimizationResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationSummary {
    pub aircraft: Option<String>,
    pub status: OptimizationStatus,
    pub backend: &'static str,
    pub design_variables: Vec<VariableValue>,
    pub objective_value: f64,
    pub fitness: f64,
    pub violation: f64,
    pub objectives: Vec<ObjectiveReport>,
    pub constraints: Vec<ConstraintReport>,
    pub metrics: Option<PerformanceMetrics>,
    pub iterations: usize,
    pub evaluations: usize,
}

/// Immutable view of one optimization problem, shared by every candidate evaluation.
struct Problem<'a> {
    base: &'a Aircraft,
    name: String,
    variables: Vec<DesignVariable>,
    criteria: &'a [Criterion],
    penalty_coefficient: f64,
}

impl Problem<'_> {
    fn assignments(&self, x: &[f64]) -> Vec<(DesignVariable, f64)> {
        self.variables.iter().copied().zip(x.iter().copied()).collect()
    }

    fn build(&self, x: &[f64]) -> Result<Aircraft, ValidationError> {
        variables::apply(self.base, &self.assignments(x), &self.name)
    }

    /// Weighted objective sum and total violation.
    fn score(&self, aircraft: &Aircraft) -> Result<(f64, f64), DomainError> {
        let mut objective = 0.0;
        let mut violation = 0.0;
        for criterion in self.criteria {
            match criterion {
                Criterion::Objective(weighted) => {
                    objective += weighted.weight * weighted.objective.minimized_value(aircraft)?;
                }
                Criterion::Constraint(constraint) => {
                    violation += constraint.evaluate(aircraft)?.1;
                }
            }
        }
        Ok((objective, violation))
    }

    fn evaluate(&self, x: &[f64]) -> Evaluation {
        let invalid = Evaluation {
            fitness: INVALID_PENALTY,
            violation: f64::INFINITY,
        };
        let aircraft = match self.build(x) {
            Ok(aircraft) => aircraft,
            Err(err) => {
                log::trace!("candidate {:?} rejected: {}", x, err);
                return invalid;
            }
        };
        match self.score(&aircraft) {
            Ok((objective, violation)) => {
                let fitness = objective + self.penalty_coefficient * violation;
                if fitness.is_finite() {
                    Evaluation { fitness, violation }
                } else {
                    invalid
                }
            }
            Err(err) => {
                log::trace!("candidate {:?} out of domain: {}", x, err);
                invalid
            }
        }
    }
}

/// Constrained multi-objective optimizer over a box of design variables.
pub struct DesignOptimizer {
    criteria: Vec<Criterion>,
    variables: BTreeMap<DesignVariable, Bounds>,
    settings: SearchSettings,
    mission: MissionProfile,
    backend: Box<dyn GlobalOptimizer>,
    state: OptimizerState,
}

impl Default for DesignOptimizer {
    fn default() -> Self {
        Self::with_settings(SearchSettings::default())
    }
}

impl DesignOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SearchSettings) -> Self {
        Self {
            criteria: Vec::new(),
            variables: BTreeMap::new(),
            backend: settings.backend(),
            settings,
            mission: MissionProfile::default(),
            state: OptimizerState::Configured,
        }
    }

    /// Replace the search backend (the settings still supply budget and penalty).
    pub fn with_backend(mut self, backend: Box<dyn GlobalOptimizer>) -> Self {
        self.backend = backend;
        self
    }

    /// Mission used to compute the reported metrics of the result.
    pub fn with_mission(mut self, mission: MissionProfile) -> Self {
        self.mission = mission;
        self
    }

    pub fn state(&self) -> OptimizerState {
        self.state
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn objectives(&self) -> impl Iterator<Item = &WeightedObjective> {
        self.criteria.iter().filter_map(|c| match c {
            Criterion::Objective(o) => Some(o),
            Criterion::Constraint(_) => None,
        })
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.criteria.iter().filter_map(|c| match c {
            Criterion::Constraint(c) => Some(c),
            Criterion::Objective(_) => None,
        })
    }

    pub fn design_variables(&self) -> impl Iterator<Item = (DesignVariable, Bounds)> + '_ {
        self.variables.iter().map(|(v, b)| (*v, *b))
    }

    /// Register a weighted objective; the combined objective is the weighted sum.
    pub fn add_objective(
        &mut self,
        objective: Objective,
        weight: f64,
    ) -> Result<&mut Self, OptimizerError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(OptimizerError::InvalidWeight {
                objective: objective.name(),
                weight,
            });
        }
        self.criteria
            .push(Criterion::Objective(WeightedObjective { objective, weight }));
        self.state = OptimizerState::Configured;
        Ok(self)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.criteria.push(Criterion::Constraint(constraint));
        self.state = OptimizerState::Configured;
        self
    }

    /// Replace the free variables and their `(min, max)` bounds.
    pub fn set_design_variables<I>(&mut self, bounds: I) -> Result<&mut Self, OptimizerError>
    where
        I: IntoIterator<Item = (DesignVariable, (f64, f64))>,
    {
        let mut variables = BTreeMap::new();
        for (variable, (min, max)) in bounds {
            if !(min.is_finite() && max.is_finite()) || min > max {
                return Err(OptimizerError::InvalidBounds { variable, min, max });
            }
            if variables.insert(variable, Bounds::new(min, max)).is_some() {
                return Err(OptimizerError::DuplicateVariable(variable));
            }
        }
        if variables.contains_key(&DesignVariable::WingSpan)
            && variables.contains_key(&DesignVariable::AspectRatio)
        {
            return Err(OptimizerError::ConflictingVariables(
                DesignVariable::WingSpan,
                DesignVariable::AspectRatio,
            ));
        }
        self.variables = variables;
        self.state = OptimizerState::Configured;
        Ok(self)
    }

    /// Search the bounded design space around `base`.
    pub fn optimize(&mut self, base: &Aircraft) -> Result<OptimizationResult, OptimizerError> {
        if self.variables.is_empty() {
            return Err(OptimizerError::NoDesignVariables);
        }
        if self.criteria.is_empty() {
            return Err(OptimizerError::NoCriteria);
        }
        let penalty = self.settings.penalty_coefficient;
        if !(penalty.is_finite() && penalty > 0.0) {
            return Err(OptimizerError::InvalidPenalty(penalty));
        }

        let problem = Problem {
            base,
            name: format!("{}_optimized", base.name()),
            variables: self.variables.keys().copied().collect(),
            criteria: &self.criteria,
            penalty_coefficient: penalty,
        };
        let bounds: Vec<Bounds> = self.variables.values().copied().collect();
        let budget = self.settings.budget();

        self.state = OptimizerState::Running;
        log::info!(
            "optimizing '{}' over {} variable(s) with {} (max {} iterations)",
            base.name(),
            bounds.len(),
            self.backend.name(),
            budget.max_iterations
        );

        let fitness = |x: &[f64]| problem.evaluate(x);
        let outcome = self.backend.minimize(&fitness, &bounds, &budget);

        let chosen = outcome.best_feasible.clone().or_else(|| outcome.best.clone());
        let (x, evaluation) = match chosen {
            Some(candidate) => (candidate.x, candidate.evaluation),
            None => {
                // Nothing evaluated within the budget: report the base design clamped into the box.
                let x: Vec<f64> = problem
                    .variables
                    .iter()
                    .zip(&bounds)
                    .map(|(v, b)| b.clamp(v.value_of(base)))
                    .collect();
                let evaluation = problem.evaluate(&x);
                (x, evaluation)
            }
        };

        let status = if !evaluation.is_feasible() {
            OptimizationStatus::Failed
        } else if outcome.converged {
            OptimizationStatus::Converged
        } else {
            OptimizationStatus::Exhausted
        };

        let aircraft = problem.build(&x).ok();
        let (objective_value, objectives, constraints) = match &aircraft {
            Some(aircraft) => report(&self.criteria, aircraft),
            None => (f64::NAN, Vec::new(), Vec::new()),
        };
        let metrics = aircraft.as_ref().and_then(|a| {
            PerformanceAnalyzer::new(a)
                .analyze(&self.mission)
                .map_err(|err| log::warn!("optimized design could not be analyzed: {}", err))
                .ok()
        });

        log::info!(
            "optimization of '{}' finished: {:?} after {} iterations / {} evaluations (fitness {:.6})",
            base.name(),
            status,
            outcome.iterations,
            outcome.evaluations,
            evaluation.fitness
        );

        self.state = status.into();
        Ok(OptimizationResult {
            aircraft,
            metrics,
            design_variables: problem.assignments(&x),
            objective_value,
            fitness: evaluation.fitness,
            violation: evaluation.violation,
            objectives,
            constraints,
            status,
            backend: self.backend.name(),
            iterations: outcome.iterations,
            evaluations: outcome.evaluations,
            history: outcome.history,
        })
    }
}

fn report(
    criteria: &[Criterion],
    aircraft: &Aircraft,
) -> (f64, Vec<ObjectiveReport>, Vec<ConstraintReport>) {
    let mut total = 0.0;
    let mut objectives = Vec::new();
    let mut constraints = Vec::new();
    for criterion in criteria {
        match criterion {
            Criterion::Objective(weighted) => {
                let value = weighted.objective.value(aircraft).unwrap_or(f64::NAN);
                let minimized = if weighted.objective.is_maximization() {
                    -value
                } else {
                    value
                };
                total += weighted.weight * minimized;
                objectives.push(ObjectiveReport {
                    name: weighted.objective.name(),
                    weight: weighted.weight,
                    value,
                    weighted: weighted.weight * minimized,
                });
            }
            Criterion::Constraint(constraint) => {
                let measured = constraint.measure(aircraft).unwrap_or(f64::NAN);
                let (satisfied, violation) = constraint
                    .evaluate(aircraft)
                    .unwrap_or((false, f64::INFINITY));
                constraints.push(ConstraintReport {
                    name: constraint.name(),
                    measured,
                    satisfied,
                    violation,
                });
            }
        }
    }
    (total, objectives, constraints)
}
