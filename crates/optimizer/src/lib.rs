//! Design-space search: weighted objectives, penalty constraints, and pluggable global optimizers.

pub mod criteria;
pub mod differential_evolution;
pub mod monte_carlo;
pub mod optimizer;
pub mod search;
pub mod variables;

pub use criteria::{
    Constraint, ConstraintReport, Criterion, Objective, ObjectiveReport, WeightedObjective,
};
pub use differential_evolution::DifferentialEvolution;
pub use monte_carlo::MonteCarloSearch;
pub use optimizer::{
    DesignOptimizer, INVALID_PENALTY, OptimizationResult, OptimizationStatus,
    OptimizationSummary, OptimizerError, OptimizerState, SearchSettings, SearchStrategy,
    VariableValue,
};
pub use search::{
    Bounds, Candidate, Evaluation, GenerationRecord, GlobalOptimizer, SearchBudget, SearchOutcome,
};
pub use variables::{DesignVariable, UnknownVariable};
