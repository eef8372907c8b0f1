//! Backend-agnostic search interface and incumbent bookkeeping.

use serde::Serialize;

/// Closed interval for one search dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Fitness of one point: penalised objective and total constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub fitness: f64,
    pub violation: f64,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.violation == 0.0
    }
}

/// Iteration and evaluation limits plus the convergence tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBudget {
    pub max_iterations: usize,
    pub max_evaluations: Option<usize>,
    /// Relative tolerance of the convergence test.
    pub tolerance: f64,
    /// Absolute tolerance of the convergence test.
    pub absolute_tolerance: f64,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            max_evaluations: None,
            tolerance: 0.01,
            absolute_tolerance: 0.0,
        }
    }
}

impl SearchBudget {
    /// True when `extra` more evaluations would exceed the evaluation cap.
    pub fn would_exceed(&self, used: usize, extra: usize) -> bool {
        self.max_evaluations
            .is_some_and(|cap| used.saturating_add(extra) > cap)
    }
}

/// A point visited by the search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub x: Vec<f64>,
    pub evaluation: Evaluation,
    /// Zero-based index of the evaluation that produced this point.
    pub discovered: usize,
}

/// Summary of one iteration (generation) of the search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationRecord {
    pub iteration: usize,
    pub evaluations: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub feasible_count: usize,
}

/// What a backend hands back after the loop ends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    /// Lowest fitness overall; ties by lower violation, then earlier discovery.
    pub best: Option<Candidate>,
    /// Lowest fitness among zero-violation points; ties by earlier discovery.
    pub best_feasible: Option<Candidate>,
    pub converged: bool,
    pub iterations: usize,
    pub evaluations: usize,
    pub history: Vec<GenerationRecord>,
}

/// Global minimiser over a bounded box.
pub trait GlobalOptimizer: Send {
    fn name(&self) -> &'static str;

    fn minimize(
        &mut self,
        fitness: &(dyn Fn(&[f64]) -> Evaluation + Sync),
        bounds: &[Bounds],
        budget: &SearchBudget,
    ) -> SearchOutcome;
}

/// Running record of the best points seen, fed in a deterministic order.
#[derive(Debug, Default)]
pub(crate) struct Incumbents {
    pub best: Option<Candidate>,
    pub best_feasible: Option<Candidate>,
    pub evaluations: usize,
}

impl Incumbents {
    pub fn observe(&mut self, x: &[f64], evaluation: Evaluation) {
        let discovered = self.evaluations;
        self.evaluations += 1;

        let beats_best = match &self.best {
            None => true,
            Some(best) => {
                evaluation.fitness < best.evaluation.fitness
                    || (evaluation.fitness == best.evaluation.fitness
                        && evaluation.violation < best.evaluation.violation)
            }
        };
        let beats_feasible = evaluation.is_feasible()
            && match &self.best_feasible {
                None => true,
                Some(best) => evaluation.fitness < best.evaluation.fitness,
            };

        if beats_best || beats_feasible {
            let candidate = Candidate {
                x: x.to_vec(),
                evaluation,
                discovered,
            };
            if beats_feasible {
                self.best_feasible = Some(candidate.clone());
            }
            if beats_best {
                self.best = Some(candidate);
            }
        }
    }

    pub fn into_outcome(
        self,
        converged: bool,
        iterations: usize,
        history: Vec<GenerationRecord>,
    ) -> SearchOutcome {
        SearchOutcome {
            best: self.best,
            best_feasible: self.best_feasible,
            converged,
            iterations,
            evaluations: self.evaluations,
            history,
        }
    }
}

/// Mean and population standard deviation.
pub(crate) fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

pub(crate) fn generation_record(
    iteration: usize,
    evaluations: usize,
    population: &[Evaluation],
) -> GenerationRecord {
    let fitness: Vec<f64> = population.iter().map(|e| e.fitness).collect();
    let (mean_fitness, _) = mean_and_std(&fitness);
    GenerationRecord {
        iteration,
        evaluations,
        best_fitness: fitness.iter().copied().fold(f64::INFINITY, f64::min),
        mean_fitness,
        feasible_count: population.iter().filter(|e| e.is_feasible()).count(),
    }
}
