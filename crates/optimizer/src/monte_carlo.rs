//! Monte Carlo search: uniform exploration followed by shrinking Gaussian refinement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;

use crate::search::{
    Bounds, Evaluation, GlobalOptimizer, Incumbents, SearchBudget, SearchOutcome,
    generation_record,
};

/// Each iteration samples a batch around the incumbent (the best feasible point
/// when one exists) with per-dimension standard deviation `spread·width`, and the
/// spread contracts every iteration. Iteration 0 samples uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloSearch {
    /// Samples per iteration per search dimension.
    pub samples_per_dimension: usize,
    /// Initial standard deviation as a fraction of each bound's width.
    pub initial_spread: f64,
    /// Multiplicative spread contraction per iteration.
    pub contraction: f64,
    /// Consecutive non-improving iterations that count as converged.
    pub patience: usize,
    pub seed: u64,
}

impl Default for MonteCarloSearch {
    fn default() -> Self {
        Self {
            samples_per_dimension: 20,
            initial_spread: 0.25,
            contraction: 0.8,
            patience: 3,
            seed: 42,
        }
    }
}

impl MonteCarloSearch {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl GlobalOptimizer for MonteCarloSearch {
    fn name(&self) -> &'static str {
        "monte_carlo"
    }

    fn minimize(
        &mut self,
        fitness: &(dyn Fn(&[f64]) -> Evaluation + Sync),
        bounds: &[Bounds],
        budget: &SearchBudget,
    ) -> SearchOutcome {
        let dims = bounds.len();
        let batch = (self.samples_per_dimension * dims).max(2);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut incumbents = Incumbents::default();
        let mut history = Vec::new();

        if dims == 0 || budget.would_exceed(0, batch) {
            return incumbents.into_outcome(false, 0, history);
        }

        let mut spread = self.initial_spread;
        let mut stalled = 0;
        let mut converged = false;
        let mut iterations = 0;

        // The first batch explores uniformly; the rest refine.
        while iterations < budget.max_iterations {
            if budget.would_exceed(incumbents.evaluations, batch) {
                break;
            }

            let centre: Option<Vec<f64>> = incumbents
                .best_feasible
                .as_ref()
                .or(incumbents.best.as_ref())
                .map(|c| c.x.clone());

            let samples: Vec<Vec<f64>> = (0..batch)
                .map(|_| {
                    bounds
                        .iter()
                        .enumerate()
                        .map(|(j, bound)| match &centre {
                            None => rng.random_range(bound.min..=bound.max),
                            Some(centre) => {
                                let z: f64 = StandardNormal.sample(&mut rng);
                                bound.clamp(centre[j] + z * spread * bound.width())
                            }
                        })
                        .collect()
                })
                .collect();

            let scores: Vec<Evaluation> =
                samples.par_iter().map(|x| fitness(x.as_slice())).collect();

            let previous = incumbents
                .best
                .as_ref()
                .map(|c| c.evaluation.fitness)
                .unwrap_or(f64::INFINITY);
            for (x, score) in samples.iter().zip(&scores) {
                incumbents.observe(x, *score);
            }
            let current = incumbents
                .best
                .as_ref()
                .map(|c| c.evaluation.fitness)
                .unwrap_or(f64::INFINITY);

            let record = generation_record(iterations, incumbents.evaluations, &scores);
            log::debug!(
                "Monte Carlo iteration {}: batch best {:.6}, incumbent {:.6}, spread {:.4}",
                iterations,
                record.best_fitness,
                current,
                spread
            );
            history.push(record);

            let refining = iterations > 0;
            iterations += 1;
            if refining {
                let improvement = previous - current;
                if improvement <= budget.absolute_tolerance + budget.tolerance * current.abs() {
                    stalled += 1;
                } else {
                    stalled = 0;
                }
                if stalled >= self.patience {
                    converged = true;
                    break;
                }
                spread *= self.contraction;
            }
        }

        incumbents.into_outcome(converged, iterations, history)
    }
}
