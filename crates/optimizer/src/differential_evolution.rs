//! Differential evolution (DE/rand/1/bin) with seeded, reproducible trial generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::search::{
    Bounds, Evaluation, GlobalOptimizer, Incumbents, SearchBudget, SearchOutcome,
    generation_record, mean_and_std,
};

const MIN_POPULATION: usize = 5;

/// Classic DE. Trial vectors are drawn sequentially from one seeded RNG and
/// evaluated in parallel; selection runs in index order, so a fixed seed gives a
/// fixed result regardless of thread count.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialEvolution {
    /// Population size per search dimension.
    pub population_per_dimension: usize,
    pub mutation: f64,
    pub crossover: f64,
    pub seed: u64,
}

impl Default for DifferentialEvolution {
    fn default() -> Self {
        Self {
            population_per_dimension: 15,
            mutation: 0.8,
            crossover: 0.7,
            seed: 42,
        }
    }
}

impl DifferentialEvolution {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    fn population_size(&self, dims: usize) -> usize {
        (self.population_per_dimension * dims).max(MIN_POPULATION)
    }
}

/// Latin hypercube initialisation: one stratum per individual in every dimension.
fn latin_hypercube(rng: &mut StdRng, bounds: &[Bounds], count: usize) -> Vec<Vec<f64>> {
    let mut population = vec![vec![0.0; bounds.len()]; count];
    for (dim, bound) in bounds.iter().enumerate() {
        let mut strata: Vec<usize> = (0..count).collect();
        strata.shuffle(rng);
        for (individual, stratum) in population.iter_mut().zip(strata) {
            let u = (stratum as f64 + rng.random::<f64>()) / count as f64;
            individual[dim] = bound.min + u * bound.width();
        }
    }
    population
}

fn pick_distinct(rng: &mut StdRng, count: usize, exclude: usize) -> [usize; 3] {
    let mut picked = [usize::MAX; 3];
    let mut filled = 0;
    while filled < 3 {
        let r = rng.random_range(0..count);
        if r != exclude && !picked[..filled].contains(&r) {
            picked[filled] = r;
            filled += 1;
        }
    }
    picked
}

impl GlobalOptimizer for DifferentialEvolution {
    fn name(&self) -> &'static str {
        "differential_evolution"
    }

    fn minimize(
        &mut self,
        fitness: &(dyn Fn(&[f64]) -> Evaluation + Sync),
        bounds: &[Bounds],
        budget: &SearchBudget,
    ) -> SearchOutcome {
        let dims = bounds.len();
        let size = self.population_size(dims);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut incumbents = Incumbents::default();
        let mut history = Vec::new();

        if dims == 0 || budget.would_exceed(0, size) {
            return incumbents.into_outcome(false, 0, history);
        }

        let mut population = latin_hypercube(&mut rng, bounds, size);
        let mut scores: Vec<Evaluation> = population
            .par_iter()
            .map(|x| fitness(x.as_slice()))
            .collect();
        for (x, score) in population.iter().zip(&scores) {
            incumbents.observe(x, *score);
        }
        history.push(generation_record(0, incumbents.evaluations, &scores));

        let mut converged = false;
        let mut iterations = 0;

        while iterations < budget.max_iterations {
            if budget.would_exceed(incumbents.evaluations, size) {
                break;
            }

            let trials: Vec<Vec<f64>> = (0..size)
                .map(|i| {
                    let [r1, r2, r3] = pick_distinct(&mut rng, size, i);
                    let forced = rng.random_range(0..dims);
                    (0..dims)
                        .map(|j| {
                            if j == forced || rng.random::<f64>() < self.crossover {
                                let v = population[r1][j]
                                    + self.mutation * (population[r2][j] - population[r3][j]);
                                if bounds[j].contains(v) {
                                    v
                                } else {
                                    rng.random_range(bounds[j].min..=bounds[j].max)
                                }
                            } else {
                                population[i][j]
                            }
                        })
                        .collect()
                })
                .collect();

            let trial_scores: Vec<Evaluation> =
                trials.par_iter().map(|x| fitness(x.as_slice())).collect();

            for (i, (trial, score)) in trials.into_iter().zip(trial_scores).enumerate() {
                incumbents.observe(&trial, score);
                if score.fitness <= scores[i].fitness {
                    population[i] = trial;
                    scores[i] = score;
                }
            }

            iterations += 1;
            let record = generation_record(iterations, incumbents.evaluations, &scores);
            log::debug!(
                "DE generation {}: best {:.6}, mean {:.6}, feasible {}/{}",
                iterations,
                record.best_fitness,
                record.mean_fitness,
                record.feasible_count,
                size
            );
            history.push(record);

            let values: Vec<f64> = scores.iter().map(|s| s.fitness).collect();
            let (mean, std) = mean_and_std(&values);
            if std <= budget.absolute_tolerance + budget.tolerance * mean.abs() {
                converged = true;
                break;
            }
        }

        incumbents.into_outcome(converged, iterations, history)
    }
}
