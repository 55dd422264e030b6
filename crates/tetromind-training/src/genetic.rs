//! Genetic algorithm for evolving placement weights.
//!
//! Evolution cycle:
//!
//! 1. **Evaluate fitness** - Every individual plays the same seeded game
//!    sessions with its weights and receives a fitness score
//! 2. **Elite selection** - The top performers survive unchanged
//! 3. **Tournament selection** - Parents are picked by small tournaments
//! 4. **BLX-α crossover + Gaussian mutation** - Offspring explore around
//!    and beyond their parents
//! 5. **L1 normalization** - Offspring vectors are rescaled so absolute
//!    values sum to 1.0 (placement rankings are scale invariant)
//!
//! Fitness blends line-clear efficiency with survival: clears are weighted
//! [0, 1, 3, 5, 8] by size (a quad is worth far more than four singles) and
//! sessions that die before the turn limit lose survival credit. Evaluating
//! every individual on the same seeds keeps generations comparable.
//!
//! Fitness evaluation runs one thread per individual; each session is
//! independent, so this parallelizes trivially.

use std::thread;

use rand::{Rng, seq::IndexedRandom};

use tetromind_engine::{BagSeed, PlayStats, Playfield};
use tetromind_evaluator::{search::MoveSearch, weights::Weights};

use crate::weight_ops::{self, LEN};

/// A single candidate solution: a weight vector and its fitness.
#[derive(Debug, Clone)]
pub struct Individual {
    weights: [f32; LEN],
    fitness: f32,
}

impl Individual {
    /// Creates an individual with random L1-normalized signed weights.
    pub fn random<R>(rng: &mut R, max_weight: f32) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut weights = weight_ops::random(rng, max_weight);
        weight_ops::normalize_l1(&mut weights);
        Self {
            weights,
            fitness: f32::MIN,
        }
    }

    /// Returns the weight configuration of this individual.
    #[must_use]
    pub fn weights(&self) -> Weights {
        Weights::from_array(self.weights)
    }

    /// Returns the raw weight vector.
    #[must_use]
    pub fn weight_vector(&self) -> &[f32; LEN] {
        &self.weights
    }

    /// Returns the fitness score from the last evaluation (higher is
    /// better).
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }
}

/// Computes the fitness of a single played-out session.
///
/// Line clears are weighted [0, 1, 3, 5, 8] by size and scaled against the
/// best possible clearing rate for the turn limit; survival is the fraction
/// of the turn limit the session lasted. Both terms are averaged.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn session_fitness(stats: &PlayStats, turn_limit: usize) -> f32 {
    const LINE_CLEAR_WEIGHT: [f32; 5] = [0.0, 1.0, 3.0, 5.0, 8.0];
    let turn_limit = turn_limit as f32;

    let weighted_line_count: f32 = LINE_CLEAR_WEIGHT
        .iter()
        .zip(stats.line_cleared_counter())
        .map(|(w, c)| w * (*c as f32))
        .sum();
    // Each piece adds 4 cells and a cleared quad removes 40, so at most
    // one quad per 10 pieces: turn_limit * 4 / 40 quads, weighted 8 each.
    let max_line_score = 8.0 * turn_limit * 4.0 / 40.0;
    let efficiency = weighted_line_count / max_line_score;

    let survival = stats.completed_pieces() as f32 / turn_limit;

    (efficiency + survival) / 2.0
}

/// A population of individuals evolved together.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates a population of `count` random individuals.
    #[must_use]
    pub fn random<R>(count: usize, rng: &mut R, max_weight: f32) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::random(rng, max_weight))
            .collect();
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Returns the fittest individual of the last evaluation.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// Evaluates fitness for all individuals in parallel.
    ///
    /// Every individual plays one session per seed (same seeds for
    /// everyone) with the given turn limit. Afterwards the population is
    /// sorted by fitness, best first.
    #[expect(clippy::cast_precision_loss)]
    pub fn evaluate_fitness(&mut self, seeds: &[BagSeed], turn_limit: usize) {
        assert!(!seeds.is_empty());
        thread::scope(|s| {
            for ind in &mut self.individuals {
                let search = MoveSearch::new(Weights::from_array(ind.weights));
                s.spawn(move || {
                    let mut total = 0.0;
                    for seed in seeds {
                        let mut field = Playfield::with_seed(*seed);
                        let stats = search.play_session(&mut field, turn_limit);
                        total += session_fitness(&stats, turn_limit);
                    }
                    ind.fitness = total / seeds.len() as f32;
                });
            }
        });

        self.individuals
            .sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap());
    }
}

/// Controls how one generation becomes the next.
#[derive(Debug)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged.
    pub elite_count: usize,
    /// Weights are clipped to `[-max_weight, max_weight]`.
    pub max_weight: f32,
    /// Tournament size for parent selection (larger = stronger pressure).
    pub tournament_size: usize,
    /// Standard deviation of Gaussian mutation noise.
    pub mutation_sigma: f32,
    /// BLX-α range expansion factor.
    pub blx_alpha: f32,
    /// Per-weight mutation probability.
    pub mutation_rate: f32,
}

impl PopulationEvolver {
    /// Evolves the population into the next generation.
    ///
    /// The input must be sorted by fitness descending (the state
    /// [`Population::evaluate_fitness`] leaves it in). The output has the
    /// same size: elites first, then offspring.
    #[must_use]
    pub fn evolve(&self, population: &Population) -> Population {
        let mut rng = rand::rng();
        assert!(
            population
                .individuals
                .is_sorted_by(|a, b| a.fitness >= b.fitness)
        );

        let mut next_individuals = Vec::with_capacity(population.individuals.len());
        next_individuals.extend(population.individuals[..self.elite_count].iter().cloned());

        while next_individuals.len() < population.individuals.len() {
            let p1 = tournament_select(&population.individuals, self.tournament_size, &mut rng);
            let p2 = tournament_select(&population.individuals, self.tournament_size, &mut rng);

            let mut child = weight_ops::blx_alpha(
                &p1.weights,
                &p2.weights,
                self.blx_alpha,
                self.max_weight,
                &mut rng,
            );
            weight_ops::mutate(
                &mut child,
                self.mutation_sigma,
                self.max_weight,
                self.mutation_rate,
                &mut rng,
            );
            weight_ops::normalize_l1(&mut child);

            next_individuals.push(Individual {
                weights: child,
                fitness: 0.0,
            });
        }

        Population {
            individuals: next_individuals,
        }
    }
}

/// Selects an individual by tournament: draw `tournament_size` at random,
/// keep the fittest.
fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    population
        .choose_multiple(rng, tournament_size)
        .max_by(|a, b| a.fitness.partial_cmp(&b.fitness).unwrap())
        .unwrap()
}
