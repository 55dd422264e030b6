use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use rand::Rng as _;

use tetromind_engine::BagSeed;
use tetromind_training::genetic::{Population, PopulationEvolver};

use crate::{model::WeightsModel, util::Output};

const GAMES_PER_INDIVIDUAL: usize = 3;
const TURN_LIMIT: usize = 500;

const POPULATION_COUNT: usize = 24;
const MAX_GENERATIONS: usize = 60;

const ELITE_COUNT: usize = 2;
const TOURNAMENT_SIZE: usize = 2;
const MAX_WEIGHT: f32 = 1.0;
const MUTATION_RATE: f32 = 0.3;
const BLX_ALPHA: f32 = 0.2;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
enum EvolutionPhase {
    #[default]
    Exploration,
    Transition,
    Convergence,
}

impl EvolutionPhase {
    fn from_generation(generation: usize) -> Self {
        match generation {
            0..15 => Self::Exploration,
            15..40 => Self::Transition,
            _ => Self::Convergence,
        }
    }
}

const fn mutation_sigma_by_phase(phase: EvolutionPhase) -> f32 {
    match phase {
        EvolutionPhase::Exploration => 0.05,
        EvolutionPhase::Transition => 0.02,
        EvolutionPhase::Convergence => 0.01,
    }
}

const fn evolver_by_phase(phase: EvolutionPhase) -> PopulationEvolver {
    PopulationEvolver {
        elite_count: ELITE_COUNT,
        tournament_size: TOURNAMENT_SIZE,
        max_weight: MAX_WEIGHT,
        mutation_sigma: mutation_sigma_by_phase(phase),
        blx_alpha: BLX_ALPHA,
        mutation_rate: MUTATION_RATE,
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TuneArg {
    /// Model name stored in the output file
    #[arg(long, default_value = "tuned")]
    name: String,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TuneArg) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let mut population = Population::random(POPULATION_COUNT, &mut rng, MAX_WEIGHT);

    for generation in 0..MAX_GENERATIONS {
        let phase = EvolutionPhase::from_generation(generation);
        eprintln!("Generation #{generation} ({phase:?}):");

        // fresh evaluation games each generation, shared by all individuals
        let seeds: Vec<BagSeed> = (0..GAMES_PER_INDIVIDUAL).map(|_| rng.random()).collect();
        population.evaluate_fitness(&seeds, TURN_LIMIT);

        let best = population.best().context("population is empty")?;
        eprintln!(
            "  Best:  {:.3?} => {:.3}",
            best.weight_vector(),
            best.fitness()
        );
        let mean_fitness = mean(population.individuals().iter().map(|ind| ind.fitness()));
        eprintln!("  Mean fitness: {mean_fitness:.3}");

        if generation + 1 < MAX_GENERATIONS {
            population = evolver_by_phase(phase).evolve(&population);
        }
    }

    let best = population.best().context("population is empty")?;
    let model = WeightsModel {
        name: arg.name.clone(),
        trained_at: Utc::now(),
        final_fitness: best.fitness(),
        weights: best.weights(),
    };
    Output::save_json(&model, arg.output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final fitness: {:.3}", model.final_fitness);

    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f32 }
}
