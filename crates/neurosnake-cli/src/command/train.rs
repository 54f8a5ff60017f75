use std::path::PathBuf;

use neurosnake_evaluator::{FitnessEvaluator as _, snake_evaluator::SnakeEvaluator};
use neurosnake_game::{Direction, OBSERVATION_LEN};
use neurosnake_network::NetworkTopology;
use neurosnake_training::{
    engine::{EngineConfig, EvolutionEngine},
    evaluation::evaluate_population,
    random::RandomSource,
    selection::SelectionStrategy,
};

use crate::snapshot::{self, TrainingSnapshot};

const POPULATION_SIZE: usize = 20;

const HIDDEN_LAYERS: usize = 2;
const NEURONS_PER_HIDDEN_LAYER: usize = 8;

const TOPOLOGY: NetworkTopology = NetworkTopology::new(
    OBSERVATION_LEN,
    Direction::LEN,
    HIDDEN_LAYERS,
    NEURONS_PER_HIDDEN_LAYER,
);

const MUTATION_RATE: f64 = 0.5;
const CROSS_RATE: f64 = 0.7;
const MAX_PERTURBATION: f64 = 0.3;
const ELITE_COUNT: usize = 4;
const ELITE_COPIES: usize = 1;
const SELECTION: SelectionStrategy = SelectionStrategy::Roulette;

const STEP_LIMIT: usize = 500;

const MAX_GENERATIONS: usize = 1000;

const fn engine_config(chromosome_length: usize) -> EngineConfig {
    EngineConfig {
        population_size: POPULATION_SIZE,
        chromosome_length,
        mutation_rate: MUTATION_RATE,
        cross_rate: CROSS_RATE,
        max_perturbation: MAX_PERTURBATION,
        elite_count: ELITE_COUNT,
        elite_copies: ELITE_COPIES,
        selection: SELECTION,
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let evaluator = SnakeEvaluator::new(TOPOLOGY, STEP_LIMIT);
    let config = engine_config(evaluator.weight_count());
    let path = PathBuf::from(snapshot::file_name(
        POPULATION_SIZE,
        HIDDEN_LAYERS,
        NEURONS_PER_HIDDEN_LAYER,
    ));

    let mut rng = RandomSource::from_entropy();
    log::info!("random seed: {}", rng.seed());

    let mut engine = match snapshot::load_engine(&path, TOPOLOGY, &config) {
        Some(engine) => engine,
        None => EvolutionEngine::new(config, &mut rng)?,
    };

    let mut overall_best = engine.average_fitness();
    while engine.generation() < MAX_GENERATIONS {
        let generation = engine.generation();
        let mut population = engine.population().to_vec();
        evaluate_population(&mut population, &evaluator, &mut rng);
        engine.epoch(population, &mut rng)?;

        let stats = engine.stats();
        eprintln!("Generation #{generation}:");
        eprintln!("  Average:      {:.3}", stats.average_fitness);
        eprintln!("  Best:         {:.3}", stats.best_fitness);
        eprintln!("  Worst:        {:.3}", stats.worst_fitness);
        eprintln!("  Overall best: {overall_best:.3}");
        if stats.average_fitness > overall_best {
            overall_best = stats.average_fitness;
            eprintln!("  New best population!");
        }

        let snapshot = TrainingSnapshot::capture(&engine, TOPOLOGY);
        if let Err(e) = snapshot.save(&path) {
            log::warn!("{e:#}");
        }
    }

    eprintln!();
    eprintln!("Training completed");
    eprintln!("  Generations:  {}", engine.generation());
    eprintln!("  Overall best: {overall_best:.3}");
    if let Some(best) = engine.best_genome() {
        eprintln!("  Last best genome: {:.3}", best.fitness());
    }
    eprintln!("  Snapshot: {}", path.display());

    Ok(())
}
