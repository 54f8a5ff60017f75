//! Generational genetic algorithm over flat weight vectors.
//!
//! # Epoch
//!
//! [`EvolutionEngine::epoch`] takes a fully evaluated population and returns
//! the next generation:
//!
//! 1. **Validate** - population size and every genome length must match the
//!    configuration
//! 2. **Sort** - stable ascending sort by fitness, so the best genomes sit at
//!    the tail
//! 3. **Statistics** - total, best, worst, average fitness and fittest index
//! 4. **Elitism** - copy the best `elite_count` genomes `elite_copies` times,
//!    but only when `elite_count * elite_copies` is even
//! 5. **Breeding** - select two parents, cross them over, mutate both children
//!    and append them, until the population is full
//!
//! Breeding always adds children in pairs. Together with an even population
//! size and an even elite total, this fills the next generation exactly.
//!
//! # Operators
//!
//! - **Selection** - see [`SelectionStrategy`]
//! - **Crossover** - with probability `cross_rate` (and only when the parents'
//!   weights differ), single-point crossover at a cut drawn from
//!   `[0, chromosome_length]`; otherwise both parents are copied unchanged
//! - **Mutation** - every weight is perturbed with probability
//!   `mutation_rate` by at most `max_perturbation`
//!
//! Elites and children are always value copies, so mutating a child never
//! touches another slot of the population.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    genome::Genome,
    random,
    selection::{self, SelectionStrategy},
    statistics::PopulationStats,
    weights,
};

/// Hyperparameters of an [`EvolutionEngine`]. Immutable once the engine exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of genomes per generation; must be even.
    pub population_size: usize,
    /// Number of weights per genome.
    pub chromosome_length: usize,
    /// Probability of perturbing each individual weight.
    pub mutation_rate: f64,
    /// Probability of crossing two parents instead of copying them.
    pub cross_rate: f64,
    /// Upper bound of a single weight perturbation.
    pub max_perturbation: f64,
    /// Number of best genomes carried over unchanged.
    pub elite_count: usize,
    /// How many copies of each elite are carried over.
    pub elite_copies: usize,
    pub selection: SelectionStrategy,
}

impl EngineConfig {
    pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
    pub const DEFAULT_CROSS_RATE: f64 = 0.7;
    pub const DEFAULT_MAX_PERTURBATION: f64 = 0.3;
    pub const DEFAULT_ELITE_COUNT: usize = 4;
    pub const DEFAULT_ELITE_COPIES: usize = 1;

    /// Creates a configuration with default rates and roulette selection.
    #[must_use]
    pub const fn new(population_size: usize, chromosome_length: usize) -> Self {
        Self {
            population_size,
            chromosome_length,
            mutation_rate: Self::DEFAULT_MUTATION_RATE,
            cross_rate: Self::DEFAULT_CROSS_RATE,
            max_perturbation: Self::DEFAULT_MAX_PERTURBATION,
            elite_count: Self::DEFAULT_ELITE_COUNT,
            elite_copies: Self::DEFAULT_ELITE_COPIES,
            selection: SelectionStrategy::Roulette,
        }
    }

    /// Number of genomes elitism contributes to each generation.
    #[must_use]
    pub const fn elite_total(&self) -> usize {
        self.elite_count * self.elite_copies
    }

    /// Elitism is skipped entirely when the elite total is odd, because
    /// breeding fills the rest of the population two at a time.
    #[must_use]
    pub const fn elitism_enabled(&self) -> bool {
        self.elite_total() % 2 == 0
    }

    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.population_size == 0 {
            return Err(EngineConfigError::EmptyPopulation);
        }
        if self.population_size % 2 != 0 {
            return Err(EngineConfigError::OddPopulationSize {
                population_size: self.population_size,
            });
        }
        for (name, value) in [
            ("mutation_rate", self.mutation_rate),
            ("cross_rate", self.cross_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineConfigError::RateOutOfRange { name, value });
            }
        }
        if !(self.max_perturbation.is_finite() && self.max_perturbation >= 0.0) {
            return Err(EngineConfigError::InvalidPerturbation {
                value: self.max_perturbation,
            });
        }
        if self.elite_count > self.population_size
            || (self.elitism_enabled() && self.elite_total() > self.population_size)
        {
            return Err(EngineConfigError::TooManyElites {
                elites: self.elite_total(),
                population_size: self.population_size,
            });
        }
        Ok(())
    }
}

/// Invalid [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum EngineConfigError {
    #[display("population size must be positive")]
    EmptyPopulation,
    #[display("population size must be even, got {population_size}")]
    OddPopulationSize { population_size: usize },
    #[display("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[display("max perturbation must be finite and non-negative, got {value}")]
    InvalidPerturbation { value: f64 },
    #[display("{elites} elites do not fit in a population of {population_size}")]
    TooManyElites {
        elites: usize,
        population_size: usize,
    },
}

/// Population handed to the engine does not match its configuration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EpochError {
    #[display("expected a population of {expected} genomes, got {actual}")]
    PopulationSizeMismatch { expected: usize, actual: usize },
    #[display("genome #{index} has {actual} weights, expected {expected}")]
    ChromosomeLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Failure to rebuild an engine from persisted parts.
#[derive(
    Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum RestoreError {
    #[display("invalid configuration: {_0}")]
    Config(EngineConfigError),
    #[display("invalid population: {_0}")]
    Population(EpochError),
}

/// Owns a population of genomes and breeds successive generations.
///
/// The engine never evaluates fitness. Callers take the population, assign
/// fitness to every genome, and hand it back through [`Self::epoch`].
///
/// # Example
///
/// ```
/// use neurosnake_training::{
///     engine::{EngineConfig, EvolutionEngine},
///     random::RandomSource,
/// };
///
/// let mut rng = RandomSource::seed_from_u64(1);
/// let config = EngineConfig::new(20, 8);
/// let mut engine = EvolutionEngine::new(config, &mut rng).unwrap();
///
/// for _ in 0..2 {
///     let mut population = engine.population().to_vec();
///     for genome in &mut population {
///         // reward genomes whose weights sum high
///         let fitness = genome.weights().iter().sum::<f64>().max(0.0);
///         genome.set_fitness(fitness);
///     }
///     let next = engine.epoch(population, &mut rng).unwrap();
///     assert_eq!(next.len(), 20);
/// }
/// assert_eq!(engine.generation(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    config: EngineConfig,
    population: Vec<Genome>,
    /// Last population passed to `epoch`, sorted ascending by fitness.
    evaluated: Vec<Genome>,
    generation: usize,
    stats: PopulationStats,
    best_genome: Option<Genome>,
}

impl EvolutionEngine {
    /// Creates an engine with a random initial population.
    ///
    /// Every weight is drawn from `[-1, 1)`.
    pub fn new<R>(config: EngineConfig, rng: &mut R) -> Result<Self, EngineConfigError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        let population = (0..config.population_size)
            .map(|_| Genome::random(rng, config.chromosome_length))
            .collect();
        Ok(Self {
            config,
            population,
            evaluated: vec![],
            generation: 0,
            stats: PopulationStats::default(),
            best_genome: None,
        })
    }

    /// Rebuilds an engine from previously saved parts.
    pub fn restore(
        config: EngineConfig,
        generation: usize,
        population: Vec<Genome>,
        stats: PopulationStats,
    ) -> Result<Self, RestoreError> {
        config.validate()?;
        let mut this = Self {
            config,
            population: vec![],
            evaluated: vec![],
            generation,
            stats,
            best_genome: None,
        };
        this.validate_population(&population)?;
        this.population = population;
        Ok(this)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current generation's genomes.
    #[must_use]
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// The last evaluated generation, sorted ascending by fitness.
    ///
    /// This is what [`Self::stats`], [`Self::genome_roulette`] and
    /// [`Self::tournament`] describe. Empty until the first epoch has run on
    /// this engine instance.
    #[must_use]
    pub fn evaluated_population(&self) -> &[Genome] {
        &self.evaluated
    }

    /// Number of completed epochs.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Statistics of the last population passed to [`Self::epoch`].
    #[must_use]
    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    #[must_use]
    pub fn total_fitness(&self) -> f64 {
        self.stats.total_fitness
    }

    #[must_use]
    pub fn best_fitness(&self) -> f64 {
        self.stats.best_fitness
    }

    #[must_use]
    pub fn worst_fitness(&self) -> f64 {
        self.stats.worst_fitness
    }

    #[must_use]
    pub fn average_fitness(&self) -> f64 {
        self.stats.average_fitness
    }

    /// Copy of the fittest genome of the last evaluated population.
    ///
    /// `None` until the first epoch has run on this engine instance.
    #[must_use]
    pub fn best_genome(&self) -> Option<&Genome> {
        self.best_genome.as_ref()
    }

    fn validate_population(&self, population: &[Genome]) -> Result<(), EpochError> {
        if population.len() != self.config.population_size {
            return Err(EpochError::PopulationSizeMismatch {
                expected: self.config.population_size,
                actual: population.len(),
            });
        }
        if let Some((index, genome)) = population
            .iter()
            .enumerate()
            .find(|(_, g)| g.len() != self.config.chromosome_length)
        {
            return Err(EpochError::ChromosomeLengthMismatch {
                index,
                expected: self.config.chromosome_length,
                actual: genome.len(),
            });
        }
        Ok(())
    }

    /// Replaces the population with an evaluated one and breeds the next
    /// generation from it.
    ///
    /// Returns the new population, which is also kept as the engine's current
    /// population.
    pub fn epoch<R>(
        &mut self,
        population: Vec<Genome>,
        rng: &mut R,
    ) -> Result<&[Genome], EpochError>
    where
        R: Rng + ?Sized,
    {
        self.validate_population(&population)?;

        self.evaluated = population;
        self.stats = PopulationStats::default();

        self.evaluated.sort_by(Genome::compare_fitness);
        self.stats = PopulationStats::compute(&self.evaluated);
        self.best_genome = Some(self.evaluated[self.stats.fittest_index].clone());
        log::debug!(
            "generation {}: total {:.3}, best {:.3} (#{}), worst {:.3}, average {:.3}",
            self.generation,
            self.stats.total_fitness,
            self.stats.best_fitness,
            self.stats.fittest_index,
            self.stats.worst_fitness,
            self.stats.average_fitness,
        );

        let population_size = self.config.population_size;
        let mut next = Vec::with_capacity(population_size);
        if self.config.elitism_enabled() {
            self.grab_n_best(&mut next);
        } else {
            log::debug!(
                "elitism skipped: {} elites x {} copies is odd",
                self.config.elite_count,
                self.config.elite_copies
            );
        }

        let mut parents = ParentPicker::new(self, rng);
        while next.len() < population_size {
            let (mum, dad) = parents.next_pair(self, rng);
            let (mut baby1, mut baby2) =
                self.crossover(&self.evaluated[mum], &self.evaluated[dad], rng);
            self.mutate(&mut baby1, rng);
            self.mutate(&mut baby2, rng);
            next.push(baby1);
            next.push(baby2);
        }

        self.population = next;
        self.generation += 1;
        Ok(&self.population)
    }

    /// Appends `elite_copies` rounds of the best `elite_count` genomes, best
    /// first.
    fn grab_n_best(&self, next: &mut Vec<Genome>) {
        let len = self.evaluated.len();
        let elites = &self.evaluated[len - self.config.elite_count..];
        for _ in 0..self.config.elite_copies {
            next.extend(elites.iter().rev().cloned());
        }
    }

    /// Fitness-proportional pick from the last evaluated generation.
    ///
    /// `None` before the first epoch.
    pub fn genome_roulette<R>(&self, rng: &mut R) -> Option<&Genome>
    where
        R: Rng + ?Sized,
    {
        if self.evaluated.is_empty() {
            return None;
        }
        let selected = selection::roulette(&self.evaluated, self.stats.total_fitness, rng);
        Some(&self.evaluated[selected.index()])
    }

    /// One tournament pass over the last evaluated generation.
    ///
    /// Empty before the first epoch.
    pub fn tournament<R>(&self, rng: &mut R) -> Vec<&Genome>
    where
        R: Rng + ?Sized,
    {
        selection::tournament(&self.evaluated, rng)
            .into_iter()
            .map(|i| &self.evaluated[i])
            .collect()
    }

    /// Produces two children from two parents.
    ///
    /// The children always have zero fitness and own fresh weight vectors.
    pub fn crossover<R>(&self, mum: &Genome, dad: &Genome, rng: &mut R) -> (Genome, Genome)
    where
        R: Rng + ?Sized,
    {
        if !rng.random_bool(self.config.cross_rate) || mum == dad {
            return (
                Genome::new(mum.weights().to_vec()),
                Genome::new(dad.weights().to_vec()),
            );
        }

        let cut = random::index(rng, self.config.chromosome_length + 1);
        let (baby1, baby2) = weights::single_point_crossover(mum.weights(), dad.weights(), cut);
        (Genome::new(baby1), Genome::new(baby2))
    }

    /// Perturbs each weight of `genome` with probability `mutation_rate`.
    ///
    /// Returns the number of perturbed weights.
    pub fn mutate<R>(&self, genome: &mut Genome, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        weights::mutate(
            genome.weights_mut(),
            self.config.mutation_rate,
            self.config.max_perturbation,
            rng,
        )
    }
}

/// Parent source for one epoch's breeding loop.
enum ParentPicker {
    Roulette,
    Tournament { winners: Vec<usize>, cursor: usize },
}

impl ParentPicker {
    fn new<R>(engine: &EvolutionEngine, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        match engine.config.selection {
            SelectionStrategy::Roulette => {
                let total = engine.stats.total_fitness;
                if total <= 0.0 || !total.is_finite() {
                    log::warn!("total fitness is {total}, roulette falls back to uniform picks");
                }
                Self::Roulette
            }
            SelectionStrategy::Tournament => Self::Tournament {
                winners: selection::tournament(&engine.evaluated, rng),
                cursor: 0,
            },
        }
    }

    /// Indices of the next `(mum, dad)` pair.
    fn next_pair<R>(&mut self, engine: &EvolutionEngine, rng: &mut R) -> (usize, usize)
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Roulette => {
                let total = engine.stats.total_fitness;
                let mum = selection::roulette(&engine.evaluated, total, rng).index();
                let dad = selection::roulette(&engine.evaluated, total, rng).index();
                (mum, dad)
            }
            Self::Tournament { winners, cursor } => {
                // round-robin with wraparound: mum, dad, mum, dad, ...
                let mum = winners[*cursor % winners.len()];
                let dad = winners[(*cursor + 1) % winners.len()];
                *cursor = (*cursor + 2) % winners.len();
                (mum, dad)
            }
        }
    }
}
