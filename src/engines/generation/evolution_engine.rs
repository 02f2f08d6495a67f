use super::fitness::FitnessFunction;
use super::genome::GenomeCodec;
use super::operators::reproduce;
use super::population::{Individual, Population};
use super::progress::NoopProgress;
use super::seeding::Seeder;
use crate::config::{EvolutionSettings, Lifecycle};
use crate::error::{PosefitError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::marker::PhantomData;

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64);
}

/// Generational optimizer over any genome codec, fitness function and seeder.
///
/// One generation evaluates every individual against the observation, ranks
/// them by fitness, breeds the next generation with the configured
/// [`ReproductionPolicy`](crate::config::ReproductionPolicy) and re-evaluates
/// it, so [`best`](Self::best) always reflects the current population.
///
/// With [`Lifecycle::Fresh`] every [`run`](Self::run) starts from a new random
/// population. With [`Lifecycle::Persistent`] the population is seeded once,
/// on the first observation, and carried across calls; [`step`](Self::step)
/// advances it by exactly one generation per external tick.
pub struct Optimizer<G, O, F, S, R = StdRng> {
    settings: EvolutionSettings,
    fitness: F,
    seeder: S,
    rng: R,
    population: Option<Population<G>>,
    generation: usize,
    _observation: PhantomData<fn(&O)>,
}

impl<G, O, F, S> Optimizer<G, O, F, S, StdRng>
where
    G: GenomeCodec,
    F: FitnessFunction<G, O>,
    S: Seeder<G, O>,
{
    /// `seed` makes the run reproducible; `None` draws from OS entropy.
    pub fn new(
        settings: EvolutionSettings,
        fitness: F,
        seeder: S,
        seed: Option<u64>,
    ) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(settings, fitness, seeder, rng)
    }
}

impl<G, O, F, S, R> Optimizer<G, O, F, S, R>
where
    G: GenomeCodec,
    F: FitnessFunction<G, O>,
    S: Seeder<G, O>,
    R: Rng,
{
    pub fn with_rng(settings: EvolutionSettings, fitness: F, seeder: S, rng: R) -> Result<Self> {
        settings.validate(G::GENE_COUNT)?;

        Ok(Self {
            settings,
            fitness,
            seeder,
            rng,
            population: None,
            generation: 0,
            _observation: PhantomData,
        })
    }

    pub fn settings(&self) -> &EvolutionSettings {
        &self.settings
    }

    pub fn fitness_function(&self) -> &F {
        &self.fitness
    }

    /// Generations completed since the population was last seeded.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> Option<&Population<G>> {
        self.population.as_ref()
    }

    /// Current best individual; `None` before the first generation.
    pub fn best(&self) -> Option<&Individual<G>> {
        self.population.as_ref().map(Population::best)
    }

    /// Drops the population; the next call re-seeds.
    pub fn reset(&mut self) {
        self.population = None;
        self.generation = 0;
    }

    pub fn run(&mut self, observation: &O) -> Result<G> {
        self.run_with(observation, &mut NoopProgress)
    }

    /// Runs the configured number of generations and returns the best genome.
    pub fn run_with<C: ProgressCallback>(&mut self, observation: &O, callback: &mut C) -> Result<G> {
        if self.settings.lifecycle == Lifecycle::Fresh {
            self.reset();
        }

        for _ in 0..self.settings.generations {
            self.advance(observation, callback)?;
        }

        self.best()
            .map(|best| best.genome.clone())
            .ok_or_else(|| PosefitError::Genome("No population after run".to_string()))
    }

    pub fn step(&mut self, observation: &O) -> Result<&Individual<G>> {
        self.step_with(observation, &mut NoopProgress)
    }

    /// Advances exactly one generation.
    pub fn step_with<C: ProgressCallback>(
        &mut self,
        observation: &O,
        callback: &mut C,
    ) -> Result<&Individual<G>> {
        self.advance(observation, callback)?;
        self.best()
            .ok_or_else(|| PosefitError::Genome("No population after step".to_string()))
    }

    /// One frame tick. A missing observation skips the generation and leaves
    /// the population untouched.
    pub fn tick(&mut self, observation: Option<&O>) -> Result<Option<&Individual<G>>> {
        match observation {
            Some(observation) => self.step(observation).map(Some),
            None => {
                log::trace!("No observation; generation {} skipped", self.generation + 1);
                Ok(None)
            }
        }
    }

    fn seed_population(&mut self, observation: &O) -> Result<Population<G>> {
        let genomes: Vec<G> = (0..self.settings.population_size)
            .map(|_| self.seeder.seed(observation, &mut self.rng))
            .collect();
        Population::from_genomes(genomes)
    }

    fn advance<C: ProgressCallback>(&mut self, observation: &O, callback: &mut C) -> Result<()> {
        callback.on_generation_start(self.generation);

        let freshly_seeded = self.population.is_none();
        let mut population = match self.population.take() {
            Some(population) => population,
            None => self.seed_population(observation)?,
        };

        // Generation G is fully scored before G+1 is built
        population.evaluate(&self.fitness, observation);
        population.sort_by_fitness();

        let outcome = reproduce(
            &self.settings.reproduction,
            population.individuals(),
            &mut self.rng,
        )
        .and_then(|next| population.replace(next));

        if let Err(err) = outcome {
            if !freshly_seeded {
                self.population = Some(population);
            }
            return Err(err);
        }

        population.evaluate(&self.fitness, observation);
        let best_fitness = population.best().fitness;
        self.population = Some(population);

        callback.on_generation_complete(self.generation, best_fitness);
        self.generation += 1;
        Ok(())
    }
}
