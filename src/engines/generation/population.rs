use super::fitness::FitnessFunction;
use crate::error::{PosefitError, Result};

/// One candidate genome plus its last computed fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G> {
    pub genome: G,
    /// Stale between generations; 0.0 until first evaluated.
    pub fitness: f64,
}

impl<G> Individual<G> {
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: 0.0,
        }
    }
}

/// Fixed-size, never-empty collection of individuals.
#[derive(Debug, Clone)]
pub struct Population<G> {
    individuals: Vec<Individual<G>>,
}

impl<G> Population<G> {
    pub fn new(individuals: Vec<Individual<G>>) -> Result<Self> {
        if individuals.is_empty() {
            return Err(PosefitError::Configuration(
                "Population must contain at least one individual".to_string(),
            ));
        }
        Ok(Self { individuals })
    }

    pub fn from_genomes(genomes: Vec<G>) -> Result<Self> {
        Self::new(genomes.into_iter().map(Individual::new).collect())
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual<G>> {
        self.individuals.iter()
    }

    /// Re-scores every individual against the current observation.
    pub fn evaluate<O, F: FitnessFunction<G, O>>(&mut self, fitness: &F, observation: &O) {
        for individual in &mut self.individuals {
            individual.fitness = fitness.evaluate(&individual.genome, observation);
        }
    }

    /// Stable sort, fitness descending. NaN ranks last.
    pub fn sort_by_fitness(&mut self) {
        self.individuals
            .sort_by(|a, b| rank_key(b.fitness).total_cmp(&rank_key(a.fitness)));
    }

    /// Highest fitness; the first encountered wins ties. NaN is only
    /// returned when every fitness is NaN.
    pub fn best(&self) -> &Individual<G> {
        let mut best = &self.individuals[0];
        for individual in &self.individuals[1..] {
            if rank_key(individual.fitness) > rank_key(best.fitness) {
                best = individual;
            }
        }
        best
    }

    /// Swaps in the next generation. Its size must match.
    pub fn replace(&mut self, next: Vec<Individual<G>>) -> Result<()> {
        if next.len() != self.len() {
            return Err(PosefitError::Genome(format!(
                "Next generation has {} individuals, expected {}",
                next.len(),
                self.len()
            )));
        }
        self.individuals = next;
        Ok(())
    }
}

/// Ordering key: NaN sorts below every number and signed zeros compare equal.
fn rank_key(fitness: f64) -> f64 {
    if fitness.is_nan() {
        f64::NEG_INFINITY
    } else if fitness == 0.0 {
        0.0
    } else {
        fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(values: &[f64]) -> Population<usize> {
        let individuals = values
            .iter()
            .enumerate()
            .map(|(i, &f)| Individual {
                genome: i,
                fitness: f,
            })
            .collect();
        Population::new(individuals).unwrap()
    }

    #[test]
    fn test_empty_population_rejected() {
        assert!(Population::<usize>::new(Vec::new()).is_err());
    }

    #[test]
    fn test_best_prefers_first_on_ties() {
        let pop = scored(&[0.1, 0.9, 0.5, 0.9]);
        assert_eq!(pop.best().genome, 1);
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut pop = scored(&[0.2, 0.7, 0.2, 0.9]);
        pop.sort_by_fitness();
        let order: Vec<usize> = pop.iter().map(|i| i.genome).collect();
        assert_eq!(order, vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_replace_keeps_size() {
        let mut pop = scored(&[0.1, 0.2]);
        assert!(pop.replace(vec![Individual::new(7)]).is_err());
        assert!(pop
            .replace(vec![Individual::new(7), Individual::new(8)])
            .is_ok());
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_nan_fitness_ranks_last() {
        let values: Vec<f64> = (0..40)
            .map(|i| if i % 3 == 0 { f64::NAN } else { i as f64 })
            .collect();
        let mut pop = scored(&values);
        pop.sort_by_fitness();

        let fitnesses: Vec<f64> = pop.iter().map(|i| i.fitness).collect();
        let finite = fitnesses.iter().take_while(|f| !f.is_nan()).count();
        assert_eq!(finite, 26);
        assert!(fitnesses[finite..].iter().all(|f| f.is_nan()));
        assert!(fitnesses[..finite].windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(pop.individuals()[0].genome, 38);
    }

    #[test]
    fn test_best_skips_nan() {
        assert_eq!(scored(&[f64::NAN, -3.0, f64::NAN, -1.0]).best().genome, 3);
        assert_eq!(scored(&[f64::NAN, f64::NAN]).best().genome, 0);
    }

    #[test]
    fn test_signed_zero_ties_stay_stable() {
        let mut pop = scored(&[-1.0, -0.0, 0.0]);
        pop.sort_by_fitness();
        let order: Vec<usize> = pop.iter().map(|i| i.genome).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(pop.best().genome, 1);
    }
}
