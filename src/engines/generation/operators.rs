use super::genome::GenomeCodec;
use super::population::Individual;
use crate::config::ReproductionPolicy;
use crate::error::Result;
use rand::Rng;

/// Averaging crossover: each child gene is the mean of the parents' genes.
pub fn average_crossover(parent1: &[f64], parent2: &[f64]) -> Vec<f64> {
    parent1
        .iter()
        .zip(parent2)
        .map(|(a, b)| (a + b) / 2.0)
        .collect()
}

/// Coin-flip crossover: each child gene is copied from one parent, 50/50.
pub fn coinflip_crossover<R: Rng>(parent1: &[f64], parent2: &[f64], rng: &mut R) -> Vec<f64> {
    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| if rng.gen_bool(0.5) { a } else { b })
        .collect()
}

/// Unconditional perturbation: gene `i` moves by `U(-amplitudes[i], amplitudes[i])`.
pub fn jitter<R: Rng>(genes: &mut [f64], amplitudes: &[f64], rng: &mut R) {
    for (gene, &amplitude) in genes.iter_mut().zip(amplitudes) {
        if amplitude > 0.0 {
            *gene += rng.gen_range(-amplitude..=amplitude);
        }
    }
}

/// Mutation: each gene moves by `U(-amplitude, amplitude)` with probability `mutation_rate`.
pub fn mutate<R: Rng>(genes: &mut [f64], mutation_rate: f64, amplitude: f64, rng: &mut R) {
    for gene in genes.iter_mut() {
        if rng.gen::<f64>() < mutation_rate && amplitude > 0.0 {
            *gene += rng.gen_range(-amplitude..=amplitude);
        }
    }
}

/// Indices into `fitnesses`, each repeated `floor(fitness * scale)` times.
/// Non-positive and NaN fitness contribute nothing.
pub fn build_mating_pool(fitnesses: &[f64], scale: f64) -> Vec<usize> {
    let mut pool = Vec::new();
    for (i, &fitness) in fitnesses.iter().enumerate() {
        let copies = (fitness * scale).floor();
        if copies >= 1.0 {
            pool.extend(std::iter::repeat(i).take(copies as usize));
        }
    }
    pool
}

/// Builds the next generation from a population ranked by fitness descending.
/// The result always has `ranked.len()` individuals.
pub fn reproduce<G: GenomeCodec, R: Rng>(
    policy: &ReproductionPolicy,
    ranked: &[Individual<G>],
    rng: &mut R,
) -> Result<Vec<Individual<G>>> {
    match policy {
        ReproductionPolicy::ElitistAveraging {
            elite_count,
            jitter: amplitudes,
        } => elitist_averaging(ranked, *elite_count, amplitudes, rng),
        ReproductionPolicy::MatingPool {
            pool_scale,
            mutation_rate,
            mutation_amplitude,
        } => mating_pool(ranked, *pool_scale, *mutation_rate, *mutation_amplitude, rng),
    }
}

fn elitist_averaging<G: GenomeCodec, R: Rng>(
    ranked: &[Individual<G>],
    elite_count: usize,
    amplitudes: &[f64],
    rng: &mut R,
) -> Result<Vec<Individual<G>>> {
    let size = ranked.len();
    let mut next_generation: Vec<Individual<G>> =
        ranked.iter().take(elite_count).cloned().collect();

    // Parents come from the top half; at least the best one
    let parent_pool = (size / 2).max(1);

    while next_generation.len() < size {
        let parent1 = ranked[rng.gen_range(0..parent_pool)].genome.encode();
        let parent2 = ranked[rng.gen_range(0..parent_pool)].genome.encode();

        let mut child = average_crossover(&parent1, &parent2);
        jitter(&mut child, amplitudes, rng);

        next_generation.push(Individual::new(G::decode(&child)?));
    }

    Ok(next_generation)
}

fn mating_pool<G: GenomeCodec, R: Rng>(
    ranked: &[Individual<G>],
    pool_scale: f64,
    mutation_rate: f64,
    mutation_amplitude: f64,
    rng: &mut R,
) -> Result<Vec<Individual<G>>> {
    let size = ranked.len();
    let fitnesses: Vec<f64> = ranked.iter().map(|i| i.fitness).collect();
    let pool = build_mating_pool(&fitnesses, pool_scale);
    log::trace!("Mating pool holds {} entries for {} individuals", pool.len(), size);

    let mut next_generation = Vec::with_capacity(size);
    for _ in 0..size {
        let parent1 = ranked[pick_parent(&pool, size, rng)].genome.encode();
        let parent2 = ranked[pick_parent(&pool, size, rng)].genome.encode();

        let mut child = coinflip_crossover(&parent1, &parent2, rng);
        mutate(&mut child, mutation_rate, mutation_amplitude, rng);

        next_generation.push(Individual::new(G::decode(&child)?));
    }

    Ok(next_generation)
}

/// Uniform draw from the pool, with replacement. An empty pool (every
/// fitness below `1 / pool_scale`) falls back to the whole population.
fn pick_parent<R: Rng>(pool: &[usize], size: usize, rng: &mut R) -> usize {
    if pool.is_empty() {
        rng.gen_range(0..size)
    } else {
        pool[rng.gen_range(0..pool.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::genome::{Correction, Placement};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_average_crossover() {
        assert_eq!(
            average_crossover(&[0.0, 10.0, 4.0], &[2.0, 20.0, -4.0]),
            vec![1.0, 15.0, 0.0]
        );
    }

    #[test]
    fn test_coinflip_takes_genes_from_parents() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let child = coinflip_crossover(&[1.0, 2.0], &[10.0, 20.0], &mut rng);
            assert!(child[0] == 1.0 || child[0] == 10.0);
            assert!(child[1] == 2.0 || child[1] == 20.0);
        }
    }

    #[test]
    fn test_jitter_bounded_per_gene() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let mut genes = vec![0.0, 0.0, 0.0, 0.0];
            jitter(&mut genes, &[5.0, 5.0, 5.0, 2.0], &mut rng);
            assert!(genes[..3].iter().all(|g| g.abs() <= 5.0));
            assert!(genes[3].abs() <= 2.0);
        }
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut genes = vec![1.5];
        for _ in 0..100 {
            mutate(&mut genes, 0.0, 5.0, &mut rng);
        }
        assert_eq!(genes, vec![1.5]);
    }

    #[test]
    fn test_mutation_rate_one_perturbs_every_gene() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let mut genes = vec![10.0, -3.0];
            mutate(&mut genes, 1.0, 5.0, &mut rng);
            assert!(genes[0] != 10.0 && (genes[0] - 10.0).abs() <= 5.0);
            assert!(genes[1] != -3.0 && (genes[1] + 3.0).abs() <= 5.0);
        }
    }

    #[test]
    fn test_mutation_rate_gates_frequency() {
        let mut rng = StdRng::seed_from_u64(23);
        let trials = 10_000;
        let mut mutated = 0;
        for _ in 0..trials {
            let mut genes = vec![0.0];
            mutate(&mut genes, 0.1, 5.0, &mut rng);
            if genes[0] != 0.0 {
                mutated += 1;
            }
        }
        // Binomial(10000, 0.1): sd is 30
        assert!((850..=1150).contains(&mutated), "mutated {} of {}", mutated, trials);
    }

    #[test]
    fn test_mating_pool_repetition() {
        let pool = build_mating_pool(&[0.5, 0.009, 0.031, -1.0, f64::NAN], 100.0);
        assert_eq!(pool.iter().filter(|&&i| i == 0).count(), 50);
        assert_eq!(pool.iter().filter(|&&i| i == 1).count(), 0);
        assert_eq!(pool.iter().filter(|&&i| i == 2).count(), 3);
        assert_eq!(pool.len(), 53);
    }

    #[test]
    fn test_elites_lead_next_generation() {
        let mut rng = StdRng::seed_from_u64(1);
        let ranked: Vec<Individual<Placement>> = (0..6)
            .map(|i| Individual {
                genome: Placement::new(i as f64, 0.0, 80.0, 30.0),
                fitness: -(i as f64),
            })
            .collect();
        let policy = ReproductionPolicy::ElitistAveraging {
            elite_count: 2,
            jitter: vec![5.0, 5.0, 5.0, 2.0],
        };

        let next = reproduce(&policy, &ranked, &mut rng).unwrap();
        assert_eq!(next.len(), 6);
        assert_eq!(next[0], ranked[0]);
        assert_eq!(next[1], ranked[1]);
        // Children descend from the top three only: tx in [0, 2] plus jitter
        for child in &next[2..] {
            assert!(child.genome.tx >= -5.0 && child.genome.tx <= 7.0);
        }
    }

    #[test]
    fn test_empty_pool_falls_back_to_uniform() {
        let mut rng = StdRng::seed_from_u64(9);
        let ranked: Vec<Individual<Correction>> = (0..4)
            .map(|i| Individual {
                genome: Correction::new(i as f64),
                fitness: 0.0,
            })
            .collect();
        let policy = ReproductionPolicy::MatingPool {
            pool_scale: 100.0,
            mutation_rate: 0.0,
            mutation_amplitude: 5.0,
        };

        let next = reproduce(&policy, &ranked, &mut rng).unwrap();
        assert_eq!(next.len(), 4);
        for child in &next {
            assert!([0.0, 1.0, 2.0, 3.0].contains(&child.genome.correction));
        }
    }
}
