use posefit::config::AnchorLayout;
use posefit::engines::generation::{
    AnchorFitness, Correction, CorrectionFitness, FitnessFunction, Placement,
};
use posefit::types::{CorrectionSignal, EyePair, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn eyes() -> EyePair {
    EyePair::new(Point::new(100.0, 100.0), Point::new(150.0, 100.0))
}

#[test]
fn test_anchor_fitness_never_positive() {
    let fitness = AnchorFitness::default();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..1000 {
        let genome = Placement::new(
            rng.gen_range(-500.0..500.0),
            rng.gen_range(-500.0..500.0),
            rng.gen_range(-200.0..200.0),
            rng.gen_range(-200.0..200.0),
        );
        assert!(fitness.evaluate(&genome, &eyes()) <= 0.0);
    }
}

#[test]
fn test_anchor_fitness_zero_only_on_exact_fit() {
    let fitness = AnchorFitness::default();

    let exact = Placement::new(75.0, 80.0, 100.0, 50.0);
    assert_eq!(fitness.evaluate(&exact, &eyes()), 0.0);

    let shifted = Placement::new(76.0, 80.0, 100.0, 50.0);
    let score = fitness.evaluate(&shifted, &eyes());
    assert!(score < 0.0);
    assert!((score + 2.0).abs() < 1e-9);

    let too_narrow = Placement::new(75.0, 80.0, 90.0, 50.0);
    assert!(fitness.evaluate(&too_narrow, &eyes()) < 0.0);
}

#[test]
fn test_anchor_layout_is_configurable() {
    let layout = AnchorLayout {
        left_x: 0.2,
        right_x: 0.8,
        y: 0.5,
    };
    let fitness = AnchorFitness::new(layout);
    let genome = Placement::new(80.0, 75.0, 100.0, 50.0);

    let observed = EyePair::new(Point::new(100.0, 100.0), Point::new(160.0, 100.0));
    assert_eq!(fitness.evaluate(&genome, &observed), 0.0);
}

#[test]
fn test_evaluation_is_pure() {
    let anchor = AnchorFitness::default();
    let placement = Placement::new(61.3, 77.9, 88.1, 33.3);
    let first = anchor.evaluate(&placement, &eyes());
    let second = anchor.evaluate(&placement, &eyes());
    assert_eq!(first, second);

    let scalar = CorrectionFitness;
    let genome = Correction::new(-17.25);
    let signal = CorrectionSignal::new(40.0);
    assert_eq!(scalar.evaluate(&genome, &signal), scalar.evaluate(&genome, &signal));
}

#[test]
fn test_correction_fitness_bounds() {
    let fitness = CorrectionFitness;
    let signal = CorrectionSignal::new(40.0);

    assert_eq!(fitness.evaluate(&Correction::new(-40.0), &signal), 1.0);

    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..1000 {
        let genome = Correction::new(rng.gen_range(-1e6..1e6));
        let score = fitness.evaluate(&genome, &signal);
        assert!(score > 0.0 && score <= 1.0);
        assert!(score.is_finite());
    }
}

#[test]
fn test_correction_fitness_strictly_decreasing() {
    let fitness = CorrectionFitness;
    let signal = CorrectionSignal::new(40.0);

    // corrected error 0, 0.5, 1, ..., 100
    let scores: Vec<f64> = (0..=200)
        .map(|i| fitness.evaluate(&Correction::new(-40.0 + i as f64 * 0.5), &signal))
        .collect();

    assert!(scores.windows(2).all(|w| w[1] < w[0]));

    // Same corrected error on either side scores the same
    let below = fitness.evaluate(&Correction::new(-45.0), &signal);
    let above = fitness.evaluate(&Correction::new(-35.0), &signal);
    assert_eq!(below, above);
}
