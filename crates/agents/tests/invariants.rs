//! Randomized invariant checks for all allocators.
//!
//! Uses a seeded RNG so failures are reproducible.

use agents::{Agent, BuyHold, ConstantRebalancer, Eg, UpdateOutcome};
use experts::{Dummy, Expert, ExpertPanel, MeanReversion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use types::WEIGHT_TOLERANCE;

const ASSETS: usize = 5;
const PERIODS: usize = 300;

fn dummy_panel() -> ExpertPanel {
    let experts = (0..ASSETS)
        .map(|i| Box::new(Dummy::new(format!("D{i}"))) as Box<dyn Expert>)
        .collect();
    ExpertPanel::new(experts).unwrap()
}

fn mean_reversion_panel() -> ExpertPanel {
    let experts = (0..ASSETS)
        .map(|i| Box::new(MeanReversion::new(format!("M{i}"), 10, 1.5).unwrap()) as Box<dyn Expert>)
        .collect();
    ExpertPanel::new(experts).unwrap()
}

/// Geometric random walk, one price vector per period.
fn random_prices(seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut prices = vec![100.0; ASSETS];
    (0..PERIODS)
        .map(|_| {
            for p in prices.iter_mut() {
                *p *= 1.0 + rng.gen_range(-0.05..0.05);
            }
            prices.clone()
        })
        .collect()
}

fn assert_simplex(weights: &[f64]) {
    assert!(weights.iter().all(|w| w.is_finite() && *w >= 0.0));
    let sum: f64 = weights.iter().sum();
    assert!((sum - 1.0).abs() < WEIGHT_TOLERANCE, "weights sum to {sum}");
}

fn drive(agent: &mut dyn Agent, prices: &[Vec<f64>]) {
    for period in prices {
        let before = agent.weights_history().len();
        agent.experts_mut().update_all(period).unwrap();
        let outcome = agent.update();

        assert_simplex(agent.weights());
        assert_eq!(agent.weights().len(), ASSETS);
        assert_eq!(agent.rewards().len(), ASSETS);

        let expected = if outcome.logged() { before + 1 } else { before };
        assert_eq!(agent.weights_history().len(), expected);
    }
}

#[test]
fn eg_weights_stay_on_simplex() {
    for seed in 0..5 {
        let prices = random_prices(seed);
        let mut dummy = Eg::new(dummy_panel(), 0.05).unwrap();
        drive(&mut dummy, &prices);

        let mut reverting = Eg::new(mean_reversion_panel(), 0.05).unwrap();
        drive(&mut reverting, &prices);

        let mut aggressive = Eg::new(dummy_panel(), 50.0).unwrap();
        drive(&mut aggressive, &prices);
    }
}

#[test]
fn buy_hold_weights_stay_on_simplex() {
    let prices = random_prices(42);
    let mut agent = BuyHold::new(dummy_panel(), None).unwrap();
    drive(&mut agent, &prices);

    // Drifted weights match each asset's value share.
    let last = prices.last().unwrap();
    let first = &prices[0];
    let values: Vec<f64> = last.iter().zip(first).map(|(l, f)| l / f).collect();
    let total: f64 = values.iter().sum();
    for (w, v) in agent.weights().iter().zip(&values) {
        assert!((w - v / total).abs() < 1e-9);
    }
}

#[test]
fn constant_rebalancer_weights_are_bit_identical() {
    let prices = random_prices(7);
    let initial = vec![0.1, 0.2, 0.3, 0.15, 0.25];
    let mut agent = ConstantRebalancer::new(dummy_panel(), Some(initial.clone())).unwrap();
    let normalized = agent.weights().to_vec();

    drive(&mut agent, &prices);

    assert_eq!(agent.weights(), normalized.as_slice());
    assert_eq!(agent.weights_history().len(), PERIODS - 1);
    assert!(agent.weights_history().iter().all(|w| *w == normalized));
}

#[test]
fn no_update_before_every_reward_is_positive() {
    // Mean-reversion experts need one seed observation before any reward.
    let prices = random_prices(3);
    let mut agent = Eg::new(mean_reversion_panel(), 0.05).unwrap();

    agent.experts_mut().update_all(&prices[0]).unwrap();
    assert!(matches!(agent.update(), UpdateOutcome::Skipped(_)));
    assert!(agent.weights_history().is_empty());
    assert!(agent.weights().iter().all(|w| *w == 1.0 / ASSETS as f64));
}
