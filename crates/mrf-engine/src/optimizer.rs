//! Acceptance optimizers.
//!
//! An optimizer turns the signed energy delta of a proposal into an
//! accept/reject decision. Optimizers are stateless across calls except for
//! the RNG stream they own; a rejected proposal simply leaves the site's
//! label unchanged for that pass.

use mrf_core::{ErrorInfo, MrfError, RngHandle};

/// Accept/reject contract applied after sampling.
pub trait Optimizer {
    /// Decides whether to accept a proposal with the given energy delta.
    fn decide(&mut self, delta_energy: f64) -> bool;
}

/// Iterated Conditional Modes: accept only strict improvements.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcmOptimizer;

impl IcmOptimizer {
    /// Creates the deterministic greedy optimizer.
    pub fn new() -> Self {
        Self
    }
}

impl Optimizer for IcmOptimizer {
    fn decide(&mut self, delta_energy: f64) -> bool {
        delta_energy < 0.0
    }
}

/// Metropolis acceptance with a fixed temperature.
///
/// Strict improvements are always accepted, zero deltas always rejected, and
/// degradations accepted with probability `exp(-delta / temperature)`.
#[derive(Debug, Clone)]
pub struct MetropolisOptimizer {
    temperature: f64,
    rng: RngHandle,
}

impl MetropolisOptimizer {
    /// Creates the optimizer with its own seeded RNG stream. The temperature
    /// must be positive and finite.
    pub fn new(temperature: f64, seed: u64) -> Result<Self, MrfError> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(MrfError::Config(
                ErrorInfo::new("non-positive-temperature", "temperature must be positive")
                    .with_context("temperature", temperature.to_string()),
            ));
        }
        Ok(Self {
            temperature,
            rng: RngHandle::from_seed(seed),
        })
    }

    /// Temperature governing the acceptance of energy-increasing moves.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl Optimizer for MetropolisOptimizer {
    fn decide(&mut self, delta_energy: f64) -> bool {
        if delta_energy < 0.0 {
            return true;
        }
        if delta_energy == 0.0 {
            return false;
        }
        let acceptance = (-delta_energy / self.temperature).exp();
        self.rng.next_f64() < acceptance
    }
}
