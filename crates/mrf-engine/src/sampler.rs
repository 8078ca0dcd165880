//! Candidate-label samplers.
//!
//! A sampler looks at one site through its input and label neighborhoods and
//! returns a proposed label together with the signed energy delta the change
//! would incur. Acceptance is decided separately by an
//! [`crate::optimizer::Optimizer`].

use mrf_core::{ErrorInfo, Label, MrfError, NeighborhoodView, RngHandle};

use crate::energy::EnergyModel;

/// Everything a sampler may read about the site under consideration.
pub struct SiteContext<'a> {
    /// Input-grid window centered on the site.
    pub input: &'a NeighborhoodView,
    /// Label-grid window centered on the site.
    pub labels: &'a NeighborhoodView,
    /// Data fidelity energy model.
    pub fidelity: &'a dyn EnergyModel,
    /// Spatial regularization energy model.
    pub regularization: &'a dyn EnergyModel,
    /// Weight of the regularization term.
    pub lambda: f64,
    /// Size of the label alphabet.
    pub num_classes: u32,
    /// Label currently assigned to the site.
    pub current_label: Label,
}

/// Candidate produced by a sampler for one site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proposal {
    /// Proposed label. May equal the current label (delta zero).
    pub label: Label,
    /// `energy(proposed) - energy(current)` for the site.
    pub delta_energy: f64,
}

/// Total site energy of a candidate label: fidelity plus weighted
/// regularization, each averaged over the corresponding window.
pub fn total_energy(ctx: &SiteContext<'_>, label: Label) -> Result<f64, MrfError> {
    let value = f64::from(label);
    let fidelity = ctx.fidelity.neighborhood_value(value, ctx.input)?;
    let regularization = ctx.regularization.neighborhood_value(value, ctx.labels)?;
    Ok(fidelity + ctx.lambda * regularization)
}

/// Per-site candidate generation contract.
pub trait Sampler {
    /// Proposes a label for the site described by `ctx`.
    fn compute(&mut self, ctx: &SiteContext<'_>) -> Result<Proposal, MrfError>;
}

fn ensure_classes(num_classes: u32) -> Result<(), MrfError> {
    if num_classes == 0 {
        return Err(MrfError::Config(ErrorInfo::new(
            "zero-classes",
            "sampler invoked with an empty label alphabet",
        )));
    }
    Ok(())
}

/// Proposes a uniformly random label from the alphabet.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: RngHandle,
}

impl RandomSampler {
    /// Creates a sampler with its own seeded RNG stream.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RngHandle::from_seed(seed),
        }
    }
}

impl Sampler for RandomSampler {
    fn compute(&mut self, ctx: &SiteContext<'_>) -> Result<Proposal, MrfError> {
        ensure_classes(ctx.num_classes)?;
        let candidate = self.rng.next_label(ctx.num_classes);
        let before = total_energy(ctx, ctx.current_label)?;
        let after = total_energy(ctx, candidate)?;
        Ok(Proposal {
            label: candidate,
            delta_energy: after - before,
        })
    }
}

/// Greedy maximum a posteriori sampler.
///
/// Evaluates every label in the alphabet and keeps the first one whose total
/// energy is strictly below the running best; the current label wins when no
/// candidate improves on it.
#[derive(Debug, Clone, Default)]
pub struct MapSampler;

impl MapSampler {
    /// Creates the deterministic MAP sampler.
    pub fn new() -> Self {
        Self
    }
}

impl Sampler for MapSampler {
    fn compute(&mut self, ctx: &SiteContext<'_>) -> Result<Proposal, MrfError> {
        ensure_classes(ctx.num_classes)?;
        let current_energy = total_energy(ctx, ctx.current_label)?;
        let mut best = ctx.current_label;
        let mut best_energy = current_energy;
        for candidate in 0..ctx.num_classes {
            let energy = total_energy(ctx, candidate)?;
            if energy < best_energy {
                best = candidate;
                best_energy = energy;
            }
        }
        Ok(Proposal {
            label: best,
            delta_energy: best_energy - current_energy,
        })
    }
}

/// Gibbs sampler: draws a label with probability proportional to
/// `exp(-energy(label))`.
#[derive(Debug, Clone)]
pub struct RandomMapSampler {
    rng: RngHandle,
}

impl RandomMapSampler {
    /// Creates a sampler with its own seeded RNG stream.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RngHandle::from_seed(seed),
        }
    }
}

impl Sampler for RandomMapSampler {
    fn compute(&mut self, ctx: &SiteContext<'_>) -> Result<Proposal, MrfError> {
        ensure_classes(ctx.num_classes)?;
        let current_energy = total_energy(ctx, ctx.current_label)?;

        let mut energies = Vec::with_capacity(ctx.num_classes as usize);
        let mut cumulative = Vec::with_capacity(ctx.num_classes as usize);
        let mut running = 0.0;
        for candidate in 0..ctx.num_classes {
            let energy = total_energy(ctx, candidate)?;
            running += (-energy).exp();
            energies.push(energy);
            cumulative.push(running);
        }

        // Every weight can underflow to zero when all candidates are very
        // unlikely; keep the current label rather than draw from nothing.
        if running == 0.0 {
            return Ok(Proposal {
                label: ctx.current_label,
                delta_energy: 0.0,
            });
        }

        let draw = self.rng.next_f64() * running;
        // Clamp covers the rounding case where the draw lands on the total.
        let mut chosen = ctx.num_classes - 1;
        for (candidate, &bound) in cumulative.iter().enumerate() {
            if bound > draw {
                chosen = candidate as Label;
                break;
            }
        }

        Ok(Proposal {
            label: chosen,
            delta_energy: energies[chosen as usize] - current_energy,
        })
    }
}
