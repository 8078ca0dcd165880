//! Core labeling kernel and the public [`run`] entry point.

use mrf_core::{ErrorInfo, Grid, Label, MrfError, NeighborhoodView, RngHandle};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::determinism;
use crate::energy::EnergyModel;
use crate::metrics::{ConvergenceState, IterationSample, MetricsRecorder};
use crate::optimizer::Optimizer;
use crate::sampler::{Sampler, SiteContext};

/// Why the iteration loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopCondition {
    /// The fraction of changed sites dropped to the configured tolerance.
    ErrorTolerance,
    /// The iteration budget ran out before convergence.
    MaximumIterations,
}

/// Summary returned to callers after a run completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Final label grid, same dimensions as the input grid.
    pub labels: Grid<Label>,
    /// Number of full passes actually executed.
    pub iterations_run: u32,
    /// Whether the run converged or exhausted its budget.
    pub stop_condition: StopCondition,
    /// Per-iteration convergence samples.
    pub samples: Vec<IterationSample>,
    /// Seed label from the run's [`crate::config::SeedPolicy`], carried so
    /// persisted summaries identify the stream that produced them.
    pub seed_label: Option<String>,
}

/// Runs the labeling loop to convergence or budget exhaustion.
///
/// The scan is sequential in raster order and mutates the label grid in
/// place, so a site's neighborhood may observe labels already updated earlier
/// in the same pass (Gauss-Seidel relaxation). Results therefore depend on
/// the scan order; callers needing reproducibility pin the sampler and
/// optimizer seeds.
pub fn run(
    config: &EngineConfig,
    input: &Grid<f64>,
    seed_labels: Option<&Grid<Label>>,
    fidelity: &dyn EnergyModel,
    regularization: &dyn EnergyModel,
    sampler: &mut dyn Sampler,
    optimizer: &mut dyn Optimizer,
) -> Result<RunSummary, MrfError> {
    let width = input.width();
    let height = input.height();
    config.validate_for(width, height)?;

    let mut labels = initial_labels(config, input, seed_labels)?;
    let total_sites = labels.len();
    let radius = config.neighborhood_radius as usize;

    let mut input_view = NeighborhoodView::with_radius(radius);
    let mut label_view = NeighborhoodView::with_radius(radius);
    let mut state = ConvergenceState::default();
    let mut recorder = MetricsRecorder::new();

    let mut iterations_run = 0u32;
    let mut stop_condition = StopCondition::MaximumIterations;

    for iteration in 0..config.max_iterations {
        state.reset();
        for y in 0..height {
            for x in 0..width {
                input_view.fill_from(input, x, y);
                label_view.fill_from(&labels, x, y);
                let current = labels.get(x, y);
                let ctx = SiteContext {
                    input: &input_view,
                    labels: &label_view,
                    fidelity,
                    regularization,
                    lambda: config.lambda,
                    num_classes: config.num_classes,
                    current_label: current,
                };
                let proposal = sampler.compute(&ctx)?;
                if optimizer.decide(proposal.delta_energy) && proposal.label != current {
                    // Written immediately: later sites in this pass see it.
                    labels.set(x, y, proposal.label);
                    state.record_change(proposal.delta_energy);
                }
            }
        }

        iterations_run = iteration + 1;
        let changed_fraction = state.changed_fraction(total_sites);
        recorder.push_sample(IterationSample {
            iteration,
            sites_changed: state.sites_changed,
            changed_fraction,
            energy_delta: state.energy_delta,
        });

        if changed_fraction <= config.error_tolerance {
            stop_condition = StopCondition::ErrorTolerance;
            break;
        }
    }

    Ok(RunSummary {
        labels,
        iterations_run,
        stop_condition,
        samples: recorder.into_samples(),
        seed_label: config.seed_policy.label.clone(),
    })
}

fn initial_labels(
    config: &EngineConfig,
    input: &Grid<f64>,
    seed_labels: Option<&Grid<Label>>,
) -> Result<Grid<Label>, MrfError> {
    match seed_labels {
        Some(seed) => {
            if seed.width() != input.width() || seed.height() != input.height() {
                return Err(MrfError::Config(
                    ErrorInfo::new(
                        "seed-dimension-mismatch",
                        "seed label grid must match the input dimensions",
                    )
                    .with_context(
                        "input",
                        format!("{}x{}", input.width(), input.height()),
                    )
                    .with_context("seed", format!("{}x{}", seed.width(), seed.height())),
                ));
            }
            Ok(seed.clone())
        }
        None => {
            let mut rng = RngHandle::from_seed(determinism::initialization_seed(
                config.seed_policy.master_seed,
            ));
            let mut labels = Grid::filled(input.width(), input.height(), 0 as Label)?;
            for y in 0..labels.height() {
                for x in 0..labels.width() {
                    labels.set(x, y, rng.next_label(config.num_classes));
                }
            }
            Ok(labels)
        }
    }
}
