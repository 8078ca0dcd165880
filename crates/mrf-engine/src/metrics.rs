//! Convergence bookkeeping and per-iteration metrics.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Counters accumulated over one full pass of the raster.
///
/// Reset at the start of each iteration and consumed at its end to decide
/// whether the run has converged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConvergenceState {
    /// Number of sites whose label changed during the pass.
    pub sites_changed: usize,
    /// Sum of the signed energy deltas of the accepted changes.
    pub energy_delta: f64,
}

impl ConvergenceState {
    /// Clears the counters for the next pass.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records one accepted label change.
    pub fn record_change(&mut self, delta_energy: f64) {
        self.sites_changed += 1;
        self.energy_delta += delta_energy;
    }

    /// Fraction of sites changed relative to the raster size.
    pub fn changed_fraction(&self, total_sites: usize) -> f64 {
        if total_sites == 0 {
            return 0.0;
        }
        self.sites_changed as f64 / total_sites as f64
    }
}

/// Per-iteration metrics stored for CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IterationSample {
    /// Zero-based iteration number.
    pub iteration: u32,
    /// Number of sites whose label changed during the pass.
    pub sites_changed: usize,
    /// `sites_changed / total_sites` for the pass.
    pub changed_fraction: f64,
    /// Accumulated signed energy delta of the accepted changes.
    pub energy_delta: f64,
}

/// Collects per-iteration samples over a run.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    samples: Vec<IterationSample>,
}

impl MetricsRecorder {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one completed pass.
    pub fn push_sample(&mut self, sample: IterationSample) {
        self.samples.push(sample);
    }

    /// Returns an immutable view over the recorded samples.
    pub fn samples(&self) -> &[IterationSample] {
        &self.samples
    }

    /// Consumes the recorder, yielding the collected samples.
    pub fn into_samples(self) -> Vec<IterationSample> {
        self.samples
    }

    /// Writes the recorded metrics to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(file, "iteration,sites_changed,changed_fraction,energy_delta")?;
        for sample in &self.samples {
            writeln!(
                file,
                "{},{},{:.6},{:.6}",
                sample.iteration, sample.sites_changed, sample.changed_fraction, sample.energy_delta
            )?;
        }
        Ok(())
    }
}
