#![deny(missing_docs)]

//! Markov random field labeling engine for 2-D rasters.
//!
//! The engine assigns a label (class index or restored intensity) to every
//! site of a grid by alternating energy-based candidate sampling and
//! acceptance decisions until convergence. Energy models, samplers and
//! optimizers are injected strategy objects; the kernel owns the iteration
//! loop, border-aware neighborhood windowing and convergence bookkeeping.

/// Run configuration schema and validation.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Pairwise energy model implementations.
pub mod energy;
/// Core labeling kernel and the public `run` entry point.
pub mod kernel;
/// Convergence counters and per-iteration metrics.
pub mod metrics;
/// Acceptance optimizer implementations.
pub mod optimizer;
/// Candidate-label sampler implementations.
pub mod sampler;
/// YAML (de)serialization helpers for configurations.
pub mod serde;

pub use config::{EngineConfig, SeedPolicy};
pub use energy::{
    EdgeFidelity, EnergyModel, FisherClassification, Gaussian, GaussianClassification, Potts,
};
pub use kernel::{run, RunSummary, StopCondition};
pub use metrics::{ConvergenceState, IterationSample, MetricsRecorder};
pub use optimizer::{IcmOptimizer, MetropolisOptimizer, Optimizer};
pub use sampler::{MapSampler, Proposal, RandomMapSampler, RandomSampler, Sampler, SiteContext};
