#![deny(missing_docs)]

//! Core data types for the MRF labeling engine: structured errors, a
//! deterministic RNG handle with substream derivation, and row-major 2-D
//! grids with boundary-aware neighborhood views.

pub mod errors;
pub mod grid;
pub mod rng;

pub use errors::{ErrorInfo, MrfError};
pub use grid::{Grid, NeighborhoodView};
pub use rng::{derive_substream_seed, RngHandle};

/// Discrete label assigned to a site: a class index for classification runs,
/// or an intensity level for restoration runs.
pub type Label = u32;
