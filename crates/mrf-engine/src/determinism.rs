use mrf_core::derive_substream_seed;

/// Derives the substream used to fill the label grid when no seed grid is
/// supplied.
pub fn initialization_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, 0)
}

/// Derives a sampler substream for callers splitting one master seed across
/// the components that consume randomness.
pub fn sampler_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, 1)
}

/// Derives an optimizer substream for callers splitting one master seed
/// across the components that consume randomness.
pub fn optimizer_seed(master_seed: u64) -> u64 {
    derive_substream_seed(master_seed, 2)
}
