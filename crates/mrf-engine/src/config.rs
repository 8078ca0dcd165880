use serde::{Deserialize, Serialize};

use mrf_core::{ErrorInfo, MrfError};

/// YAML-configurable parameters governing a labeling run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Size of the label alphabet `{0 .. num_classes - 1}`.
    pub num_classes: u32,
    /// Iteration budget. Zero is legal and returns the seed labels unchanged.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Converged when the fraction of sites changed in a full pass is at or
    /// below this value. Must lie in `[0, 1]`.
    #[serde(default)]
    pub error_tolerance: f64,
    /// Weight of the regularization energy against the fidelity energy.
    #[serde(default = "default_lambda")]
    pub lambda: f64,
    /// Chebyshev radius of the fidelity and regularization windows.
    #[serde(default = "default_radius")]
    pub neighborhood_radius: u32,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_max_iterations() -> u32 {
    100
}

fn default_lambda() -> f64 {
    1.0
}

fn default_radius() -> u32 {
    1
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_classes: 2,
            max_iterations: default_max_iterations(),
            error_tolerance: 0.0,
            lambda: default_lambda(),
            neighborhood_radius: default_radius(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Checks the grid-independent constraints.
    pub fn validate(&self) -> Result<(), MrfError> {
        if self.num_classes == 0 {
            return Err(MrfError::Config(ErrorInfo::new(
                "zero-classes",
                "number of classes must be positive",
            )));
        }
        if !(0.0..=1.0).contains(&self.error_tolerance) {
            return Err(MrfError::Config(
                ErrorInfo::new("tolerance-range", "error tolerance must lie in [0, 1]")
                    .with_context("error_tolerance", self.error_tolerance.to_string()),
            ));
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(MrfError::Config(
                ErrorInfo::new("negative-lambda", "lambda must be finite and non-negative")
                    .with_context("lambda", self.lambda.to_string()),
            ));
        }
        if self.neighborhood_radius == 0 {
            return Err(MrfError::Config(ErrorInfo::new(
                "zero-radius",
                "neighborhood radius must be at least one",
            )));
        }
        Ok(())
    }

    /// Checks all constraints, including the radius against the grid size.
    pub fn validate_for(&self, width: usize, height: usize) -> Result<(), MrfError> {
        self.validate()?;
        let min_dim = width.min(height);
        if self.neighborhood_radius as usize >= min_dim {
            return Err(MrfError::Config(
                ErrorInfo::new(
                    "radius-exceeds-grid",
                    "neighborhood radius must be smaller than the smallest grid dimension",
                )
                .with_context("radius", self.neighborhood_radius.to_string())
                .with_context("width", width.to_string())
                .with_context("height", height.to_string())
                .with_hint("reduce neighborhood_radius or supply a larger grid"),
            ));
        }
        Ok(())
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label used when deriving substream seeds.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}
