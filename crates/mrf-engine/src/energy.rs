//! Pairwise energy models for fidelity and regularization terms.
//!
//! Every model exposes the same narrow contract: `pair_value(a, b)` where `a`
//! is the observed grid value at a neighbor offset (an input sample for
//! fidelity models, a neighbor label for regularization models) and `b` is
//! the candidate label under evaluation. `neighborhood_value` averages
//! `pair_value` over the valid offsets of a window, excluding the center.

use std::f64::consts::PI;

use mrf_core::{ErrorInfo, MrfError, NeighborhoodView};

/// Pairwise energy contract shared by fidelity and regularization models.
pub trait EnergyModel {
    /// Energy contribution of one `(neighbor value, candidate label)` pair.
    fn pair_value(&self, a: f64, b: f64) -> Result<f64, MrfError>;

    /// Arithmetic mean of [`EnergyModel::pair_value`] over all valid offsets
    /// of the window, excluding the center. Returns `0.0` when no offset is
    /// valid; the engine never produces that case for radius >= 1 on grids of
    /// at least 2x2 sites.
    fn neighborhood_value(&self, candidate: f64, view: &NeighborhoodView) -> Result<f64, MrfError> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for neighbor in view.valid_neighbors() {
            sum += self.pair_value(neighbor, candidate)?;
            count += 1;
        }
        if count == 0 {
            return Ok(0.0);
        }
        Ok(sum / count as f64)
    }
}

/// Potts regularization: `-beta` when the labels agree, `+beta` otherwise.
#[derive(Debug, Clone)]
pub struct Potts {
    beta: f64,
}

impl Potts {
    /// Creates a Potts model with the given interaction strength.
    pub fn new(beta: f64) -> Self {
        Self { beta }
    }
}

impl EnergyModel for Potts {
    fn pair_value(&self, a: f64, b: f64) -> Result<f64, MrfError> {
        Ok(if a == b { -self.beta } else { self.beta })
    }
}

/// Quadratic restoration fidelity: `(a - b)^2`. No parameters.
#[derive(Debug, Clone, Default)]
pub struct Gaussian;

impl EnergyModel for Gaussian {
    fn pair_value(&self, a: f64, b: f64) -> Result<f64, MrfError> {
        let diff = a - b;
        Ok(diff * diff)
    }
}

/// Edge-preserving restoration regularization:
/// `(a - b)^2 / (1 + (a - b)^2)`. No parameters; bounded in `[0, 1)`.
#[derive(Debug, Clone, Default)]
pub struct EdgeFidelity;

impl EnergyModel for EdgeFidelity {
    fn pair_value(&self, a: f64, b: f64) -> Result<f64, MrfError> {
        let sq = (a - b) * (a - b);
        Ok(sq / (1.0 + sq))
    }
}

/// Gaussian negative log-likelihood fidelity for classification.
///
/// Parameters are `2 x C` values laid out as `(mean, std)` pairs, one per
/// class.
#[derive(Debug, Clone)]
pub struct GaussianClassification {
    params: Vec<f64>,
}

impl GaussianClassification {
    /// Number of parameters per class.
    pub const PARAMS_PER_CLASS: usize = 2;

    /// Validates the parameter vector length against the class count.
    pub fn new(num_classes: u32, params: Vec<f64>) -> Result<Self, MrfError> {
        check_parameter_count(
            "gaussian-classification",
            num_classes,
            Self::PARAMS_PER_CLASS,
            params.len(),
        )?;
        for pair in params.chunks_exact(Self::PARAMS_PER_CLASS) {
            if pair[1] <= 0.0 {
                return Err(MrfError::Config(
                    ErrorInfo::new("non-positive-std", "class standard deviation must be positive")
                        .with_context("std", pair[1].to_string()),
                ));
            }
        }
        Ok(Self { params })
    }

    fn class_params(&self, label: f64) -> Result<(f64, f64), MrfError> {
        let class = label as usize;
        if class >= self.params.len() / Self::PARAMS_PER_CLASS {
            return Err(label_out_of_range(
                "gaussian-classification",
                class,
                self.params.len() / Self::PARAMS_PER_CLASS,
            ));
        }
        let base = class * Self::PARAMS_PER_CLASS;
        Ok((self.params[base], self.params[base + 1]))
    }
}

impl EnergyModel for GaussianClassification {
    fn pair_value(&self, a: f64, b: f64) -> Result<f64, MrfError> {
        let (mean, std) = self.class_params(b)?;
        let diff = a - mean;
        Ok(diff * diff / (2.0 * std * std) + ((2.0 * PI).sqrt() * std).ln())
    }
}

/// Fisher negative log-likelihood fidelity for SAR-style amplitude data.
///
/// Parameters are `3 x C` values laid out as `(mu, l, m)` triples, one per
/// class. The density is evaluated in log space to keep the gamma factors
/// finite for large shape parameters.
#[derive(Debug, Clone)]
pub struct FisherClassification {
    params: Vec<f64>,
}

impl FisherClassification {
    /// Number of parameters per class.
    pub const PARAMS_PER_CLASS: usize = 3;

    /// Validates the parameter vector length against the class count.
    pub fn new(num_classes: u32, params: Vec<f64>) -> Result<Self, MrfError> {
        check_parameter_count(
            "fisher-classification",
            num_classes,
            Self::PARAMS_PER_CLASS,
            params.len(),
        )?;
        Ok(Self { params })
    }

    fn class_params(&self, label: f64) -> Result<(f64, f64, f64), MrfError> {
        let class = label as usize;
        if class >= self.params.len() / Self::PARAMS_PER_CLASS {
            return Err(label_out_of_range(
                "fisher-classification",
                class,
                self.params.len() / Self::PARAMS_PER_CLASS,
            ));
        }
        let base = class * Self::PARAMS_PER_CLASS;
        Ok((
            self.params[base],
            self.params[base + 1],
            self.params[base + 2],
        ))
    }
}

impl EnergyModel for FisherClassification {
    fn pair_value(&self, a: f64, b: f64) -> Result<f64, MrfError> {
        let (mu, l, m) = self.class_params(b)?;
        let ratio = (l / m).sqrt();
        let scaled = ratio * a / mu;
        let log_density = ln_gamma(l + m) - ln_gamma(l) - ln_gamma(m)
            + (2.0 / mu).ln()
            + ratio.ln()
            + (2.0 * l - 1.0) * scaled.ln()
            - (l + m) * (1.0 + scaled * scaled).ln();
        Ok(-log_density)
    }
}

fn check_parameter_count(
    model: &str,
    num_classes: u32,
    per_class: usize,
    actual: usize,
) -> Result<(), MrfError> {
    let expected = num_classes as usize * per_class;
    if actual != expected {
        return Err(MrfError::Config(
            ErrorInfo::new(
                "parameter-count",
                "parameter vector length does not match the class count",
            )
            .with_context("model", model)
            .with_context("expected", expected.to_string())
            .with_context("actual", actual.to_string()),
        ));
    }
    Ok(())
}

fn label_out_of_range(model: &str, class: usize, num_classes: usize) -> MrfError {
    MrfError::Energy(
        ErrorInfo::new(
            "label-out-of-range",
            "label index exceeds the configured class parameters",
        )
        .with_context("model", model)
        .with_context("label", class.to_string())
        .with_context("classes", num_classes.to_string()),
    )
}

// Lanczos approximation with g = 7 and nine coefficients.
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural logarithm of the gamma function, valid for positive arguments.
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection keeps the approximation accurate near zero.
        PI.ln() - (PI * x).sin().abs().ln() - ln_gamma(1.0 - x)
    } else {
        let x = x - 1.0;
        let mut acc = LANCZOS[0];
        for (i, &coefficient) in LANCZOS.iter().enumerate().skip(1) {
            acc += coefficient / (x + i as f64);
        }
        let t = x + 7.5;
        0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
    }
}
