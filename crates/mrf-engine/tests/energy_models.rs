use std::f64::consts::PI;

use mrf_core::{Grid, MrfError, NeighborhoodView};
use mrf_engine::energy::{
    ln_gamma, EdgeFidelity, EnergyModel, FisherClassification, Gaussian, GaussianClassification,
    Potts,
};

#[test]
fn potts_is_signed_beta() {
    let potts = Potts::new(1.5);
    assert_eq!(potts.pair_value(2.0, 2.0).unwrap(), -1.5);
    assert_eq!(potts.pair_value(1.0, 2.0).unwrap(), 1.5);
    assert_eq!(potts.pair_value(0.0, 3.0).unwrap(), 1.5);

    let negative = Potts::new(-0.25);
    assert_eq!(negative.pair_value(1.0, 1.0).unwrap(), 0.25);
}

#[test]
fn gaussian_is_symmetric_and_zero_on_agreement() {
    let gaussian = Gaussian;
    assert_eq!(gaussian.pair_value(3.0, 7.0).unwrap(), 16.0);
    assert_eq!(gaussian.pair_value(7.0, 3.0).unwrap(), 16.0);
    assert_eq!(gaussian.pair_value(5.0, 5.0).unwrap(), 0.0);
}

#[test]
fn edge_fidelity_stays_below_one() {
    let edge = EdgeFidelity;
    assert_eq!(edge.pair_value(4.0, 4.0).unwrap(), 0.0);
    assert_eq!(edge.pair_value(0.0, 1.0).unwrap(), 0.5);
    let large = edge.pair_value(0.0, 1e6).unwrap();
    assert!(large < 1.0 && large > 0.999);
}

#[test]
fn gaussian_classification_matches_the_closed_form() {
    let model = GaussianClassification::new(2, vec![10.0, 2.0, 20.0, 4.0]).unwrap();
    let expected = 4.0 / 8.0 + ((2.0 * PI).sqrt() * 2.0).ln();
    let actual = model.pair_value(12.0, 0.0).unwrap();
    assert!((actual - expected).abs() < 1e-12);

    let expected = 25.0 / 32.0 + ((2.0 * PI).sqrt() * 4.0).ln();
    let actual = model.pair_value(15.0, 1.0).unwrap();
    assert!((actual - expected).abs() < 1e-12);
}

#[test]
fn gaussian_classification_validates_parameter_count() {
    let err = GaussianClassification::new(3, vec![0.0; 5]).unwrap_err();
    match err {
        MrfError::Config(info) => assert_eq!(info.code, "parameter-count"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn gaussian_classification_rejects_labels_beyond_the_alphabet() {
    let model = GaussianClassification::new(2, vec![10.0, 2.0, 20.0, 4.0]).unwrap();
    let err = model.pair_value(12.0, 2.0).unwrap_err();
    match err {
        MrfError::Energy(info) => assert_eq!(info.code, "label-out-of-range"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn gaussian_classification_rejects_non_positive_std() {
    assert!(GaussianClassification::new(1, vec![10.0, 0.0]).is_err());
    assert!(GaussianClassification::new(1, vec![10.0, -1.0]).is_err());
}

#[test]
fn ln_gamma_matches_known_values() {
    assert!((ln_gamma(1.0)).abs() < 1e-12);
    assert!((ln_gamma(2.0)).abs() < 1e-12);
    assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
    assert!((ln_gamma(0.5) - 0.5 * PI.ln()).abs() < 1e-10);
    assert!((ln_gamma(10.0) - 362_880.0_f64.ln()).abs() < 1e-9);
}

#[test]
fn fisher_classification_matches_the_closed_form() {
    let model = FisherClassification::new(1, vec![2.0, 3.0, 4.0]).unwrap();
    let (mu, l, m) = (2.0_f64, 3.0_f64, 4.0_f64);
    let a = 1.5_f64;

    // Gamma(7) / (Gamma(3) * Gamma(4)) = 720 / 12.
    let ratio = (l / m).sqrt();
    let scaled = ratio * a / mu;
    let density = 60.0 * (2.0 / mu) * ratio * scaled.powf(2.0 * l - 1.0)
        / (1.0 + scaled * scaled).powf(l + m);
    let expected = -density.ln();

    let actual = model.pair_value(a, 0.0).unwrap();
    assert!((actual - expected).abs() < 1e-9);
}

#[test]
fn fisher_classification_validates_parameters_and_labels() {
    let err = FisherClassification::new(2, vec![0.0; 4]).unwrap_err();
    match err {
        MrfError::Config(info) => assert_eq!(info.code, "parameter-count"),
        other => panic!("unexpected error: {other:?}"),
    }

    let model = FisherClassification::new(1, vec![2.0, 3.0, 4.0]).unwrap();
    let err = model.pair_value(1.0, 1.0).unwrap_err();
    match err {
        MrfError::Energy(info) => assert_eq!(info.code, "label-out-of-range"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn neighborhood_value_averages_valid_offsets_only() {
    // Corner site of a 2x2 label grid: three valid neighbors, center excluded.
    let labels = Grid::from_vec(2, 2, vec![0u32, 1, 1, 1]).unwrap();
    let mut view = NeighborhoodView::with_radius(1);
    view.fill_from(&labels, 0, 0);

    let potts = Potts::new(1.0);
    // All three neighbors carry label 1.
    assert_eq!(potts.neighborhood_value(1.0, &view).unwrap(), -1.0);
    assert_eq!(potts.neighborhood_value(0.0, &view).unwrap(), 1.0);

    // Interior site of a 3x3 grid with a mixed neighborhood.
    let labels = Grid::from_vec(3, 3, vec![0u32, 0, 0, 0, 1, 1, 1, 1, 1]).unwrap();
    view.fill_from(&labels, 1, 1);
    // Four neighbors agree with label 1, four disagree.
    assert_eq!(potts.neighborhood_value(1.0, &view).unwrap(), 0.0);

    let gaussian = Gaussian;
    let input = Grid::from_vec(2, 2, vec![1.0_f64, 3.0, 5.0, 7.0]).unwrap();
    view.fill_from(&input, 0, 0);
    // Neighbors 3, 5, 7 against candidate 1: mean of 4, 16, 36.
    let expected = (4.0 + 16.0 + 36.0) / 3.0;
    assert!((gaussian.neighborhood_value(1.0, &view).unwrap() - expected).abs() < 1e-12);
}
