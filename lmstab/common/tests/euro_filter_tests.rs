use approx::assert_abs_diff_eq;
use common::{AdaptiveCutoffConfig, AdaptiveCutoffFilter, ExponentialLowPass};

const DT: f64 = 1.0 / 30.0;

fn flat_config() -> AdaptiveCutoffConfig {
    AdaptiveCutoffConfig {
        freq: 30.0,
        min_cutoff: 1.0,
        beta: 0.0,
        d_cutoff: 1.0,
        ..Default::default()
    }
}

#[test]
fn low_pass_first_value_passes_through() {
    let mut lp = ExponentialLowPass::new(0.1);
    assert!(!lp.has_last_raw_value());
    assert_eq!(lp.filter(42.0), 42.0);
    assert_eq!(lp.last_raw_value(), Some(42.0));

    let second = lp.filter(52.0);
    assert_abs_diff_eq!(second, 43.0, epsilon = 1e-5);
    assert_eq!(lp.last_raw_value(), Some(52.0));
}

#[test]
fn low_pass_reset_reseeds() {
    let mut lp = ExponentialLowPass::new(0.5);
    lp.filter(0.0);
    lp.filter(10.0);
    lp.reset();
    assert!(lp.last_raw_value().is_none());
    assert_eq!(lp.filter_with_alpha(-3.0, 0.2), -3.0);
    assert_eq!(lp.alpha(), 0.2);
}

#[test]
fn test_euro_filter_initialization() {
    let mut filter = AdaptiveCutoffFilter::default();
    let first_val = 100.0;
    let filtered = filter.filter(first_val, 0.0);
    assert_eq!(
        filtered, first_val,
        "First value should be passed through exactly"
    );
}

#[test]
fn test_euro_filter_reset_passes_through_again() {
    let mut filter = AdaptiveCutoffFilter::new(flat_config());
    for i in 0..10 {
        filter.filter(i as f32, i as f64 * DT);
    }
    filter.reset();
    assert_eq!(filter.filter(-7.5, 100.0), -7.5);
    assert_eq!(filter.frequency(), 30.0);
}

#[test]
fn test_euro_filter_alternating_reference() {
    // alpha = 1 / (1 + 30 / (2 * pi)) with beta = 0
    let expected = [
        0.0, 0.173171, 0.143183, 0.291558, 0.241069, 0.372494, 0.307989, 0.427825, 0.353738,
        0.465652,
    ];
    let mut filter = AdaptiveCutoffFilter::new(flat_config());

    for (i, want) in expected.iter().enumerate() {
        let v = (i % 2) as f32;
        let got = filter.filter(v, i as f64 * DT);
        assert_abs_diff_eq!(got, *want, epsilon = 1e-4);
    }
}

#[test]
fn test_euro_filter_converges_to_constant() {
    let config = AdaptiveCutoffConfig {
        min_cutoff: 1.0,
        beta: 0.5,
        ..Default::default()
    };
    let mut filter = AdaptiveCutoffFilter::new(config);
    filter.filter(0.0, 0.0);

    let mut out = 0.0;
    for i in 1..300 {
        out = filter.filter(5.0, i as f64 * DT);
    }
    assert_abs_diff_eq!(out, 5.0, epsilon = 1e-3);
}

#[test]
fn test_euro_filter_frequency_clamped() {
    let config = AdaptiveCutoffConfig {
        freq_range: [10.0, 60.0],
        ..Default::default()
    };
    let mut filter = AdaptiveCutoffFilter::new(config);

    filter.filter(0.0, 1.0);
    // Repeated timestamp: dt floors at 1 / freq_max.
    let same = filter.filter(1.0, 1.0);
    assert!(same.is_finite());
    assert_eq!(filter.frequency(), 60.0);

    // Going backwards in time behaves the same.
    let back = filter.filter(2.0, 0.5);
    assert!(back.is_finite());
    assert_eq!(filter.frequency(), 60.0);

    // A long pause clamps at freq_min.
    let paused = filter.filter(3.0, 100.0);
    assert!(paused.is_finite());
    assert_eq!(filter.frequency(), 10.0);
}

#[test]
fn test_euro_filter_default_freq_clamped_into_range() {
    let config = AdaptiveCutoffConfig {
        freq: 500.0,
        freq_range: [1.0, 120.0],
        ..Default::default()
    };
    let filter = AdaptiveCutoffFilter::new(config);
    assert_eq!(filter.frequency(), 120.0);
}

#[test]
fn test_euro_filter_nan_handling() {
    let mut filter = AdaptiveCutoffFilter::default();
    assert_eq!(filter.filter(f32::NAN, 0.0), 0.0);

    filter.filter(4.0, 0.1);
    assert_eq!(filter.filter(f32::INFINITY, 0.2), 4.0);
    // The dropped sample did not disturb history.
    assert!(filter.filter(4.0, 0.3).is_finite());
}

fn ramp_lag(beta: f32) -> f32 {
    let config = AdaptiveCutoffConfig {
        min_cutoff: 1.0,
        beta,
        ..Default::default()
    };
    let mut filter = AdaptiveCutoffFilter::new(config);
    let mut lag = 0.0;
    for i in 0..60 {
        let t = i as f64 * DT;
        let v = 10.0 * t as f32;
        lag = v - filter.filter(v, t);
    }
    lag
}

#[test]
fn test_euro_filter_beta_reduces_lag() {
    let lags: Vec<f32> = [0.0, 0.1, 1.0, 10.0].iter().map(|b| ramp_lag(*b)).collect();
    assert!(lags[0] > 0.0);
    for pair in lags.windows(2) {
        assert!(pair[1] < pair[0], "lag should shrink as beta grows: {:?}", lags);
    }
}
