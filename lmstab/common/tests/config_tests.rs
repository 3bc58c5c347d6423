use common::{StabilizationConfig, StabilizerError, StabilizerKind};
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lmstab-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn defaults_match_tracking_presets() {
    let config = StabilizationConfig::default();
    assert!(config.enabled);
    assert_eq!(config.kind, StabilizerKind::AdaptiveCutoff);
    assert_eq!(config.adaptive.freq, 30.0);
    assert_eq!(config.adaptive.min_cutoff, 0.001);
    assert_eq!(config.adaptive.beta, 50.0);
    assert_eq!(config.adaptive.d_cutoff, 1.0);
    assert_eq!(config.distance_gated.n, 7);
    assert_eq!(config.distance_gated.jitter_threshold, 8.0);
    assert_eq!(config.distance_gated.move_threshold, 15.0);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_json_fills_defaults_and_accepts_aliases() {
    let json = r#"{
        "kind": "distance",
        "adaptive": { "mincutoff": 0.5 },
        "distance_gated": { "jitterThreshold": 4.0 }
    }"#;
    let config: StabilizationConfig = serde_json::from_str(json).unwrap();
    assert!(config.enabled);
    assert_eq!(config.kind, StabilizerKind::DistanceGated);
    assert_eq!(config.adaptive.min_cutoff, 0.5);
    assert_eq!(config.adaptive.beta, 50.0);
    assert_eq!(config.distance_gated.jitter_threshold, 4.0);
    assert_eq!(config.distance_gated.move_threshold, 15.0);
}

#[test]
fn validation_checks_selected_strategy_only() {
    let mut config = StabilizationConfig::default();
    config.distance_gated.move_threshold = 1.0;
    assert!(config.validate().is_ok());

    config.kind = StabilizerKind::DistanceGated;
    assert!(matches!(
        config.validate(),
        Err(StabilizerError::InvalidConfig(_))
    ));
}

#[test]
fn non_positive_cutoff_is_rejected() {
    let mut config = StabilizationConfig::default();
    config.adaptive.min_cutoff = 0.0;
    assert!(config.validate().is_err());

    config.adaptive.min_cutoff = 1.0;
    config.adaptive.beta = f32::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn load_or_create_writes_defaults_then_reads_them_back() {
    let path = temp_path("created.json");
    let _ = fs::remove_file(&path);

    let created = StabilizationConfig::load_or_create(&path).unwrap();
    assert!(path.exists());
    let loaded = StabilizationConfig::load_or_create(&path).unwrap();
    assert_eq!(created, loaded);

    fs::remove_file(&path).unwrap();
}

#[test]
fn load_rejects_invalid_file() {
    let path = temp_path("invalid.json");
    fs::write(&path, r#"{ "adaptive": { "freq_range": [100.0, 10.0] } }"#).unwrap();

    let err = StabilizationConfig::load_or_create(&path).unwrap_err();
    assert!(err.to_string().contains("freq_range"));

    fs::remove_file(&path).unwrap();
}
