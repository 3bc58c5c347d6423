use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::StabilizerError;

/// Which stabilization strategy to run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StabilizerKind {
    /// One-Euro filter bank, one filter per coordinate.
    #[default]
    #[serde(alias = "OneEuro", alias = "adaptive", alias = "one_euro")]
    AdaptiveCutoff,
    /// Per-landmark blend gated by pixel distance.
    #[serde(alias = "distance", alias = "distance_gated")]
    DistanceGated,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdaptiveCutoffConfig {
    /// Sampling frequency used until two timestamps have been observed.
    pub freq: f32,
    /// Clamp bounds for the estimated sampling frequency, `[min, max]`.
    pub freq_range: [f32; 2],
    /// Cutoff at zero velocity. Lower is smoother.
    #[serde(alias = "mincutoff")]
    pub min_cutoff: f32,
    /// Velocity to cutoff gain. Higher lags less on fast motion.
    pub beta: f32,
    /// Cutoff used to smooth the derivative.
    #[serde(alias = "dcutoff")]
    pub d_cutoff: f32,
}

impl Default for AdaptiveCutoffConfig {
    fn default() -> Self {
        Self {
            freq: 30.0,
            freq_range: [1.0, 240.0],
            min_cutoff: 0.001,
            beta: 50.0,
            d_cutoff: 1.0,
        }
    }
}

impl AdaptiveCutoffConfig {
    pub fn freq_min(&self) -> f32 {
        self.freq_range[0]
    }

    pub fn freq_max(&self) -> f32 {
        self.freq_range[1]
    }

    pub fn validate(&self) -> Result<(), StabilizerError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(StabilizerError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {v}"
                )))
            }
        };

        positive("freq", self.freq)?;
        positive("freq_range min", self.freq_min())?;
        positive("freq_range max", self.freq_max())?;
        positive("min_cutoff", self.min_cutoff)?;
        positive("d_cutoff", self.d_cutoff)?;

        if self.freq_min() > self.freq_max() {
            return Err(StabilizerError::InvalidConfig(format!(
                "freq_range min {} exceeds max {}",
                self.freq_min(),
                self.freq_max()
            )));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(StabilizerError::InvalidConfig(format!(
                "beta must be finite and non-negative, got {}",
                self.beta
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DistanceGatedConfig {
    /// Warm-up frames before stabilization engages.
    pub n: u32,
    /// Pixel distance at or below which motion is jitter.
    #[serde(alias = "jitterThreshold")]
    pub jitter_threshold: f32,
    /// Pixel distance at or above which motion is genuine.
    #[serde(alias = "moveThreshold")]
    pub move_threshold: f32,
}

impl Default for DistanceGatedConfig {
    fn default() -> Self {
        Self {
            n: 7,
            jitter_threshold: 8.0,
            move_threshold: 15.0,
        }
    }
}

impl DistanceGatedConfig {
    pub fn validate(&self) -> Result<(), StabilizerError> {
        if !self.jitter_threshold.is_finite() || self.jitter_threshold < 0.0 {
            return Err(StabilizerError::InvalidConfig(format!(
                "jitter_threshold must be finite and non-negative, got {}",
                self.jitter_threshold
            )));
        }
        if !self.move_threshold.is_finite() || self.move_threshold < self.jitter_threshold {
            return Err(StabilizerError::InvalidConfig(format!(
                "move_threshold {} must be finite and at least jitter_threshold {}",
                self.move_threshold, self.jitter_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StabilizationConfig {
    /// When false, landmarks pass through unmodified.
    #[serde(alias = "isStabilized")]
    pub enabled: bool,
    #[serde(alias = "strategy")]
    pub kind: StabilizerKind,
    pub adaptive: AdaptiveCutoffConfig,
    pub distance_gated: DistanceGatedConfig,
}

impl Default for StabilizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: StabilizerKind::default(),
            adaptive: AdaptiveCutoffConfig::default(),
            distance_gated: DistanceGatedConfig::default(),
        }
    }
}

impl StabilizationConfig {
    /// Validates the section used by the selected strategy.
    pub fn validate(&self) -> Result<(), StabilizerError> {
        match self.kind {
            StabilizerKind::AdaptiveCutoff => self.adaptive.validate(),
            StabilizerKind::DistanceGated => self.distance_gated.validate(),
        }
    }

    /// Loads a config file, writing the defaults there first if it is missing.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config not found. Creating default at {:?}", path);
            let config = Self::default();
            let file = File::create(path)
                .with_context(|| format!("Failed to create config file {:?}", path))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &config)
                .context("Failed to serialize default config")?;
            return Ok(config);
        }

        info!("Loading config from {:?}", path);
        let file =
            File::open(path).with_context(|| format!("Failed to open config file {:?}", path))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }
}
