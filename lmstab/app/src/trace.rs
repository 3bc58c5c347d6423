//! Recorded tracking sessions and stabilized output, as JSON.

use anyhow::{Context, Result};
use api::Viewport;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    /// Canvas size used by frames that do not carry their own.
    #[serde(default)]
    pub viewport: Option<Viewport>,
    pub frames: Vec<TraceFrame>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Capture time in seconds.
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub faces: Vec<TraceFace>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFace {
    #[serde(default = "default_detected")]
    pub detected: bool,
    /// `[x, y]` rows in normalized viewport coordinates.
    #[serde(default)]
    pub landmarks: Vec<Vec<f32>>,
}

fn default_detected() -> bool {
    true
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open trace {:?}", path))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse trace {:?}", path))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilizedFrame {
    pub index: usize,
    pub timestamp: f64,
    /// One entry per face slot; `None` when the slot had no detection.
    pub faces: Vec<Option<Vec<[f32; 2]>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JitterSummary {
    /// Landmark steps measured between consecutive detected frames.
    pub samples: usize,
    /// Mean frame-to-frame landmark displacement of the raw input.
    pub raw_mean_step: f32,
    /// Same measure on the stabilized output.
    pub stabilized_mean_step: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub stabilizer: String,
    pub frames: Vec<StabilizedFrame>,
    pub summary: JitterSummary,
}
