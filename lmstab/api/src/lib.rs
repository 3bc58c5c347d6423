use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A tracked 2D keypoint in normalized viewport coordinates.
pub type Landmark = Vec2;

/// Number of coordinates carried by one landmark.
pub const LANDMARK_DIMS: usize = 2;

/// Errors returned by the stabilizers.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StabilizerError {
    #[error("landmark {index} has {found} coordinates, expected {expected}")]
    ShapeMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid stabilizer config: {0}")]
    InvalidConfig(String),
}

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Scale mapping normalized coordinates to pixels.
    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

/// Converts per-landmark rows, rejecting any row that is not exactly `[x, y]`.
pub fn landmarks_from_rows(rows: &[Vec<f32>]) -> Result<Vec<Landmark>, StabilizerError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| match row.as_slice() {
            [x, y] => Ok(Vec2::new(*x, *y)),
            _ => Err(StabilizerError::ShapeMismatch {
                index,
                expected: LANDMARK_DIMS,
                found: row.len(),
            }),
        })
        .collect()
}

/// Converts an interleaved `x0, y0, x1, y1, ...` buffer.
pub fn landmarks_from_flat(coords: &[f32]) -> Result<Vec<Landmark>, StabilizerError> {
    if coords.len() % LANDMARK_DIMS != 0 {
        return Err(StabilizerError::ShapeMismatch {
            index: coords.len() / LANDMARK_DIMS,
            expected: LANDMARK_DIMS,
            found: coords.len() % LANDMARK_DIMS,
        });
    }

    Ok(coords
        .chunks_exact(LANDMARK_DIMS)
        .map(|c| Vec2::new(c[0], c[1]))
        .collect())
}
