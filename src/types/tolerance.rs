//! Match tolerance for colour swaps.

use crate::error::{SwapError, Result};

/// Largest accepted threshold.
pub const MAX_THRESHOLD: i32 = 100;

/// Default threshold, matching the interactive tool's slider start.
pub const DEFAULT_THRESHOLD: i32 = 30;

/// How close a pixel has to be to the reference colour to be swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToleranceConfig {
    /// Maximum Euclidean RGB distance. Negative values never match.
    pub threshold: i32,
    /// Leave near-black and near-white pixels alone.
    pub preserve_bw: bool,
}

impl ToleranceConfig {
    /// Validated constructor for user-facing input.
    pub fn new(threshold: i32, preserve_bw: bool) -> Result<Self> {
        if !(0..=MAX_THRESHOLD).contains(&threshold) {
            return Err(SwapError::Parse {
                message: format!("Threshold {} is out of range", threshold),
                help: Some(format!("Use a value from 0 to {}", MAX_THRESHOLD)),
            });
        }
        Ok(Self {
            threshold,
            preserve_bw,
        })
    }

    /// Exact matches only.
    pub fn exact() -> Self {
        Self {
            threshold: 0,
            preserve_bw: false,
        }
    }

    /// Whether a squared distance lies within the threshold (inclusive).
    pub fn accepts(&self, distance_sq: u32) -> bool {
        if self.threshold < 0 {
            return false;
        }
        let t = self.threshold as u64;
        distance_sq as u64 <= t * t
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            preserve_bw: true,
        }
    }
}
