//! Tree configuration.

use crate::error::QuadtreeError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Deepest supported depth cap. `i32` extents halve to zero after 31 splits.
pub const MAX_DEPTH_CAP: u32 = 32;

/// Subdivision limits of a [`Quadtree`](crate::Quadtree).
///
/// ```toml
/// max_points = 10
/// max_levels = 5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuadtreeConfig {
    /// Points a node stores before it splits. Depth capped nodes ignore this.
    #[serde(default = "default_max_points")]
    pub max_points: usize,
    /// Depth at which nodes stop splitting. The root is level 0.
    #[serde(default = "default_max_levels")]
    pub max_levels: u32,
}

fn default_max_points() -> usize {
    10
}

fn default_max_levels() -> u32 {
    5
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            max_points: default_max_points(),
            max_levels: default_max_levels(),
        }
    }
}

impl QuadtreeConfig {
    pub fn new(max_points: usize, max_levels: u32) -> Result<Self, QuadtreeError> {
        let config = Self {
            max_points,
            max_levels,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), QuadtreeError> {
        if self.max_points == 0 {
            return Err(QuadtreeError::InvalidCapacity);
        }
        if self.max_levels > MAX_DEPTH_CAP {
            return Err(QuadtreeError::DepthCapTooLarge(self.max_levels));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, QuadtreeError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, QuadtreeError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            max_points = config.max_points,
            max_levels = config.max_levels,
            "Loaded quadtree config"
        );
        Ok(config)
    }
}
