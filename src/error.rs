//! Error types.

use crate::quadtree::Region;
use thiserror::Error;

/// Precondition violations reported by tree construction, configuration and insertion.
///
/// Not finding something is never an error: `locate` and `nearest` return `None`, `delete`
/// returns `false`.
#[derive(Debug, Error)]
pub enum QuadtreeError {
    #[error("Region dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Region at ({x}, {y}) with size {width}x{height} leaves the i32 coordinate range")]
    RegionOverflow {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },

    #[error("Node capacity must be at least 1")]
    InvalidCapacity,

    #[error("Depth cap {0} exceeds the supported maximum of {}", crate::config::MAX_DEPTH_CAP)]
    DepthCapTooLarge(u32),

    #[error("Insertion level {level} is deeper than the depth cap {max_levels}")]
    LevelOutOfRange { level: u32, max_levels: u32 },

    #[error("({x}, {y}) lies outside the root region {region}")]
    OutOfBounds { x: i32, y: i32, region: Region },

    #[error("Cannot derive a region from zero points")]
    NoPoints,

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
