//! Region Quadtree over integer points.
//!
//! Every node owns a bounded list of points. A full node below the depth cap is split into
//! four quadrants and further points are routed by comparing them against the node's
//! midpoint. Nodes at the depth cap never split and keep accepting points.
//!
//! # Contracts:
//! - Regions are half open: `[x, x + width) × [y, y + height)`
//! - Points below the root are routed, never bounds checked, so a point outside the root
//!   region is still stored somewhere
//!
//! ```rust
//! use region_quadtree::{Point, Quadtree};
//!
//! let mut tree = Quadtree::create(0, 0, 100, 100).unwrap();
//! tree.insert(Point::new(50, 50)).unwrap();
//! tree.insert(Point::new(10, 20)).unwrap();
//!
//! assert_eq!(tree.nearest(&Point::new(0, 0)), Some(Point::new(10, 20)));
//! assert!(tree.delete(10, 20));
//! assert_eq!(tree.nearest(&Point::new(0, 0)), Some(Point::new(50, 50)));
//! ```
pub mod config;
pub mod error;
pub mod quadtree;

pub use config::QuadtreeConfig;
pub use error::QuadtreeError;
pub use quadtree::{Iter, QuadNode, Quadrant, Quadtree, Region};

use std::fmt;
use std::ops::{Add, AddAssign, Deref};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Point(pub [i32; 2]);

impl AddAssign for Point {
    fn add_assign(&mut self, p: Self) {
        self.0[0] += p.0[0];
        self.0[1] += p.0[1];
    }
}

impl Deref for Point {
    type Target = [i32; 2];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Add for Point {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0[0], self.0[1])
    }
}

impl Point {
    /// Reserved "no point" value for callers that cannot use `Option`.
    /// See [`Quadtree::nearest_or_sentinel`].
    pub const SENTINEL: Point = Point([-1, -1]);

    pub fn new(x: i32, y: i32) -> Self {
        Self([x, y])
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.0[1]
    }

    /// Euclidean distance. Deltas of two `i32` points need 33 bits and their squared sum
    /// 66, so the sum is taken in `i128` before the float conversion.
    pub fn dist(&self, rhs: &Self) -> f64 {
        let x = i128::from(self[0]) - i128::from(rhs[0]);
        let y = i128::from(self[1]) - i128::from(rhs[1]);
        ((x * x + y * y) as f64).sqrt()
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.0 == [x, y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_is_euclidean() {
        let d = Point::new(0, 0).dist(&Point::new(10, 20));
        assert!((d - 22.360_679_775).abs() < 1e-9);
        assert_eq!(Point::new(3, 4).dist(&Point::new(0, 0)), 5.0);
    }

    #[test]
    fn dist_does_not_overflow_at_extremes() {
        let d = Point::new(i32::MIN, i32::MIN).dist(&Point::new(i32::MAX, i32::MAX));
        assert!(d.is_finite());
        assert!(d > 6.0e9);
        assert_eq!(d, Point::new(i32::MAX, i32::MAX).dist(&Point::new(i32::MIN, i32::MIN)));

        let axis = Point::new(i32::MIN, 0).dist(&Point::new(i32::MAX, 0));
        assert!((axis - 4_294_967_295.0).abs() < 1e-3, "{}", axis);
    }

    #[test]
    fn add_offsets_both_axes() {
        let p = Point::new(10, 20) + Point::new(5, -5);
        assert_eq!(p, Point::new(15, 15));
        assert_eq!(p.x(), 15);
        assert_eq!(p.y(), 15);
    }

    #[test]
    fn display_formats_as_pair() {
        assert_eq!(Point::new(60, 70).to_string(), "(60, 70)");
        assert_eq!(Point::SENTINEL.to_string(), "(-1, -1)");
    }
}
