use crate::error::QuadtreeError;
use crate::Point;
use std::convert::TryFrom;
use std::fmt;

/// One of the four children of a split node, in traversal order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Quadrant {
    Nw = 0,
    Ne = 1,
    Sw = 2,
    Se = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Nw, Quadrant::Ne, Quadrant::Sw, Quadrant::Se];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Axis aligned rectangle `[x, x + width) × [y, y + height)`.
///
/// `y` grows "south": the north quadrants hold the smaller `y` values.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Region {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) × [{}, {})",
            self.x,
            i64::from(self.x) + i64::from(self.width),
            self.y,
            i64::from(self.y) + i64::from(self.height)
        )
    }
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, QuadtreeError> {
        if width <= 0 || height <= 0 {
            return Err(QuadtreeError::InvalidDimensions { width, height });
        }
        if x.checked_add(width).is_none() || y.checked_add(height).is_none() {
            return Err(QuadtreeError::RegionOverflow {
                x: x.into(),
                y: y.into(),
                width: width.into(),
                height: height.into(),
            });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Smallest region holding every point. `None` for an empty slice.
    ///
    /// The far edge is one past the largest coordinate, so a point at `i32::MAX` on either
    /// axis gives `RegionOverflow` here even though any tree will accept it on insert.
    pub fn bounding(points: &[Point]) -> Option<Result<Self, QuadtreeError>> {
        let first = points.first()?;
        let mut min = **first;
        let mut max = **first;
        for p in points.iter().skip(1) {
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
        }
        // half open, so the far edge sits one past the largest coordinate
        let width = i64::from(max[0]) - i64::from(min[0]) + 1;
        let height = i64::from(max[1]) - i64::from(min[1]) + 1;
        let overflow = || QuadtreeError::RegionOverflow {
            x: min[0].into(),
            y: min[1].into(),
            width,
            height,
        };
        let res = match (i32::try_from(width), i32::try_from(height)) {
            (Ok(w), Ok(h)) => Self::new(min[0], min[1], w, h),
            _ => Err(overflow()),
        };
        Some(res)
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x <= x && x < self.x + self.width && self.y <= y && y < self.y + self.height
    }

    #[inline]
    pub fn mid_x(&self) -> i32 {
        self.x + self.width / 2
    }

    #[inline]
    pub fn mid_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// The midpoint rule. Coordinates outside the region still map to a quadrant.
    pub fn quadrant_of(&self, x: i32, y: i32) -> Quadrant {
        match (x < self.mid_x(), y < self.mid_y()) {
            (true, true) => Quadrant::Nw,
            (false, true) => Quadrant::Ne,
            (true, false) => Quadrant::Sw,
            (false, false) => Quadrant::Se,
        }
    }

    /// Child regions in `Quadrant::ALL` order. Extents are floored, so an odd parent leaves
    /// its last row/column uncovered and a unit parent yields empty children.
    pub fn split(&self) -> [Region; 4] {
        let half_w = self.width / 2;
        let half_h = self.height / 2;
        let child = |offset: Point| {
            let origin = self.origin() + offset;
            Region {
                x: origin.x(),
                y: origin.y(),
                width: half_w,
                height: half_h,
            }
        };
        [
            child(Point::new(0, 0)),
            child(Point::new(half_w, 0)),
            child(Point::new(0, half_h)),
            child(Point::new(half_w, half_h)),
        ]
    }
}
