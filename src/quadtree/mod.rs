mod region;

pub use region::{Quadrant, Region};

use crate::config::QuadtreeConfig;
use crate::error::QuadtreeError;
use crate::Point;
use arrayvec::ArrayVec;
use std::slice;
use tracing::{debug, trace};

type Children = Option<Box<[QuadNode; 4]>>;

/// A node of the tree: a leaf storing points, or a router with exactly four children that
/// may store points of its own as well.
///
/// Depth is not stored, it is threaded through the recursive calls with the root at 0.
#[derive(Debug, Clone)]
pub struct QuadNode {
    region: Region,
    children: Children,
    // insertion order, compacted on delete
    points: Vec<Point>,
}

impl QuadNode {
    fn new(region: Region) -> Self {
        Self {
            region,
            children: None,
            points: Vec::new(),
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Points stored at this node, not including its subtree.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn children(&self) -> Option<&[QuadNode; 4]> {
        self.children.as_deref()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadNode> {
        self.children().map(|c| &c[quadrant.index()])
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Number of points in this subtree.
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children()
                .map_or(0, |c| c.iter().map(QuadNode::len).sum::<usize>())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |c| c.iter().map(QuadNode::node_count).sum::<usize>())
    }

    /// Levels below this node; 0 for a leaf.
    pub fn depth(&self) -> u32 {
        self.children().map_or(0, |c| {
            1 + c.iter().map(QuadNode::depth).max().unwrap_or(0)
        })
    }

    /// Split into four children if this is a leaf. Returns whether children were created.
    pub(crate) fn ensure_subdivided(&mut self, level: u32) -> bool {
        if self.children.is_some() {
            return false;
        }
        trace!(level, region = %self.region, "Subdividing node");
        let [nw, ne, sw, se] = self.region.split();
        self.children = Some(Box::new([
            Self::new(nw),
            Self::new(ne),
            Self::new(sw),
            Self::new(se),
        ]));
        true
    }

    fn insert(&mut self, point: Point, level: u32, config: &QuadtreeConfig) {
        if level >= config.max_levels {
            if self.points.len() >= config.max_points {
                trace!(level, len = self.points.len() + 1, %point, "Overflow leaf grew");
            }
            self.points.push(point);
            return;
        }
        if self.points.len() < config.max_points {
            self.points.push(point);
            return;
        }

        self.ensure_subdivided(level);

        let quadrant = self.region.quadrant_of(point.x(), point.y());
        if let Some(children) = self.children.as_deref_mut() {
            children[quadrant.index()].insert(point, level + 1, config);
        }
    }

    /// First node on the midpoint descent whose region contains `(x, y)`.
    ///
    /// Containment is only checked at the node being visited, the chosen child is not
    /// checked before descending. Returns `None` once the descent runs past a leaf.
    pub fn locate(&self, x: i32, y: i32) -> Option<&QuadNode> {
        if self.region.contains(x, y) {
            return Some(self);
        }
        let children = self.children.as_deref()?;
        children[self.region.quadrant_of(x, y).index()].locate(x, y)
    }

    /// Whether a point at `(x, y)` is stored on the path insertion would route it along.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        if self.points.iter().any(|p| p.is_at(x, y)) {
            return true;
        }
        match self.children.as_deref() {
            Some(children) => children[self.region.quadrant_of(x, y).index()].contains(x, y),
            None => false,
        }
    }

    fn delete(&mut self, x: i32, y: i32) -> bool {
        if let Some(i) = self.points.iter().position(|p| p.is_at(x, y)) {
            // shifts the tail left, keeping its order
            self.points.remove(i);
            return true;
        }
        let quadrant = self.region.quadrant_of(x, y);
        match self.children.as_deref_mut() {
            Some(children) => children[quadrant.index()].delete(x, y),
            None => false,
        }
    }

    /// Closest point in this subtree. Every child is searched, there is no pruning.
    ///
    /// Candidates are compared nw, ne, sw, se and then the local points; the first strictly
    /// smaller distance wins, so ties keep the earlier candidate.
    pub fn nearest(&self, query: &Point) -> Option<Point> {
        let mut candidates = ArrayVec::<[Point; 4]>::new();
        if let Some(children) = self.children.as_deref() {
            candidates.extend(children.iter().filter_map(|c| c.nearest(query)));
        }
        closest(query, candidates.iter().chain(self.points.iter()))
    }

    /// Pre-order: the local points, then nw, ne, sw, se.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&Point),
    {
        for p in self.iter() {
            visit(p);
        }
    }
}

fn closest<'a, It>(query: &Point, it: It) -> Option<Point>
where
    It: Iterator<Item = &'a Point>,
{
    let mut best: Option<(f64, Point)> = None;
    for p in it {
        let d = query.dist(p);
        match best {
            Some((min, _)) if d >= min => {}
            _ => best = Some((d, *p)),
        }
    }
    best.map(|(_, p)| p)
}

/// Depth first, pre-order iterator over the points of a subtree.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a QuadNode>,
    current: slice::Iter<'a, Point>,
}

impl<'a> Iter<'a> {
    fn new(root: &'a QuadNode) -> Self {
        Self {
            stack: vec![root],
            current: <&[Point]>::default().iter(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Point;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(p) = self.current.next() {
                return Some(p);
            }
            let node = self.stack.pop()?;
            if let Some(children) = node.children.as_deref() {
                // reversed so nw is popped first
                self.stack.extend(children.iter().rev());
            }
            self.current = node.points.iter();
        }
    }
}

/// Owner of a tree of [`QuadNode`]s and the limits that shape it.
#[derive(Debug, Clone)]
pub struct Quadtree {
    config: QuadtreeConfig,
    root: QuadNode,
}

impl Quadtree {
    pub fn new(region: Region, config: QuadtreeConfig) -> Result<Self, QuadtreeError> {
        config.validate()?;
        Ok(Self {
            config,
            root: QuadNode::new(region),
        })
    }

    /// Empty tree over `[x, x + width) × [y, y + height)` with the default limits.
    pub fn create(x: i32, y: i32, width: i32, height: i32) -> Result<Self, QuadtreeError> {
        Self::new(Region::new(x, y, width, height)?, QuadtreeConfig::default())
    }

    /// Build a tree over the smallest region that holds every point.
    pub fn from_points<It>(config: QuadtreeConfig, it: It) -> Result<Self, QuadtreeError>
    where
        It: IntoIterator<Item = Point>,
    {
        let points = it.into_iter().collect::<Vec<_>>();
        let region = Region::bounding(&points).ok_or(QuadtreeError::NoPoints)??;
        let mut tree = Self::new(region, config)?;
        tree.extend(points);
        Ok(tree)
    }

    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    pub fn region(&self) -> &Region {
        &self.root.region
    }

    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn depth(&self) -> u32 {
        self.root.depth()
    }

    pub fn insert(&mut self, point: Point) -> Result<(), QuadtreeError> {
        self.insert_at(point, 0)
    }

    /// Insert treating the root as sitting at `level`.
    ///
    /// A point is never rejected, not even one outside the root region. The only failure is
    /// a `level` deeper than the depth cap.
    pub fn insert_at(&mut self, point: Point, level: u32) -> Result<(), QuadtreeError> {
        if level > self.config.max_levels {
            return Err(QuadtreeError::LevelOutOfRange {
                level,
                max_levels: self.config.max_levels,
            });
        }
        self.root.insert(point, level, &self.config);
        Ok(())
    }

    pub fn extend<It>(&mut self, it: It)
    where
        It: IntoIterator<Item = Point>,
    {
        for p in it {
            self.root.insert(p, 0, &self.config);
        }
    }

    /// Node owning `(x, y)`, see [`QuadNode::locate`].
    pub fn locate(&self, x: i32, y: i32) -> Option<&QuadNode> {
        self.root.locate(x, y)
    }

    /// Like `locate` but coordinates outside the root region are an error instead of a
    /// descent by the midpoint rule.
    pub fn try_locate(&self, x: i32, y: i32) -> Result<&QuadNode, QuadtreeError> {
        let out_of_bounds = || QuadtreeError::OutOfBounds {
            x,
            y,
            region: self.root.region,
        };
        if !self.root.region.contains(x, y) {
            return Err(out_of_bounds());
        }
        self.root.locate(x, y).ok_or_else(out_of_bounds)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.root.contains(x, y)
    }

    /// Remove the first stored point at `(x, y)`. Returns `false` if there was none.
    pub fn delete(&mut self, x: i32, y: i32) -> bool {
        let found = self.root.delete(x, y);
        if !found {
            debug!(x, y, "Delete found no point");
        }
        found
    }

    pub fn nearest(&self, query: &Point) -> Option<Point> {
        self.root.nearest(query)
    }

    /// [`nearest`](Self::nearest) with [`Point::SENTINEL`] for an empty tree.
    pub fn nearest_or_sentinel(&self, query: &Point) -> Point {
        self.nearest(query).unwrap_or(Point::SENTINEL)
    }

    pub fn iter(&self) -> Iter<'_> {
        self.root.iter()
    }

    pub fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&Point),
    {
        self.root.for_each(visit)
    }

    /// Drop every point and child, keeping the root region and limits.
    pub fn clear(&mut self) {
        debug!(nodes = self.node_count(), "Clearing quadtree");
        self.root = QuadNode::new(self.root.region);
    }

    /// Tear the tree down. Children are owned boxes, so they drop before their parent.
    pub fn release(self) {
        debug!(nodes = self.node_count(), "Releasing quadtree");
    }
}

impl<'a> IntoIterator for &'a Quadtree {
    type Item = &'a Point;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
