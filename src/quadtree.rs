//! Point-QuadTree over lon/lat [`Rectangle`]s.
//!
//! Children are materialized lazily, on first capacity overflow, as an
//! `Option<Box<Quadrants<P>>>` so the "0 or 4 children" invariant is
//! structural rather than four independently-nullable fields. On overflow,
//! only the *new* record descends into a freshly-divided child - records
//! already held by a node are never redistributed into its children.

use crate::record::Record;
use crate::shapes::{Ellipse, Rectangle};

/// The four children of a divided [`QuadTree`] node, in the fixed traversal
/// order NW, NE, SW, SE.
#[derive(Debug)]
struct Quadrants<P> {
    nw: QuadTree<P>,
    ne: QuadTree<P>,
    sw: QuadTree<P>,
    se: QuadTree<P>,
}

/// A region QuadTree over [`Record`]s, parameterized by an optional payload
/// type `P` (see [`Record`]).
#[derive(Debug)]
pub struct QuadTree<P = ()> {
    boundary: Rectangle,
    capacity: usize,
    depth: u32,
    max_depth: Option<u32>,
    points: Vec<Record<P>>,
    children: Option<Box<Quadrants<P>>>,
}

/// Default capacity of a QuadTree node before it divides.
pub const DEFAULT_CAPACITY: usize = 5;

impl<P> QuadTree<P> {
    /// Construct an empty QuadTree over `boundary`.
    pub fn new(boundary: Rectangle, capacity: usize, max_depth: Option<u32>) -> Self {
        Self::with_depth(boundary, capacity, 0, max_depth)
    }

    fn with_depth(boundary: Rectangle, capacity: usize, depth: u32, max_depth: Option<u32>) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            max_depth,
            points: Vec::new(),
            children: None,
        }
    }

    /// The boundary rectangle of this node.
    pub fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    /// `true` if this node has divided into children.
    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// Records held directly by this node (not by its children).
    pub fn points(&self) -> &[Record<P>] {
        &self.points
    }

    fn divide(&mut self) {
        let b = self.boundary;
        let lon = b.lon();
        let lat = b.lat();
        let depth = self.depth + 1;
        let new_node = |rect: Rectangle| QuadTree::with_depth(rect, self.capacity, depth, self.max_depth);

        log::trace!("QuadTree dividing at depth {depth}");

        self.children = Some(Box::new(Quadrants {
            nw: new_node(Rectangle::new(b.west(), lon, lat, b.north()).expect("sub-rectangle of a valid rectangle is valid")),
            ne: new_node(Rectangle::new(lon, b.east(), lat, b.north()).expect("sub-rectangle of a valid rectangle is valid")),
            sw: new_node(Rectangle::new(b.west(), lon, b.south(), lat).expect("sub-rectangle of a valid rectangle is valid")),
            se: new_node(Rectangle::new(lon, b.east(), b.south(), lat).expect("sub-rectangle of a valid rectangle is valid")),
        }));
    }

    /// Insert `record`, returning `false` if it falls outside this node's
    /// boundary. Divides lazily on the first capacity overflow; records
    /// already held by a node are never moved into its children.
    pub fn insert(&mut self, record: Record<P>) -> bool {
        if !self.boundary.contains(&record) {
            return false;
        }
        let at_max_depth = self.max_depth.is_some_and(|md| self.depth >= md);
        if at_max_depth || self.points.len() < self.capacity {
            self.points.push(record);
            return true;
        }

        if self.children.is_none() {
            self.divide();
        }
        let children = self.children.as_mut().expect("just divided");
        if children.nw.boundary.contains(&record) {
            return children.nw.insert(record);
        }
        if children.ne.boundary.contains(&record) {
            return children.ne.insert(record);
        }
        if children.sw.boundary.contains(&record) {
            return children.sw.insert(record);
        }
        if children.se.boundary.contains(&record) {
            return children.se.insert(record);
        }
        false
    }

    /// Remove the first record equal to `record`, searching this node then
    /// its children (NW, NE, SW, SE). Does not coalesce emptied subtrees.
    pub fn remove(&mut self, record: &Record<P>) -> bool {
        if !self.boundary.contains(record) {
            return false;
        }
        if let Some(pos) = self.points.iter().position(|p| p == record) {
            self.points.remove(pos);
            return true;
        }
        if let Some(children) = self.children.as_mut() {
            if children.nw.remove(record) {
                return true;
            }
            if children.ne.remove(record) {
                return true;
            }
            if children.sw.remove(record) {
                return true;
            }
            if children.se.remove(record) {
                return true;
            }
        }
        false
    }

    /// All stored records contained within `rect`.
    pub fn query(&self, rect: &Rectangle) -> Vec<&Record<P>> {
        let mut out = Vec::new();
        self.query_into(rect, &mut out);
        out
    }

    fn query_into<'a>(&'a self, rect: &Rectangle, out: &mut Vec<&'a Record<P>>) {
        if !self.boundary.intersects(rect) {
            return;
        }
        for p in &self.points {
            if rect.contains(p) {
                out.push(p);
            }
        }
        if let Some(children) = &self.children {
            children.nw.query_into(rect, out);
            children.ne.query_into(rect, out);
            children.sw.query_into(rect, out);
            children.se.query_into(rect, out);
        }
    }

    /// All stored records contained within `ellipse`.
    pub fn query_ellipse(&self, ellipse: &Ellipse) -> Vec<&Record<P>> {
        let mut out = Vec::new();
        self.query_ellipse_into(ellipse, &mut out);
        out
    }

    fn query_ellipse_into<'a>(&'a self, ellipse: &Ellipse, out: &mut Vec<&'a Record<P>>) {
        if !ellipse.nearby_rect(&self.boundary) {
            return;
        }
        for p in &self.points {
            if ellipse.contains(p) {
                out.push(p);
            }
        }
        if let Some(children) = &self.children {
            children.nw.query_ellipse_into(ellipse, out);
            children.ne.query_ellipse_into(ellipse, out);
            children.sw.query_ellipse_into(ellipse, out);
            children.se.query_ellipse_into(ellipse, out);
        }
    }

    /// All stored records within haversine distance `dist` of `point`.
    pub fn nearby_points(&self, point: &Record<P>, dist: f64) -> Vec<&Record<P>> {
        let mut out = Vec::new();
        self.nearby_points_into(point, dist, &mut out);
        out
    }

    fn nearby_points_into<'a>(&'a self, point: &Record<P>, dist: f64, out: &mut Vec<&'a Record<P>>) {
        if !self.boundary.nearby(point, dist) {
            return;
        }
        for p in &self.points {
            if point.distance(p) <= dist {
                out.push(p);
            }
        }
        if let Some(children) = &self.children {
            children.nw.nearby_points_into(point, dist, out);
            children.ne.nearby_points_into(point, dist, out);
            children.sw.nearby_points_into(point, dist, out);
            children.se.nearby_points_into(point, dist, out);
        }
    }
}

impl<P> std::fmt::Display for QuadTree<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let indent = "    ".repeat(self.depth as usize);
        writeln!(f, "{indent}QuadTree:")?;
        writeln!(f, "{indent}- depth: {}", self.depth)?;
        writeln!(f, "{indent}- points: {}", self.points.len())?;
        if let Some(children) = &self.children {
            writeln!(f, "{indent}- with children:")?;
            write!(f, "{}", children.nw)?;
            write!(f, "{}", children.ne)?;
            write!(f, "{}", children.sw)?;
            write!(f, "{}", children.se)?;
        }
        Ok(())
    }
}
