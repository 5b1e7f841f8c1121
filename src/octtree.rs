//! Space-time OctTree: the [`QuadTree`](crate::quadtree::QuadTree) idea
//! extended with an 8-way lon/lat/time split.
//!
//! Insert, remove, and `nearby_points` visit the four "back" (earlier-half-
//! time) octants before the four "fwd" (later-half-time) ones; `query` and
//! `query_ellipse` visit "fwd" before "back". The two orders are kept
//! deliberately distinct rather than unified, since unifying them would
//! change which record wins a floating-point tie on a shared octant edge.

use crate::record::SpaceTimeRecord;
use crate::shapes::{SpaceTimeEllipse, SpaceTimeRectangle};
use crate::temporal::Temporal;

/// The eight children of a divided [`OctTree`] node.
#[derive(Debug)]
struct Octants<T: Temporal, P> {
    nw_back: OctTree<T, P>,
    ne_back: OctTree<T, P>,
    sw_back: OctTree<T, P>,
    se_back: OctTree<T, P>,
    nw_fwd: OctTree<T, P>,
    ne_fwd: OctTree<T, P>,
    sw_fwd: OctTree<T, P>,
    se_fwd: OctTree<T, P>,
}

/// A region-time OctTree over [`SpaceTimeRecord`]s.
#[derive(Debug)]
pub struct OctTree<T: Temporal, P = ()> {
    boundary: SpaceTimeRectangle<T>,
    capacity: usize,
    depth: u32,
    max_depth: Option<u32>,
    points: Vec<SpaceTimeRecord<T, P>>,
    children: Option<Box<Octants<T, P>>>,
}

impl<T: Temporal, P> OctTree<T, P> {
    /// Construct an empty OctTree over `boundary`.
    pub fn new(boundary: SpaceTimeRectangle<T>, capacity: usize, max_depth: Option<u32>) -> Self {
        Self::with_depth(boundary, capacity, 0, max_depth)
    }

    fn with_depth(
        boundary: SpaceTimeRectangle<T>,
        capacity: usize,
        depth: u32,
        max_depth: Option<u32>,
    ) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            max_depth,
            points: Vec::new(),
            children: None,
        }
    }

    /// The boundary box of this node.
    pub fn boundary(&self) -> &SpaceTimeRectangle<T> {
        &self.boundary
    }

    /// `true` if this node has divided into children.
    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// Records held directly by this node (not by its children).
    pub fn points(&self) -> &[SpaceTimeRecord<T, P>] {
        &self.points
    }

    fn divide(&mut self) {
        let b = self.boundary;
        let lon = b.lon();
        let lat = b.lat();
        let lon_range = b.lon_range() / 2.0;
        let lat_range = b.lat_range() / 2.0;
        let dt = b.dt().halved();
        let dt_quarter = dt.halved();
        let t_fwd = b.datetime().add_span(dt_quarter);
        let t_back = b.datetime().sub_span(dt_quarter);
        let depth = self.depth + 1;
        let cap = self.capacity;
        let md = self.max_depth;
        let node = |lon: f64, lat: f64, t: T| {
            OctTree::with_depth(
                SpaceTimeRectangle::from_centre(lon, lat, lon_range, lat_range, t, dt),
                cap,
                depth,
                md,
            )
        };

        log::trace!("OctTree dividing at depth {depth}");

        self.children = Some(Box::new(Octants {
            nw_back: node(lon - b.lon_range() / 4.0, lat + b.lat_range() / 4.0, t_back),
            ne_back: node(lon + b.lon_range() / 4.0, lat + b.lat_range() / 4.0, t_back),
            sw_back: node(lon - b.lon_range() / 4.0, lat - b.lat_range() / 4.0, t_back),
            se_back: node(lon + b.lon_range() / 4.0, lat - b.lat_range() / 4.0, t_back),
            nw_fwd: node(lon - b.lon_range() / 4.0, lat + b.lat_range() / 4.0, t_fwd),
            ne_fwd: node(lon + b.lon_range() / 4.0, lat + b.lat_range() / 4.0, t_fwd),
            sw_fwd: node(lon - b.lon_range() / 4.0, lat - b.lat_range() / 4.0, t_fwd),
            se_fwd: node(lon + b.lon_range() / 4.0, lat - b.lat_range() / 4.0, t_fwd),
        }));
    }

    /// Insert `record`. Traversal order on overflow: NWback, NEback, SWback,
    /// SEback, NWfwd, NEfwd, SWfwd, SEfwd.
    pub fn insert(&mut self, record: SpaceTimeRecord<T, P>) -> bool {
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
        let c = self.children.as_mut().expect("just divided");
        for child in [
            &mut c.nw_back,
            &mut c.ne_back,
            &mut c.sw_back,
            &mut c.se_back,
            &mut c.nw_fwd,
            &mut c.ne_fwd,
            &mut c.sw_fwd,
            &mut c.se_fwd,
        ] {
            if child.boundary.contains(&record) {
                return child.insert(record);
            }
        }
        false
    }

    /// Remove the first record equal to `record`, in the same fixed order as
    /// [`insert`](Self::insert).
    pub fn remove(&mut self, record: &SpaceTimeRecord<T, P>) -> bool {
        if !self.boundary.contains(record) {
            return false;
        }
        if let Some(pos) = self.points.iter().position(|p| p == record) {
            self.points.remove(pos);
            return true;
        }
        if let Some(c) = self.children.as_mut() {
            for child in [
                &mut c.nw_back,
                &mut c.ne_back,
                &mut c.sw_back,
                &mut c.se_back,
                &mut c.nw_fwd,
                &mut c.ne_fwd,
                &mut c.sw_fwd,
                &mut c.se_fwd,
            ] {
                if child.remove(record) {
                    return true;
                }
            }
        }
        false
    }

    /// All stored records contained within `rect`. Traversal order: NWfwd,
    /// NEfwd, SWfwd, SEfwd, NWback, NEback, SWback, SEback.
    pub fn query(&self, rect: &SpaceTimeRectangle<T>) -> Vec<&SpaceTimeRecord<T, P>> {
        let mut out = Vec::new();
        self.query_into(rect, &mut out);
        out
    }

    fn query_into<'a>(&'a self, rect: &SpaceTimeRectangle<T>, out: &mut Vec<&'a SpaceTimeRecord<T, P>>) {
        if !self.boundary.intersects(rect) {
            return;
        }
        for p in &self.points {
            if rect.contains(p) {
                out.push(p);
            }
        }
        if let Some(c) = &self.children {
            for child in [&c.nw_fwd, &c.ne_fwd, &c.sw_fwd, &c.se_fwd, &c.nw_back, &c.ne_back, &c.sw_back, &c.se_back] {
                child.query_into(rect, out);
            }
        }
    }

    /// All stored records contained within `ellipse`.
    pub fn query_ellipse(&self, ellipse: &SpaceTimeEllipse<T>) -> Vec<&SpaceTimeRecord<T, P>> {
        let mut out = Vec::new();
        self.query_ellipse_into(ellipse, &mut out);
        out
    }

    fn query_ellipse_into<'a>(&'a self, ellipse: &SpaceTimeEllipse<T>, out: &mut Vec<&'a SpaceTimeRecord<T, P>>) {
        if !ellipse.nearby_rect(&self.boundary) {
            return;
        }
        for p in &self.points {
            if ellipse.contains(p) {
                out.push(p);
            }
        }
        if let Some(c) = &self.children {
            for child in [&c.nw_fwd, &c.ne_fwd, &c.sw_fwd, &c.se_fwd, &c.nw_back, &c.ne_back, &c.sw_back, &c.se_back] {
                child.query_ellipse_into(ellipse, out);
            }
        }
    }

    /// All stored records within haversine distance `dist` and temporal
    /// distance `t_dist` of `point`. If `exclude_self` is set, a stored
    /// record equal to `point` is skipped.
    pub fn nearby_points(
        &self,
        point: &SpaceTimeRecord<T, P>,
        dist: f64,
        t_dist: T::Span,
        exclude_self: bool,
    ) -> Vec<&SpaceTimeRecord<T, P>> {
        let mut out = Vec::new();
        self.nearby_points_into(point, dist, t_dist, exclude_self, &mut out);
        out
    }

    fn nearby_points_into<'a>(
        &'a self,
        point: &SpaceTimeRecord<T, P>,
        dist: f64,
        t_dist: T::Span,
        exclude_self: bool,
        out: &mut Vec<&'a SpaceTimeRecord<T, P>>,
    ) {
        if !self.boundary.nearby(point, dist, t_dist) {
            return;
        }
        for p in &self.points {
            if exclude_self && p == point {
                continue;
            }
            let within_time = p.datetime <= point.datetime.add_span(t_dist)
                && p.datetime >= point.datetime.sub_span(t_dist);
            if point.distance(p) <= dist && within_time {
                out.push(p);
            }
        }
        if let Some(c) = &self.children {
            for child in [
                &c.nw_back,
                &c.ne_back,
                &c.sw_back,
                &c.se_back,
                &c.nw_fwd,
                &c.ne_fwd,
                &c.sw_fwd,
                &c.se_fwd,
            ] {
                child.nearby_points_into(point, dist, t_dist, exclude_self, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary() -> SpaceTimeRectangle<i64> {
        SpaceTimeRectangle::new(10.0, 4.0, 20.0, 8.0, 0_i64, 100_i64).unwrap()
    }

    #[test]
    fn eight_way_divide_halves_every_extent() {
        let mut tree: OctTree<i64> = OctTree::new(boundary(), 1, None);
        tree.insert(SpaceTimeRecord::new(5.0, 2.0, 10_i64).unwrap());
        tree.insert(SpaceTimeRecord::new(5.0, 2.0, 20_i64).unwrap());

        assert!(tree.is_divided());
        let c = tree.children.as_ref().unwrap();
        for child in [&c.nw_back, &c.ne_back, &c.sw_back, &c.se_back, &c.nw_fwd, &c.ne_fwd, &c.sw_fwd, &c.se_fwd] {
            assert_eq!(child.boundary.lon_range(), 10.0);
            assert_eq!(child.boundary.lat_range(), 4.0);
            assert_eq!(child.boundary.end() - child.boundary.start(), 50);
        }
    }

    #[test]
    fn nearby_points_respects_time_distance() {
        let mut tree: OctTree<i64> = OctTree::new(boundary(), 5, None);
        let near = SpaceTimeRecord::new(10.0, 4.0, 50_i64).unwrap();
        let far_in_time = SpaceTimeRecord::new(10.0, 4.0, 99_i64).unwrap();
        tree.insert(near.clone());
        tree.insert(far_in_time);

        let query = SpaceTimeRecord::new(10.0, 4.0, 51_i64).unwrap();
        let found = tree.nearby_points(&query, 10.0, 2, false);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].datetime, 50);
    }
}
