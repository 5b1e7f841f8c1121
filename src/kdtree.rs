//! Balanced KDTree over (lon, lat), alternating split axes, with
//! haversine-based nearest-neighbour query correct across the antimeridian.
//!
//! Pruning against the far side of a split computes the perpendicular-axis
//! haversine distance directly against the partition value, rather than
//! constructing a synthetic `Record` just to measure a distance to it.

use crate::error::{Error, Result};
use crate::geometry::haversine;
use crate::record::Record;

/// Default maximum depth of a freshly-built KDTree.
pub const DEFAULT_MAX_DEPTH: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Lon,
    Lat,
}

impl Axis {
    fn flip(self) -> Self {
        match self {
            Axis::Lon => Axis::Lat,
            Axis::Lat => Axis::Lon,
        }
    }

    fn value<P>(self, record: &Record<P>) -> f64 {
        match self {
            Axis::Lon => record.lon,
            Axis::Lat => record.lat,
        }
    }

    fn projection_dist(self, lon: f64, lat: f64, partition_value: f64) -> f64 {
        match self {
            Axis::Lon => haversine(lon, lat, partition_value, lat),
            Axis::Lat => haversine(lon, lat, lon, partition_value),
        }
    }
}

#[derive(Debug)]
enum KdNode<P> {
    Leaf(Vec<Record<P>>),
    Split {
        axis: Axis,
        partition_value: f64,
        left: Box<KdNode<P>>,
        right: Box<KdNode<P>>,
    },
}

impl<P> KdNode<P> {
    fn build(mut points: Vec<Record<P>>, axis: Axis, depth: u32, max_depth: u32) -> Self {
        if depth == max_depth || points.len() < 2 {
            return KdNode::Leaf(points);
        }

        points.sort_by(|a, b| axis.value(a).partial_cmp(&axis.value(b)).unwrap());
        let n = points.len();
        let mut split_index = n / 2;
        let partition_value = axis.value(&points[split_index - 1]);
        while split_index < n && axis.value(&points[split_index]) == partition_value {
            split_index += 1;
        }

        log::trace!("KDTree splitting at depth {depth} on {axis:?} at {partition_value}");

        let right_points = points.split_off(split_index);
        let left_points = points;
        let next_axis = axis.flip();
        KdNode::Split {
            axis,
            partition_value,
            left: Box::new(KdNode::build(left_points, next_axis, depth + 1, max_depth)),
            right: Box::new(KdNode::build(right_points, next_axis, depth + 1, max_depth)),
        }
    }

    fn insert(&mut self, record: Record<P>) -> bool {
        match self {
            KdNode::Leaf(points) => {
                if points.iter().any(|p| p == &record) {
                    return false;
                }
                points.push(record);
                true
            }
            KdNode::Split {
                axis,
                partition_value,
                left,
                right,
            } => {
                if axis.value(&record) < *partition_value {
                    left.insert(record)
                } else {
                    right.insert(record)
                }
            }
        }
    }

    fn delete(&mut self, record: &Record<P>) -> bool {
        match self {
            KdNode::Leaf(points) => {
                if let Some(pos) = points.iter().position(|p| p == record) {
                    points.remove(pos);
                    true
                } else {
                    false
                }
            }
            KdNode::Split {
                axis,
                partition_value,
                left,
                right,
            } => {
                if axis.value(record) < *partition_value {
                    left.delete(record)
                } else {
                    right.delete(record)
                }
            }
        }
    }

    fn query<'a>(
        &'a self,
        lon: f64,
        lat: f64,
        mut best: Option<&'a Record<P>>,
        mut best_dist: f64,
    ) -> (Option<&'a Record<P>>, f64) {
        match self {
            KdNode::Leaf(points) => {
                for p in points {
                    let d = haversine(lon, lat, p.lon, p.lat);
                    if d < best_dist {
                        best = Some(p);
                        best_dist = d;
                    }
                }
                (best, best_dist)
            }
            KdNode::Split {
                axis,
                partition_value,
                left,
                right,
            } => {
                let v = match axis {
                    Axis::Lon => lon,
                    Axis::Lat => lat,
                };
                let (primary, secondary) = if v < *partition_value {
                    (left.as_ref(), right.as_ref())
                } else {
                    (right.as_ref(), left.as_ref())
                };

                let (mut best, mut best_dist) = primary.query(lon, lat, best, best_dist);
                if axis.projection_dist(lon, lat, *partition_value) < best_dist {
                    let (b2, d2) = secondary.query(lon, lat, best, best_dist);
                    best = b2;
                    best_dist = d2;
                }
                (best, best_dist)
            }
        }
    }
}

/// A balanced KDTree over [`Record`]s, splitting alternately on longitude
/// and latitude at the median of the current axis.
#[derive(Debug)]
pub struct KDTree<P = ()> {
    root: KdNode<P>,
}

impl<P> KDTree<P> {
    /// Build a balanced KDTree from `points`, capping recursion at
    /// `max_depth`. A node with fewer than 2 points, or at `max_depth`,
    /// becomes a leaf.
    pub fn build(points: Vec<Record<P>>, max_depth: u32) -> Self {
        Self {
            root: KdNode::build(points, Axis::Lon, 0, max_depth),
        }
    }

    /// Build using the default maximum depth of 20.
    pub fn build_default(points: Vec<Record<P>>) -> Self {
        Self::build(points, DEFAULT_MAX_DEPTH)
    }

    /// Insert `record`, descending to the leaf its axis values select. May
    /// unbalance the tree. Returns `false` if an equal record is already
    /// present.
    pub fn insert(&mut self, record: Record<P>) -> bool {
        self.root.insert(record)
    }

    /// Delete the first record equal to `record`. May unbalance the tree.
    pub fn delete(&mut self, record: &Record<P>) -> bool {
        self.root.delete(record)
    }

    /// Find the nearest stored record to `point`, correct across the
    /// antimeridian (a shadow query at `lon ± 360` is run alongside the
    /// direct query, and the closer of the two results is kept).
    ///
    /// Returns `Error::EmptyTree` if no record is stored.
    pub fn query(&self, point: &Record<P>) -> Result<(&Record<P>, f64)> {
        let shadow_lon = if point.lon < 0.0 {
            point.lon + 360.0
        } else {
            point.lon - 360.0
        };

        let (r1, d1) = self.root.query(point.lon, point.lat, None, f64::INFINITY);
        let (r2, d2) = self.root.query(shadow_lon, point.lat, None, f64::INFINITY);

        let chosen = if d1 <= d2 { r1 } else { r2 };
        match chosen {
            Some(record) => Ok((record, haversine(point.lon, point.lat, record.lon, record.lat))),
            None => Err(Error::EmptyTree),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records_with_uids() -> Vec<Record> {
        vec![
            Record::new(1.0, 0.0).unwrap().with_uid("A"),
            Record::new(-9.0, 44.0).unwrap().with_uid("B"),
            Record::new(174.0, -81.0).unwrap().with_uid("C"),
            Record::new(-4.0, 0.0).unwrap().with_uid("D"),
        ]
    }

    #[test]
    fn nearest_neighbour_across_antimeridian() {
        let tree = KDTree::build_default(records_with_uids());
        let (record, dist) = tree.query(&Record::new(-6.0, 35.0).unwrap()).unwrap();
        assert_eq!(record.uid.as_deref(), Some("B"));
        assert!((dist - haversine(-6.0, 35.0, -9.0, 44.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_tree_query_errors() {
        let tree: KDTree = KDTree::build_default(Vec::new());
        assert_eq!(tree.query(&Record::new(0.0, 0.0).unwrap()), Err(Error::EmptyTree));
    }

    #[test]
    fn duplicate_median_values_do_not_empty_right_subtree() {
        // A run of duplicate longitudes straddling the median: the split
        // must advance past the whole run rather than stopping partway
        // through it and leaving the right subtree empty.
        let lons = [1.0, 2.0, 2.0, 2.0, 2.0, 3.0];
        let points: Vec<Record> = lons.iter().map(|&lon| Record::new(lon, 0.0).unwrap()).collect();
        let tree = KDTree::build(points, 20);
        match &tree.root {
            KdNode::Split { right, .. } => {
                assert!(!matches!(right.as_ref(), KdNode::Leaf(p) if p.is_empty()));
            }
            KdNode::Leaf(_) => panic!("expected a split node"),
        }
    }

    #[test]
    fn insert_rejects_duplicate() {
        let mut tree: KDTree = KDTree::build_default(vec![Record::new(1.0, 1.0).unwrap()]);
        assert!(!tree.insert(Record::new(1.0, 1.0).unwrap()));
        assert!(tree.insert(Record::new(2.0, 2.0).unwrap()));
    }

    #[test]
    fn delete_removes_record() {
        let target = Record::new(1.0, 1.0).unwrap();
        let mut tree: KDTree = KDTree::build_default(vec![target.clone()]);
        assert!(tree.delete(&target));
        assert!(tree.query(&target).is_err());
    }
}
