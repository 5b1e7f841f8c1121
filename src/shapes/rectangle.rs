//! Axis-aligned (in lon/lat) rectangle with antimeridian-wrap-aware
//! containment, intersection, and tree-pruning predicates.
//!
//! `contains` is boundary-inclusive (`<=`/`>=`), unlike the boundary-exclusive
//! DE-9IM convention some geometry libraries use for rectangle containment.

use crate::error::{Error, Result};
use crate::geometry::haversine;
use crate::record::{wrap_lon, Record};

/// A rectangle in lon/lat space, correct across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    west: f64,
    east: f64,
    south: f64,
    north: f64,
}

impl Rectangle {
    /// Construct from edges. `west`/`east` are canonicalized into
    /// `[-180, 180]`; `south ≤ north` must both lie in `[-90, 90]`.
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&north) {
            return Err(Error::InvalidLatitude { value: north });
        }
        if !(-90.0..=90.0).contains(&south) {
            return Err(Error::InvalidLatitude { value: south });
        }
        let west = wrap_lon(west);
        let east = wrap_lon(east);
        Ok(Self {
            west,
            east,
            south,
            north,
        })
    }

    /// Construct from a centre point and full width/height, matching the
    /// `Rectangle(lon, lat, w, h)` parameterization used by the QuadTree
    /// test vectors and `divide()`.
    pub fn from_centre(lon: f64, lat: f64, width: f64, height: f64) -> Result<Self> {
        Self::new(lon - width / 2.0, lon + width / 2.0, lat - height / 2.0, lat + height / 2.0)
    }

    /// Western edge.
    pub fn west(&self) -> f64 {
        self.west
    }

    /// Eastern edge.
    pub fn east(&self) -> f64 {
        self.east
    }

    /// Southern edge.
    pub fn south(&self) -> f64 {
        self.south
    }

    /// Northern edge.
    pub fn north(&self) -> f64 {
        self.north
    }

    /// Full latitude extent.
    pub fn lat_range(&self) -> f64 {
        self.north - self.south
    }

    /// Centre latitude.
    pub fn lat(&self) -> f64 {
        self.south + self.lat_range() / 2.0
    }

    /// Full longitude extent, accounting for antimeridian wrap.
    pub fn lon_range(&self) -> f64 {
        if self.east < self.west {
            self.east - self.west + 360.0
        } else {
            self.east - self.west
        }
    }

    /// Centre longitude, canonicalized into `[-180, 180]`.
    pub fn lon(&self) -> f64 {
        wrap_lon(self.west + self.lon_range() / 2.0)
    }

    /// `true` if `east < west` under the canonical form (the rectangle
    /// straddles the antimeridian).
    pub fn wraps(&self) -> bool {
        self.east < self.west
    }

    /// Conservative maximum haversine distance from the centre to any point
    /// on the boundary: used for tree pruning (never produces false
    /// negatives in `nearby`).
    pub fn edge_dist(&self) -> f64 {
        let (lon, lat) = (self.lon(), self.lat());
        let mut corner_dist = haversine(lon, lat, self.east, self.north)
            .max(haversine(lon, lat, self.east, self.south));
        if self.north * self.south < 0.0 {
            corner_dist = corner_dist.max(haversine(lon, lat, self.east, 0.0));
        }
        corner_dist
    }

    fn test_east_west(&self, lon: f64) -> bool {
        let centre = self.lon();
        if self.lon_range() >= 360.0 {
            return true;
        }
        if self.east > centre && self.west < centre {
            lon <= self.east && lon >= self.west
        } else if self.east < centre {
            !(lon > self.east && lon < self.west)
        } else if self.west > centre {
            !(lon < self.east && lon > self.west)
        } else {
            false
        }
    }

    fn test_north_south(&self, lat: f64) -> bool {
        lat <= self.north && lat >= self.south
    }

    /// `true` if `point` falls within this rectangle (boundary-inclusive).
    pub fn contains<P>(&self, point: &Record<P>) -> bool {
        self.test_north_south(point.lat) && self.test_east_west(point.lon)
    }

    /// `true` if `other` overlaps this rectangle.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        if other.south > self.north || other.north < self.south {
            return false;
        }
        self.test_east_west(other.west)
            || self.test_east_west(other.east)
            || (other.test_east_west(self.west) && other.test_east_west(self.east))
    }

    /// Conservative pruning predicate: `true` if `point` could be within
    /// `dist` of anything inside this rectangle. May false-positive; never
    /// false-negatives.
    pub fn nearby<P>(&self, point: &Record<P>, dist: f64) -> bool {
        haversine(self.lon(), self.lat(), point.lon, point.lat) <= dist + self.edge_dist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antimeridian_rectangle_contains_wrapped_points_not_centre() {
        let r = Rectangle::new(170.0, -170.0, -10.0, 10.0).unwrap();
        let inside_east = Record::new(175.0, 0.0).unwrap();
        let inside_west = Record::new(-175.0, 0.0).unwrap();
        let outside = Record::new(0.0, 0.0).unwrap();
        assert!(r.contains(&inside_east));
        assert!(r.contains(&inside_west));
        assert!(!r.contains(&outside));
    }

    #[test]
    fn full_wrap_rectangle_contains_every_longitude() {
        let r = Rectangle::new(-180.0, 180.0, -10.0, 10.0).unwrap();
        assert!(r.lon_range() >= 360.0);
        for lon in [-180.0, -90.0, 0.0, 90.0, 179.9] {
            assert!(r.contains(&Record::new(lon, 0.0).unwrap()));
        }
    }

    #[test]
    fn non_wrapping_contains_basic() {
        let r = Rectangle::from_centre(10.0, 4.0, 20.0, 8.0).unwrap();
        assert!(r.contains(&Record::new(10.0, 5.0).unwrap()));
        assert!(!r.contains(&Record::new(-2.0, -9.2).unwrap()));
    }

    #[test]
    fn invalid_latitude_rejected() {
        assert!(Rectangle::new(-10.0, 10.0, -10.0, 95.0).is_err());
    }
}
