//! Spatio-temporal rectangle: a [`Rectangle`](crate::shapes::Rectangle)-shaped
//! lon/lat region extended with a temporal range.
//!
//! Parameterized by centre + half-extents (`lon, lat, lon_range, lat_range,
//! dt`) rather than `Rectangle`'s edge parameterization, since
//! `OctTree::divide` needs to halve the extents directly. The public
//! constructor instead takes a `start ≤ end` datetime range and derives the
//! centre/`dt` internally, emitting a `log::warn!` if the range arrives
//! reversed.

use crate::error::Result;
use crate::geometry::haversine;
use crate::record::{wrap_lon, SpaceTimeRecord};
use crate::temporal::{midpoint, Temporal, TemporalSpan};

/// A lon/lat/time box: centre `(lon, lat, datetime)` plus full extents
/// `(lon_range, lat_range, dt)`.
#[derive(Debug, Clone, Copy)]
pub struct SpaceTimeRectangle<T: Temporal> {
    lon: f64,
    lat: f64,
    lon_range: f64,
    lat_range: f64,
    datetime: T,
    dt: T::Span,
}

impl<T: Temporal> PartialEq for SpaceTimeRectangle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.lon == other.lon
            && self.lat == other.lat
            && self.lon_range == other.lon_range
            && self.lat_range == other.lat_range
            && self.datetime == other.datetime
            && self.dt == other.dt
    }
}

impl<T: Temporal> SpaceTimeRectangle<T> {
    /// Construct from a start/end datetime range; `start` and `end` are
    /// swapped (with a logged warning) if supplied reversed.
    pub fn new(
        lon: f64,
        lat: f64,
        lon_range: f64,
        lat_range: f64,
        start: T,
        end: T,
    ) -> Result<Self> {
        let (start, end) = if start > end {
            log::warn!("SpaceTimeRectangle constructed with end before start; swapping");
            (end, start)
        } else {
            (start, end)
        };
        Ok(Self {
            lon: wrap_lon(lon),
            lat,
            lon_range,
            lat_range,
            datetime: midpoint(start, end),
            dt: end.span_since(start),
        })
    }

    /// Construct directly from a centre + full extents, as used internally
    /// by `OctTree::divide`.
    pub(crate) fn from_centre(
        lon: f64,
        lat: f64,
        lon_range: f64,
        lat_range: f64,
        datetime: T,
        dt: T::Span,
    ) -> Self {
        Self {
            lon: wrap_lon(lon),
            lat,
            lon_range,
            lat_range,
            datetime,
            dt,
        }
    }

    pub(crate) fn lon(&self) -> f64 {
        self.lon
    }
    pub(crate) fn lat(&self) -> f64 {
        self.lat
    }
    pub(crate) fn lon_range(&self) -> f64 {
        self.lon_range
    }
    pub(crate) fn lat_range(&self) -> f64 {
        self.lat_range
    }
    pub(crate) fn datetime(&self) -> T {
        self.datetime
    }
    pub(crate) fn dt(&self) -> T::Span {
        self.dt
    }

    /// Start of the temporal range.
    pub fn start(&self) -> T {
        self.datetime.sub_span(self.dt.halved())
    }

    /// End of the temporal range.
    pub fn end(&self) -> T {
        self.datetime.add_span(self.dt.halved())
    }

    /// `true` if `point` falls within this box in space and time.
    pub fn contains<P>(&self, point: &SpaceTimeRecord<T, P>) -> bool {
        point.lon <= self.lon + self.lon_range / 2.0
            && point.lon >= self.lon - self.lon_range / 2.0
            && point.lat <= self.lat + self.lat_range / 2.0
            && point.lat >= self.lat - self.lat_range / 2.0
            && point.datetime <= self.end()
            && point.datetime >= self.start()
    }

    /// `true` if `other` overlaps this box in space and time.
    pub fn intersects(&self, other: &SpaceTimeRectangle<T>) -> bool {
        !(self.lon - self.lon_range / 2.0 > other.lon + other.lon_range / 2.0
            || self.lon + self.lon_range / 2.0 < other.lon - other.lon_range / 2.0
            || self.lat - self.lat_range / 2.0 > other.lat + other.lat_range / 2.0
            || self.lat + self.lat_range / 2.0 < other.lat - other.lat_range / 2.0
            || self.start() > other.end()
            || self.end() < other.start())
    }

    fn corner_dist(&self) -> f64 {
        let mut corner_dist = haversine(
            self.lon,
            self.lat,
            self.lon + self.lon_range / 2.0,
            self.lat + self.lat_range / 2.0,
        )
        .max(haversine(
            self.lon,
            self.lat,
            self.lon + self.lon_range / 2.0,
            self.lat - self.lat_range / 2.0,
        ));
        if (self.lat + self.lat_range / 2.0) * (self.lat - self.lat_range / 2.0) < 0.0 {
            corner_dist = corner_dist.max(haversine(
                self.lon,
                self.lat,
                self.lon + self.lon_range / 2.0,
                0.0,
            ));
        }
        corner_dist
    }

    /// Conservative pruning predicate: `true` if `point` could be within
    /// `dist`/`t_dist` of anything inside this box.
    pub fn nearby<P>(&self, point: &SpaceTimeRecord<T, P>, dist: f64, t_dist: T::Span) -> bool {
        if point.datetime.sub_span(t_dist) > self.end()
            || point.datetime.add_span(t_dist) < self.start()
        {
            return false;
        }
        haversine(self.lon, self.lat, point.lon, point.lat) <= dist + self.corner_dist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_range_is_swapped() {
        let r = SpaceTimeRectangle::new(0.0, 0.0, 10.0, 10.0, 20_i64, 10_i64).unwrap();
        assert_eq!(r.start(), 10);
        assert_eq!(r.end(), 20);
    }

    #[test]
    fn contains_respects_time_bounds() {
        let r = SpaceTimeRectangle::new(0.0, 0.0, 10.0, 10.0, 0_i64, 10_i64).unwrap();
        let inside = SpaceTimeRecord::new(0.0, 0.0, 5_i64).unwrap();
        let outside_time = SpaceTimeRecord::new(0.0, 0.0, 11_i64).unwrap();
        assert!(r.contains(&inside));
        assert!(!r.contains(&outside_time));
    }
}
