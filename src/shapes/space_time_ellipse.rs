//! Spatio-temporal ellipse: an [`Ellipse`](crate::shapes::Ellipse) extended
//! with a `start ≤ end` datetime range.
//!
//! Uses the same second-focus bearing formula as plain `Ellipse`
//! (`(bearing - 180) % 360`) rather than a separately-derived one, so the
//! two shapes stay consistent with each other.

use crate::error::{Error, Result};
use crate::geometry::{destination, haversine};
use crate::record::{wrap_lon, SpaceTimeRecord};
use crate::shapes::SpaceTimeRectangle;
use crate::temporal::{midpoint, Temporal, TemporalSpan};

/// A spherical ellipse with an additional `start ≤ end` temporal range.
#[derive(Debug, Clone, Copy)]
pub struct SpaceTimeEllipse<T: Temporal> {
    lon: f64,
    lat: f64,
    a: f64,
    b: f64,
    theta: f64,
    datetime: T,
    dt: T::Span,
    f1: (f64, f64),
    f2: (f64, f64),
}

impl<T: Temporal> SpaceTimeEllipse<T> {
    /// Construct, swapping `start`/`end` (with a logged warning) if
    /// supplied reversed.
    pub fn new(
        lon: f64,
        lat: f64,
        a: f64,
        b: f64,
        theta: f64,
        start: T,
        end: T,
    ) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidLatitude { value: lat });
        }
        let (start, end) = if start > end {
            log::warn!("SpaceTimeEllipse constructed with end before start; swapping");
            (end, start)
        } else {
            (start, end)
        };
        let lon = wrap_lon(lon);
        let bearing = (90.0 - theta.to_degrees()).rem_euclid(360.0);
        let c = (a * a - b * b).sqrt();
        let f1 = destination(lon, lat, bearing, c);
        let f2 = destination(lon, lat, (bearing - 180.0).rem_euclid(360.0), c);
        Ok(Self {
            lon,
            lat,
            a,
            b,
            theta,
            datetime: midpoint(start, end),
            dt: end.span_since(start),
            f1,
            f2,
        })
    }

    /// Semi-major axis.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Semi-minor axis.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Orientation, radians anti-clockwise from east.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Start of the temporal range.
    pub fn start(&self) -> T {
        self.datetime.sub_span(self.dt.halved())
    }

    /// End of the temporal range.
    pub fn end(&self) -> T {
        self.datetime.add_span(self.dt.halved())
    }

    /// `true` if `point` lies within the ellipse in space and time.
    pub fn contains<P>(&self, point: &SpaceTimeRecord<T, P>) -> bool {
        (haversine(self.f1.0, self.f1.1, point.lon, point.lat)
            + haversine(self.f2.0, self.f2.1, point.lon, point.lat)
            <= 2.0 * self.a)
            && point.datetime <= self.end()
            && point.datetime >= self.start()
    }

    fn corner_dist(rect: &SpaceTimeRectangle<T>) -> f64 {
        let mut corner_dist = haversine(
            rect.lon(),
            rect.lat(),
            rect.lon() + rect.lon_range() / 2.0,
            rect.lat() + rect.lat_range() / 2.0,
        )
        .max(haversine(
            rect.lon(),
            rect.lat(),
            rect.lon() + rect.lon_range() / 2.0,
            rect.lat() - rect.lat_range() / 2.0,
        ));
        if (rect.lat() + rect.lat_range() / 2.0) * (rect.lat() - rect.lat_range() / 2.0) < 0.0 {
            corner_dist = corner_dist.max(haversine(
                rect.lon(),
                rect.lat(),
                rect.lon() + rect.lon_range() / 2.0,
                0.0,
            ));
        }
        corner_dist
    }

    /// Conservative pruning predicate against a `SpaceTimeRectangle`: both
    /// foci must be within reach, and the temporal ranges must overlap.
    pub fn nearby_rect(&self, rect: &SpaceTimeRectangle<T>) -> bool {
        if rect.start() > self.end() || rect.end() < self.start() {
            return false;
        }
        let corner_dist = Self::corner_dist(rect);
        haversine(self.f1.0, self.f1.1, rect.lon(), rect.lat()) <= corner_dist + self.a
            && haversine(self.f2.0, self.f2.1, rect.lon(), rect.lat()) <= corner_dist + self.a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_respects_time_bounds() {
        let e = SpaceTimeEllipse::new(0.0, 0.0, 2.0, 1.0, 0.0, 0_i64, 10_i64).unwrap();
        let inside = SpaceTimeRecord::new(0.0, 0.0, 5_i64).unwrap();
        let outside_time = SpaceTimeRecord::new(0.0, 0.0, 20_i64).unwrap();
        assert!(e.contains(&inside));
        assert!(!e.contains(&outside_time));
    }

    #[test]
    fn reversed_range_is_swapped() {
        let e = SpaceTimeEllipse::new(0.0, 0.0, 2.0, 1.0, 0.0, 10_i64, 0_i64).unwrap();
        assert_eq!(e.start(), 0);
        assert_eq!(e.end(), 10);
    }

    #[test]
    fn invalid_latitude_rejected() {
        assert_eq!(
            SpaceTimeEllipse::new(0.0, 95.0, 2.0, 1.0, 0.0, 0_i64, 10_i64).unwrap_err(),
            Error::InvalidLatitude { value: 95.0 }
        );
    }
}
