//! Two-focus spherical ellipse.
//!
//! Centre longitude is wrapped symmetrically (`> 180` OR `< -180`), matching
//! `Rectangle` and `Record`.

use crate::error::{Error, Result};
use crate::geometry::{destination, haversine};
use crate::record::{wrap_lon, Record};
use crate::shapes::Rectangle;

/// A spherical ellipse: the locus of points whose summed haversine distance
/// to two foci is at most `2a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    lon: f64,
    lat: f64,
    a: f64,
    b: f64,
    theta: f64,
    f1: (f64, f64),
    f2: (f64, f64),
}

impl Ellipse {
    /// Construct an ellipse centred at `(lon, lat)` with semi-major axis
    /// `a`, semi-minor axis `b`, and orientation `theta` (radians,
    /// anti-clockwise from east).
    pub fn new(lon: f64, lat: f64, a: f64, b: f64, theta: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidLatitude { value: lat });
        }
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

    /// First focus.
    pub fn focus1(&self) -> (f64, f64) {
        self.f1
    }

    /// Second focus.
    pub fn focus2(&self) -> (f64, f64) {
        self.f2
    }

    /// `true` if `point` lies within the ellipse.
    pub fn contains<P>(&self, point: &Record<P>) -> bool {
        haversine(self.f1.0, self.f1.1, point.lon, point.lat)
            + haversine(self.f2.0, self.f2.1, point.lon, point.lat)
            <= 2.0 * self.a
    }

    /// Conservative pruning predicate against a `Rectangle`: `true` only if
    /// *both* foci could be within the ellipse's reach of the rectangle.
    /// The conservative `and` form never produces a false negative; an `or`
    /// form would let queries miss records near only one focus.
    pub fn nearby_rect(&self, rect: &Rectangle) -> bool {
        haversine(self.f1.0, self.f1.1, rect.lon(), rect.lat()) <= rect.edge_dist() + self.a
            && haversine(self.f2.0, self.f2.1, rect.lon(), rect.lat()) <= rect.edge_dist() + self.a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn foci_are_contained() {
        let e = Ellipse::new(12.5, 2.5, 2.0, 1.0, 0.0).unwrap();
        let (f1_lon, f1_lat) = e.focus1();
        let (f2_lon, f2_lat) = e.focus2();
        assert!(e.contains(&Record::new(f1_lon, f1_lat).unwrap()));
        assert!(e.contains(&Record::new(f2_lon, f2_lat).unwrap()));
    }

    #[test]
    fn containment_near_boundary() {
        let a = haversine(0.0, 2.5, 1.0, 2.5);
        let b = haversine(0.0, 2.5, 0.0, 3.0);
        let e = Ellipse::new(12.5, 2.5, a, b, 0.0).unwrap();

        for (lon, lat) in [
            (13.49, 2.5),
            (11.51, 2.5),
            (12.5, 2.99),
            (12.5, 2.01),
        ] {
            assert!(
                e.contains(&Record::new(lon, lat).unwrap()),
                "expected ({lon}, {lat}) to be contained"
            );
        }

        for (lon, lat) in [
            (13.51, 2.5),
            (11.49, 2.5),
            (12.5, 3.01),
            (12.5, 1.99),
        ] {
            assert!(
                !e.contains(&Record::new(lon, lat).unwrap()),
                "expected ({lon}, {lat}) to be rejected"
            );
        }
    }

    #[test]
    fn centre_longitude_is_wrapped_symmetrically() {
        let e = Ellipse::new(-200.0, 0.0, 1.0, 0.5, 0.0).unwrap();
        assert_relative_eq!(e.lon, 160.0, epsilon = 1e-9);
    }

    #[test]
    fn invalid_latitude_rejected() {
        assert_eq!(
            Ellipse::new(0.0, 95.0, 1.0, 0.5, 0.0).unwrap_err(),
            crate::error::Error::InvalidLatitude { value: 95.0 }
        );
    }
}
