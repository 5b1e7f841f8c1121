//! Explicit great-circle plane arithmetic.
//!
//! A great circle through two points is modelled as the unit normal of the
//! plane containing them and the Earth's centre, which makes
//! point-to-circle distance, coplanarity, and intersection all plain
//! vector arithmetic on that normal.

use super::haversine::{haversine, EARTH_RADIUS_KM};

const COPLANAR_TOLERANCE: f64 = 1e-9;

type Vec3 = [f64; 3];

fn to_cartesian(lon: f64, lat: f64) -> Vec3 {
    let lon_r = lon.to_radians();
    let lat_r = lat.to_radians();
    [
        lat_r.cos() * lon_r.cos(),
        lat_r.cos() * lon_r.sin(),
        lat_r.sin(),
    ]
}

fn from_cartesian(v: Vec3) -> (f64, f64) {
    let lat = v[2].asin();
    let lon = v[1].atan2(v[0]);
    (lon.to_degrees(), lat.to_degrees())
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(v: Vec3) -> f64 {
    dot(v, v).sqrt()
}

fn normalize(v: Vec3) -> Vec3 {
    let n = norm(v);
    [v[0] / n, v[1] / n, v[2] / n]
}

fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    normalize([
        (a[0] + b[0]) / 2.0,
        (a[1] + b[1]) / 2.0,
        (a[2] + b[2]) / 2.0,
    ])
}

/// The great circle through two points on the Earth's surface, represented
/// as the unit normal of the plane it lies in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircle {
    p1: Vec3,
    p2: Vec3,
    normal: Vec3,
    /// Great-circle arc distance between the two defining points, in km.
    pub dist: f64,
}

impl GreatCircle {
    /// Build the great circle passing through `(lon1, lat1)` and `(lon2, lat2)`.
    pub fn new(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> Self {
        let p1 = to_cartesian(lon1, lat1);
        let p2 = to_cartesian(lon2, lat2);
        let normal = normalize(cross(p1, p2));
        let dist = haversine(lon1, lat1, lon2, lat2);
        Self {
            p1,
            p2,
            normal,
            dist,
        }
    }

    /// Perpendicular distance from `(lon, lat)` to this great circle, in km.
    pub fn dist_from_point(&self, lon: f64, lat: f64) -> f64 {
        let p = to_cartesian(lon, lat);
        dot(self.normal, p).clamp(-1.0, 1.0).asin().abs() * EARTH_RADIUS_KM
    }

    /// `true` if `other` lies in (approximately) the same plane as `self`.
    pub fn _identical_plane(&self, other: &GreatCircle) -> bool {
        norm(cross(self.normal, other.normal)) < COPLANAR_TOLERANCE
    }

    /// One of the two antipodal intersection points of `self` and `other`,
    /// whichever is nearer to the midpoint of `self`'s defining arc.
    pub fn intersection(&self, other: &GreatCircle) -> (f64, f64) {
        let axis = cross(self.normal, other.normal);
        let candidate = normalize(axis);
        let antipode = [-candidate[0], -candidate[1], -candidate[2]];

        let mid = midpoint(self.p1, self.p2);
        let nearer = if dot(candidate, mid) >= dot(antipode, mid) {
            candidate
        } else {
            antipode
        };
        from_cartesian(nearer)
    }

    /// Angle between the two great-circle planes, in degrees, reduced to
    /// `[0, 90]`.
    pub fn intersection_angle(&self, other: &GreatCircle) -> f64 {
        let cos_angle = dot(self.normal, other.normal).clamp(-1.0, 1.0);
        let angle = cos_angle.acos().to_degrees();
        if angle > 90.0 {
            180.0 - angle
        } else {
            angle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HALIFAX: (f64, f64) = (-63.5728, 44.6476);
    const SOUTHAMPTON: (f64, f64) = (-1.4049, 50.9105);

    #[test]
    fn constructor_dist_matches_haversine() {
        let gc = GreatCircle::new(HALIFAX.0, HALIFAX.1, SOUTHAMPTON.0, SOUTHAMPTON.1);
        let expected = haversine(SOUTHAMPTON.0, SOUTHAMPTON.1, HALIFAX.0, HALIFAX.1);
        assert_relative_eq!(gc.dist, expected, epsilon = 1e-9);
    }

    #[test]
    fn meridian_great_circles_stay_close_to_meridian() {
        let (lon0, lat0) = (45.0, 23.0);
        let gc1 = GreatCircle::new(0.0, 90.0, lon0, lat0);

        assert!(gc1.dist_from_point(-lon0, lat0 + 5.0) > 10.0);
        let mut lat = lat0;
        while lat < 90.0 {
            assert!(gc1.dist_from_point(lon0, lat) < 0.01);
            lat += 2.0;
        }

        let gc2 = GreatCircle::new(0.0, -90.0, lon0, -lat0);
        assert_relative_eq!(gc1.dist, gc2.dist, epsilon = 0.01);

        assert!(gc1._identical_plane(&gc2));
    }

    #[test]
    fn equator_and_meridian_intersect_at_origin_with_right_angle() {
        let gc0 = GreatCircle::new(-5.0, 0.0, 5.0, 0.0);
        let gc1 = GreatCircle::new(0.0, -5.0, 0.0, 5.0);
        assert_relative_eq!(gc0.dist, gc1.dist, epsilon = 1e-6);
        assert!(gc1.dist_from_point(0.0, 0.0) < 0.01);

        let (lon, lat) = gc0.intersection(&gc1);
        assert_relative_eq!(lon, 0.0, epsilon = 1e-6);
        assert_relative_eq!(lat, 0.0, epsilon = 1e-6);

        let angle = gc0.intersection_angle(&gc1);
        assert_relative_eq!(angle, 90.0, epsilon = 1e-6);
    }
}
