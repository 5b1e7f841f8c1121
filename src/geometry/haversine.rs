//! Core spherical distance and destination-point calculations.
//!
//! The Earth radius is baked directly into [`haversine`]'s return value, so
//! every distance in this crate is a plain kilometre `f64` rather than a
//! unitless radian angle that callers must scale themselves.

/// Mean Earth radius in kilometres, as fixed by this crate's distance
/// contract. All distances returned by this crate are in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Great-circle distance between two lon/lat points, in kilometres.
///
/// Latitudes outside `[-90, 90]` are undefined; callers are expected to have
/// validated coordinates at construction time (`Record`, `Rectangle`, ...).
pub fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lat1_r = deg_to_rad(lat1);
    let lat2_r = deg_to_rad(lat2);
    let d_lat = deg_to_rad(lat2 - lat1);
    let d_lon = deg_to_rad(lon2 - lon1);

    let a = (d_lat / 2.0).sin().powi(2)
        + (d_lon / 2.0).sin().powi(2) * lat1_r.cos() * lat2_r.cos();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Forward geodesic (spherical) destination point.
///
/// Given a starting lon/lat, an initial bearing in degrees clockwise from
/// north, and a distance in kilometres, returns the lon/lat reached by
/// travelling that great-circle arc.
pub fn destination(lon: f64, lat: f64, bearing_deg: f64, dist_km: f64) -> (f64, f64) {
    let lat1 = deg_to_rad(lat);
    let lon1 = deg_to_rad(lon);
    let bearing = deg_to_rad(bearing_deg);
    let delta = dist_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * delta.sin() * lat1.cos())
            .atan2(delta.cos() - lat1.sin() * lat2.sin());

    let lon2_deg = rad_to_deg(lon2);
    (((lon2_deg + 540.0) % 360.0) - 180.0, rad_to_deg(lat2))
}
