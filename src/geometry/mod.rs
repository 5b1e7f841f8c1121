//! Spherical geometry kernel: haversine distance, destination points, and
//! great-circle plane arithmetic. Everything above this module (shapes,
//! trees) is built on the free functions and types exported here.

mod great_circle;
mod haversine;

pub use great_circle::GreatCircle;
pub use haversine::{destination, haversine, EARTH_RADIUS_KM};
