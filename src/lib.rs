//! Spherical spatial and spatio-temporal indexing over Earth-surface lon/lat
//! coordinates.
//!
//! This crate provides point-indexing trees (`QuadTree`, a temporal `OctTree`,
//! and a balanced `KDTree`) plus the spherical-geometry primitives they're
//! built on (haversine distance, destination points, great-circle plane
//! arithmetic), all correct across the ±180° antimeridian.
//!
//! ```
//! use quadtree::{QuadTree, Record, Rectangle};
//!
//! let boundary = Rectangle::from_centre(10.0, 4.0, 20.0, 8.0).unwrap();
//! let mut tree: QuadTree = QuadTree::new(boundary, 4, None);
//! tree.insert(Record::new(12.8, 2.1).unwrap());
//!
//! let query = Rectangle::from_centre(12.5, 2.5, 1.0, 1.0).unwrap();
//! assert_eq!(tree.query(&query).len(), 1);
//! ```
//!
//! Fallible construction returns [`Error`]; the crate never panics on bad
//! input. Diagnostics go through the `log` facade - plug in any logger
//! implementation to see them.

mod error;
mod geometry;
mod kdtree;
mod neighbours;
mod octtree;
mod quadtree;
mod record;
mod shapes;
mod temporal;

pub use error::{Error, Result};
pub use geometry::{destination, haversine, GreatCircle, EARTH_RADIUS_KM};
pub use kdtree::KDTree;
pub use neighbours::find_nearest;
pub use octtree::OctTree;
pub use quadtree::QuadTree;
pub use record::{Record, SpaceTimeRecord};
pub use shapes::{Ellipse, Rectangle, SpaceTimeEllipse, SpaceTimeRectangle};
pub use temporal::{midpoint, Temporal, TemporalSpan};
