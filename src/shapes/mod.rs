//! Geometric shapes with spherical-aware semantics: rectangles and ellipses,
//! plain and spatio-temporal.

mod ellipse;
mod rectangle;
mod space_time_ellipse;
mod space_time_rectangle;

pub use ellipse::Ellipse;
pub use rectangle::Rectangle;
pub use space_time_ellipse::SpaceTimeEllipse;
pub use space_time_rectangle::SpaceTimeRectangle;
