//! Crate-wide error type.
//!
//! Every fallible constructor in this crate (`Record`, `Rectangle`, `Ellipse`,
//! ...) returns `Result<Self, Error>` rather than panicking. Auto-corrected
//! conditions (a reversed date range) are *not* represented here - see
//! `crate::shapes` for the `log::warn!` call sites that handle those.

use thiserror::Error as ThisError;

/// Errors produced by this crate's constructors and fallible queries.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, ThisError)]
pub enum Error {
    /// A latitude outside `[-90, 90]` was supplied to a `Record`, `Rectangle`,
    /// or `Ellipse` constructor.
    #[error("latitude {value} is out of range [-90, 90]")]
    InvalidLatitude {
        /// The offending latitude value.
        value: f64,
    },

    /// `KDTree::query` was called on a tree holding no records. The source
    /// this crate is grounded on has no well-defined behaviour here (it
    /// computes a distance against a nonexistent result); this crate
    /// surfaces the precondition violation explicitly instead.
    #[error("query on an empty KDTree has no nearest neighbour")]
    EmptyTree,

    /// Reserved for `Temporal` implementations that type-erase distinct
    /// temporal kinds (e.g. mixing timestamped and pentad-numeric records).
    /// The monomorphic `Temporal` impls shipped by this crate cannot produce
    /// this variant; it exists for API parity with the documented error
    /// taxonomy this crate generalizes.
    #[error("temporal values being compared are not of the same kind")]
    MismatchedTemporalKind,

    /// Reserved for a dynamically-typed front end over `Rectangle::intersects`.
    /// The statically-typed signature used in this crate makes this
    /// unreachable internally.
    #[error("expected a Rectangle argument")]
    NotARectangle,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
