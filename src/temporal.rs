//! Generic ordered-scalar time axis used by [`SpaceTimeRecord`](crate::record::SpaceTimeRecord),
//! [`SpaceTimeRectangle`](crate::shapes::SpaceTimeRectangle),
//! [`SpaceTimeEllipse`](crate::shapes::SpaceTimeEllipse), and [`OctTree`](crate::octtree::OctTree).
//!
//! The source this crate generalizes documents that its `datetime` values
//! may be a real `datetime`/`timedelta` pair, or any numeric stand-in
//! (pentad, Julian day, Unix timestamp) as long as usage is consistent
//! across a single tree. `Temporal` captures exactly the operations that
//! code actually needs: ordering, the ability to compute a span between two
//! values, to shift a value by a span, and to halve a span (for midpoint /
//! centre-datetime computation).

use chrono::{DateTime, Duration, Utc};
use std::ops::{Add, Sub};

/// A difference between two [`Temporal`] values, supporting the halving
/// needed to compute a centre point between a `start` and `end`.
pub trait TemporalSpan: Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> {
    /// Halve the span (used for `start + (end - start) / 2`).
    fn halved(self) -> Self;

    /// The "zero" span, used as the default when construction needs one.
    fn zero() -> Self;
}

/// An orderable scalar usable as the temporal axis of a spatio-temporal
/// record, rectangle, ellipse, or tree.
pub trait Temporal: Copy + PartialOrd {
    /// The type of a difference between two `Temporal` values.
    type Span: TemporalSpan;

    /// `self - other`, as a span.
    fn span_since(self, other: Self) -> Self::Span;

    /// `self + span`.
    fn add_span(self, span: Self::Span) -> Self;

    /// `self - span`.
    fn sub_span(self, span: Self::Span) -> Self;
}

impl TemporalSpan for Duration {
    fn halved(self) -> Self {
        self / 2
    }

    fn zero() -> Self {
        Duration::zero()
    }
}

impl Temporal for DateTime<Utc> {
    type Span = Duration;

    fn span_since(self, other: Self) -> Duration {
        self - other
    }

    fn add_span(self, span: Duration) -> Self {
        self + span
    }

    fn sub_span(self, span: Duration) -> Self {
        self - span
    }
}

impl TemporalSpan for i64 {
    fn halved(self) -> Self {
        self / 2
    }

    fn zero() -> Self {
        0
    }
}

/// Numeric stand-in for `datetime` (pentad, Julian day, Unix timestamp, ...).
impl Temporal for i64 {
    type Span = i64;

    fn span_since(self, other: Self) -> i64 {
        self - other
    }

    fn add_span(self, span: i64) -> Self {
        self + span
    }

    fn sub_span(self, span: i64) -> Self {
        self - span
    }
}

/// Midpoint between `start` and `end`: `start + (end - start) / 2`.
pub fn midpoint<T: Temporal>(start: T, end: T) -> T {
    start.add_span(end.span_since(start).halved())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn i64_midpoint() {
        assert_eq!(midpoint(10_i64, 20_i64), 15);
    }

    #[test]
    fn datetime_midpoint() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 1, 3, 0, 0, 0).unwrap();
        assert_eq!(midpoint(start, end), Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap());
    }
}
