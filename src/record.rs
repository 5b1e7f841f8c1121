//! Point records stored in the trees.
//!
//! Rather than a trait implemented by arbitrary caller types, this crate
//! uses a single concrete `Record<P>` generic over a payload `P`: a fixed
//! tuple of lon/lat/datetime/uid plus an open caller-supplied field.

use crate::error::{Error, Result};
use crate::geometry::haversine;
use crate::temporal::Temporal;

/// Wrap a longitude into `[-180, 180]`.
pub(crate) fn wrap_lon(lon: f64) -> f64 {
    ((lon + 540.0) % 360.0) - 180.0
}

fn validate_lat(lat: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(Error::InvalidLatitude { value: lat });
    }
    Ok(())
}

/// A point on the Earth's surface, optionally timestamped and identified.
///
/// `P` is an open-ended payload carried alongside the required fields; two
/// records compare equal without regard to their payload (see [`PartialEq`]
/// below).
#[derive(Debug, Clone)]
pub struct Record<P = ()> {
    /// Longitude, canonicalized to `[-180, 180]`.
    pub lon: f64,
    /// Latitude, in `[-90, 90]`.
    pub lat: f64,
    /// Optional timestamp, as any `Temporal` scalar.
    pub datetime: Option<f64>,
    /// Optional unique identifier; when both sides of a comparison have one,
    /// equality is decided by `uid` alone.
    pub uid: Option<String>,
    /// Caller-defined payload, ignored by equality.
    pub data: P,
}

impl Record<()> {
    /// Construct a `Record` with no payload.
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        Self::with_data(lon, lat, ())
    }
}

impl<P> Record<P> {
    /// Construct a `Record` carrying `data` as its payload.
    pub fn with_data(lon: f64, lat: f64, data: P) -> Result<Self> {
        validate_lat(lat)?;
        Ok(Self {
            lon: wrap_lon(lon),
            lat,
            datetime: None,
            uid: None,
            data,
        })
    }

    /// Attach a datetime (as a plain `f64` scalar; see [`SpaceTimeRecord`]
    /// for a `Temporal`-generic timestamped record type).
    pub fn with_datetime(mut self, datetime: f64) -> Self {
        self.datetime = Some(datetime);
        self
    }

    /// Attach a unique identifier.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Haversine distance, in km, to `other`.
    pub fn distance(&self, other: &Record<P>) -> f64 {
        haversine(self.lon, self.lat, other.lon, other.lat)
    }
}

impl<P> PartialEq for Record<P> {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (&self.uid, &other.uid) {
            return a == b;
        }
        self.lon == other.lon
            && self.lat == other.lat
            && self.datetime == other.datetime
            && self.uid == other.uid
    }
}

/// A point on the Earth's surface with a mandatory, generically-typed
/// timestamp, for use with [`OctTree`](crate::octtree::OctTree) and the
/// space-time shapes.
#[derive(Debug, Clone)]
pub struct SpaceTimeRecord<T, P = ()> {
    /// Longitude, canonicalized to `[-180, 180]`.
    pub lon: f64,
    /// Latitude, in `[-90, 90]`.
    pub lat: f64,
    /// Mandatory timestamp.
    pub datetime: T,
    /// Optional unique identifier.
    pub uid: Option<String>,
    /// Caller-defined payload, ignored by equality.
    pub data: P,
}

impl<T: Temporal> SpaceTimeRecord<T, ()> {
    /// Construct a `SpaceTimeRecord` with no payload.
    pub fn new(lon: f64, lat: f64, datetime: T) -> Result<Self> {
        Self::with_data(lon, lat, datetime, ())
    }
}

impl<T: Temporal, P> SpaceTimeRecord<T, P> {
    /// Construct a `SpaceTimeRecord` carrying `data` as its payload.
    pub fn with_data(lon: f64, lat: f64, datetime: T, data: P) -> Result<Self> {
        validate_lat(lat)?;
        Ok(Self {
            lon: wrap_lon(lon),
            lat,
            datetime,
            uid: None,
            data,
        })
    }

    /// Attach a unique identifier.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Haversine distance, in km, to `other` (ignores the temporal axis).
    pub fn distance(&self, other: &SpaceTimeRecord<T, P>) -> f64 {
        haversine(self.lon, self.lat, other.lon, other.lat)
    }
}

impl<T: Temporal, P> PartialEq for SpaceTimeRecord<T, P> {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (&self.uid, &other.uid) {
            return a == b;
        }
        self.lon == other.lon
            && self.lat == other.lat
            && self.datetime == other.datetime
            && self.uid == other.uid
    }
}
