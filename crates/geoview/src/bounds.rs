//! Geographic bounding boxes in WGS84 decimal degrees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    #[error("{edge} bound is not a finite number")]
    NonFinite { edge: &'static str },

    #[error("{edge} latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange { edge: &'static str, value: f64 },

    #[error("{edge} longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange { edge: &'static str, value: f64 },

    #[error("south latitude {south} must not be greater than north latitude {north}")]
    Inverted { north: f64, south: f64 },
}

/// Plain wire shape of a bounding box. Carries no invariants; convert with
/// `BoundingBox::try_from` to validate.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBoxFields {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Rectangular extent bounded by north/south latitudes and east/west longitudes.
///
/// Always satisfies `north >= south` with every edge inside the WGS84 range.
/// Antimeridian-crossing extents are not modelled: `west > east` is accepted
/// as-is and passed through untouched.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundingBoxFields", into = "BoundingBoxFields")]
pub struct BoundingBox {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, BoundsError> {
        check_finite("north", north)?;
        check_finite("south", south)?;
        check_finite("east", east)?;
        check_finite("west", west)?;
        check_latitude("north", north)?;
        check_latitude("south", south)?;
        check_longitude("east", east)?;
        check_longitude("west", west)?;
        if south > north {
            return Err(BoundsError::Inverted { north, south });
        }
        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Builds a box from a raw widget extent, clamping edges into range.
    ///
    /// Map widgets report latitudes and longitudes past the WGS84 limits when
    /// zoomed far out or panned across world copies, so out-of-range edges are
    /// clamped rather than rejected. Non-finite or inverted extents still fail.
    pub fn from_extent(north: f64, south: f64, east: f64, west: f64) -> Result<Self, BoundsError> {
        check_finite("north", north)?;
        check_finite("south", south)?;
        check_finite("east", east)?;
        check_finite("west", west)?;
        Self::new(
            north.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            south.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            east.clamp(-MAX_LONGITUDE, MAX_LONGITUDE),
            west.clamp(-MAX_LONGITUDE, MAX_LONGITUDE),
        )
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    /// Center as `(lat, lon)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    pub fn span_lat(&self) -> f64 {
        self.north - self.south
    }

    pub fn span_lon(&self) -> f64 {
        (self.east - self.west).abs()
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south
            && lat <= self.north
            && lon >= self.west.min(self.east)
            && lon <= self.west.max(self.east)
    }
}

impl TryFrom<BoundingBoxFields> for BoundingBox {
    type Error = BoundsError;

    fn try_from(f: BoundingBoxFields) -> Result<Self, Self::Error> {
        Self::new(f.north, f.south, f.east, f.west)
    }
}

impl From<BoundingBox> for BoundingBoxFields {
    fn from(b: BoundingBox) -> Self {
        Self {
            north: b.north,
            south: b.south,
            east: b.east,
            west: b.west,
        }
    }
}

fn check_finite(edge: &'static str, value: f64) -> Result<(), BoundsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BoundsError::NonFinite { edge })
    }
}

fn check_latitude(edge: &'static str, value: f64) -> Result<(), BoundsError> {
    if (-MAX_LATITUDE..=MAX_LATITUDE).contains(&value) {
        Ok(())
    } else {
        Err(BoundsError::LatitudeOutOfRange { edge, value })
    }
}

fn check_longitude(edge: &'static str, value: f64) -> Result<(), BoundsError> {
    if (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&value) {
        Ok(())
    } else {
        Err(BoundsError::LongitudeOutOfRange { edge, value })
    }
}
