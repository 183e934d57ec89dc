//! Geographic value types and great-circle distance.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Earth radius used by distance calculations, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a validated point.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidLatitude`] or
    /// [`TaskDomainError::InvalidLongitude`] when a coordinate is not finite
    /// or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TaskDomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(TaskDomainError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(TaskDomainError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in miles.
    ///
    /// Uses the spherical law of cosines with the same operand order as the
    /// `PostgreSQL` search statement so both adapters rank identically. The
    /// cosine is clamped to [-1, 1] before `acos`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "great-circle distance is floating-point trigonometry"
    )]
    pub fn distance_miles(self, other: Self) -> f64 {
        let origin_latitude = self.latitude.to_radians();
        let target_latitude = other.latitude.to_radians();
        let longitude_delta = other.longitude.to_radians() - self.longitude.to_radians();
        let cosine = origin_latitude.cos() * target_latitude.cos() * longitude_delta.cos()
            + origin_latitude.sin() * target_latitude.sin();
        EARTH_RADIUS_MILES * cosine.clamp(-1.0, 1.0).acos()
    }
}

/// Exclusive distance threshold for geo-radius search, in miles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchRadius(f64);

impl SearchRadius {
    /// Creates a validated radius.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidRadius`] unless `miles` is finite
    /// and greater than zero.
    pub fn from_miles(miles: f64) -> Result<Self, TaskDomainError> {
        if !miles.is_finite() || miles <= 0.0 {
            return Err(TaskDomainError::InvalidRadius(miles));
        }
        Ok(Self(miles))
    }

    /// Returns the radius in miles.
    #[must_use]
    pub const fn miles(self) -> f64 {
        self.0
    }

    /// Returns `true` when `distance_miles` falls strictly inside the radius.
    ///
    /// A distance equal to the radius is outside.
    #[must_use]
    pub fn admits(self, distance_miles: f64) -> bool {
        distance_miles < self.0
    }
}
