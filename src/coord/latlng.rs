use crate::error::InvalidCoordinate;
use float_eq::float_eq;
use std::fmt;

/// Earth radius in kilometers, using the WGS84 authalic radius.
const EARTH_RADIUS_KM: f64 = 6371.007180918475_f64;

/// Epsilon of ~0.1mm in degrees, used for [`PartialEq`].
const EPSILON_DEG: f64 = 0.000000001;
const EPSILON_RAD: f64 = EPSILON_DEG * std::f64::consts::PI / 180.0;

/// A validated longitude/latitude pair.
///
/// The `Display` impl prints degrees (10 decimals at most); `Debug`
/// prints both degrees and radians.
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Builds a coordinate from degrees.
    ///
    /// # Errors
    ///
    /// [`InvalidCoordinate`] if either component isn't finite.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        Self::from_radians(lat.to_radians(), lng.to_radians())
    }

    /// Builds a coordinate from radians.
    ///
    /// # Errors
    ///
    /// [`InvalidCoordinate`] if either component isn't finite.
    pub fn from_radians(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() {
            return Err(InvalidCoordinate::new(lat, "infinite latitude"));
        }
        if !lng.is_finite() {
            return Err(InvalidCoordinate::new(lng, "infinite longitude"));
        }
        Ok(Self { lat, lng })
    }

    /// Latitude, in degrees.
    #[must_use]
    pub fn lat(self) -> f64 {
        self.lat.to_degrees()
    }

    /// Longitude, in degrees, normalized to `[-180, 180)`.
    #[must_use]
    pub fn lng(self) -> f64 {
        crate::coord::to_180(self.lng.to_degrees())
    }

    /// Latitude, in radians.
    #[must_use]
    pub const fn lat_radians(self) -> f64 {
        self.lat
    }

    /// Longitude, in radians.
    #[must_use]
    pub const fn lng_radians(self) -> f64 {
        self.lng
    }

    /// Great-circle distance to `other`, in radians, via the haversine
    /// formula.
    #[must_use]
    pub fn distance_rads(self, other: Self) -> f64 {
        let sin_lat = ((other.lat - self.lat) / 2.).sin();
        let sin_lng = ((other.lng - self.lng) / 2.).sin();
        let a = sin_lat.mul_add(
            sin_lat,
            self.lat.cos() * other.lat.cos() * sin_lng * sin_lng,
        );
        2. * a.sqrt().atan2((1. - a).sqrt())
    }

    /// Great-circle distance to `other`, in kilometers.
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        self.distance_rads(other) * EARTH_RADIUS_KM
    }
}

impl PartialEq for LatLng {
    fn eq(&self, other: &Self) -> bool {
        float_eq!(self.lat, other.lat, abs <= EPSILON_RAD)
            && float_eq!(self.lng, other.lng, abs <= EPSILON_RAD)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.10}, {:.10})", self.lat(), self.lng())
    }
}

impl fmt::Debug for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatLng")
            .field("lat_rad", &self.lat)
            .field("lat_deg", &self.lat())
            .field("lng_rad", &self.lng)
            .field("lng_deg", &self.lng())
            .finish()
    }
}
