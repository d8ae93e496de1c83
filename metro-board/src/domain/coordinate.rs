//! Geographic coordinates.

use std::fmt;

/// Error returned when parsing an invalid coordinate string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair.
///
/// The storage and wire form is `"lat,lon"`: the string kept in the
/// selection store and sent (percent-encoded) to the nearest-station
/// endpoint.
///
/// # Examples
///
/// ```
/// use metro_board::domain::Coordinate;
///
/// let c = Coordinate::parse("25.046255,121.517532").unwrap();
/// assert_eq!(c.latitude(), 25.046255);
/// assert_eq!(c.to_string(), "25.046255,121.517532");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from raw degrees.
    ///
    /// Latitude must be within [-90, 90], longitude within [-180, 180],
    /// and neither may be NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude out of range",
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude out of range",
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse the `"lat,lon"` storage form.
    pub fn parse(s: &str) -> Result<Self, InvalidCoordinate> {
        let (lat, lon) = s.split_once(',').ok_or(InvalidCoordinate {
            reason: "expected \"lat,lon\"",
        })?;
        let lat: f64 = lat.trim().parse().map_err(|_| InvalidCoordinate {
            reason: "latitude is not a number",
        })?;
        let lon: f64 = lon.trim().parse().map_err(|_| InvalidCoordinate {
            reason: "longitude is not a number",
        })?;
        Self::new(lat, lon)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
