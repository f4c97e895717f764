//! Geographic location of a chart.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;

/// Observer location: latitude north-positive, longitude east-positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, VedicError> {
        let loc = Self {
            latitude_deg,
            longitude_deg,
        };
        loc.validate()?;
        Ok(loc)
    }

    pub fn validate(&self) -> Result<(), VedicError> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(VedicError::InvalidLocation("latitude must be within ±90°"));
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(VedicError::InvalidLocation("longitude must be within ±180°"));
        }
        Ok(())
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_delhi() {
        assert!(GeoLocation::new(28.6139, 77.2090).is_ok());
    }

    #[test]
    fn rejects_bad_latitude() {
        assert!(matches!(
            GeoLocation::new(91.0, 0.0),
            Err(VedicError::InvalidLocation(_))
        ));
    }

    #[test]
    fn rejects_nan_longitude() {
        assert!(GeoLocation::new(0.0, f64::NAN).is_err());
    }
}
