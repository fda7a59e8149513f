//! Rider location.
//!
//! A fix only gates the "near me" scope; distances themselves come with
//! each alert. The fix lives for the session and is never persisted.

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub lat: f64,
    pub lng: f64,
}

impl LocationFix {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Something that can be asked for the rider's position.
pub trait LocationProvider {
    fn locate(&self) -> Result<LocationFix, LocationError>;
}

/// Provider that always answers with the same fix (CLI `--lat/--lng`).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub LocationFix);

impl LocationProvider for FixedLocation {
    fn locate(&self) -> Result<LocationFix, LocationError> {
        let LocationFix { lat, lng } = self.0;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(LocationError::Unavailable(format!(
                "coordinates out of range: {lat}, {lng}"
            )));
        }
        Ok(self.0)
    }
}

/// Provider for platforms without location support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn locate(&self) -> Result<LocationFix, LocationError> {
        Err(LocationError::Unsupported)
    }
}
