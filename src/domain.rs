//! Persisted entity shapes. Backing identifiers are assigned by the storage
//! layer, so every entity starts life with `id: None`.
//!
//! Constructors take the mandatory fields directly plus an options struct
//! for everything optional; coordinate ranges are validated here, at the
//! entity-construction boundary, not at raw parse time.

use crate::error::{IngestError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A WGS84 point. Construction fails outside [-180, 180] x [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(IngestError::InvalidCoordinates {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

/// A vessel, uniquely identified by its MMSI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    pub id: Option<Uuid>,
    pub mmsi: u32,
    pub imo: u32,
    pub call_sign: Option<String>,
    pub name: Option<String>,
    /// Resolved ship-type name, not the raw AIS code.
    pub ship_type: Option<String>,
    pub draught: f64,
    pub destination: Option<String>,
    /// Flag country resolved from the MMSI's MID prefix.
    pub country: Option<String>,
}

/// Optional vessel attributes, filled from the static feed and the
/// reference tables.
#[derive(Debug, Clone, Default)]
pub struct VesselAttrs {
    pub imo: u32,
    pub call_sign: Option<String>,
    pub name: Option<String>,
    pub ship_type: Option<String>,
    pub draught: f64,
    pub destination: Option<String>,
    pub country: Option<String>,
}

impl Vessel {
    pub fn new(mmsi: u32, attrs: VesselAttrs) -> Self {
        Self {
            id: None,
            mmsi,
            imo: attrs.imo,
            call_sign: attrs.call_sign,
            name: attrs.name,
            ship_type: attrs.ship_type,
            draught: attrs.draught,
            destination: attrs.destination,
            country: attrs.country,
        }
    }
}

/// One reported position of a stored vessel. References the vessel by its
/// backing identifier, never by MMSI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselTrajectoryPoint {
    pub id: Option<Uuid>,
    pub vessel_id: Uuid,
    pub geo_point: GeoPoint,
    pub speed: f64,
    pub course: f64,
    pub heading: i32,
    pub timestamp: DateTime<Utc>,
}

/// Motion attributes of a position report; defaults are the AIS
/// "undefined" sentinels.
#[derive(Debug, Clone)]
pub struct MotionAttrs {
    pub course: f64,
    pub heading: i32,
}

impl Default for MotionAttrs {
    fn default() -> Self {
        Self {
            course: crate::constants::UNDEFINED_COURSE,
            heading: crate::constants::UNDEFINED_HEADING,
        }
    }
}

impl VesselTrajectoryPoint {
    pub fn new(
        vessel_id: Uuid,
        geo_point: GeoPoint,
        speed: f64,
        timestamp: DateTime<Utc>,
        motion: MotionAttrs,
    ) -> Self {
        Self {
            id: None,
            vessel_id,
            geo_point,
            speed,
            course: motion.course,
            heading: motion.heading,
            timestamp,
        }
    }
}

/// A world port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub id: Option<Uuid>,
    pub name: String,
    pub country: String,
    pub geo_point: GeoPoint,
}

impl Port {
    pub fn new(name: String, country: String, geo_point: GeoPoint) -> Self {
        Self {
            id: None,
            name,
            country,
            geo_point,
        }
    }
}

/// Ocean condition measurements at one point and time. Measurements the
/// provider did not take carry their documented sentinel value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OceanConditions {
    pub id: Option<Uuid>,
    pub geo_point: GeoPoint,
    pub bottom_depth: f64,
    pub tidal_effect: f64,
    pub sea_height: f64,
    pub mean_wave_length: i32,
    pub timestamp: DateTime<Utc>,
}

/// Optional ocean measurements; defaults are the provider's sentinels.
#[derive(Debug, Clone)]
pub struct OceanMeasurements {
    pub bottom_depth: f64,
    pub tidal_effect: f64,
    pub sea_height: f64,
    pub mean_wave_length: i32,
}

impl Default for OceanMeasurements {
    fn default() -> Self {
        Self {
            bottom_depth: crate::constants::UNDEFINED_BOTTOM_DEPTH,
            tidal_effect: crate::constants::UNDEFINED_TIDAL_EFFECT,
            sea_height: crate::constants::UNDEFINED_SEA_HEIGHT,
            mean_wave_length: crate::constants::UNDEFINED_MEAN_WAVE_LENGTH,
        }
    }
}

impl OceanConditions {
    pub fn new(
        geo_point: GeoPoint,
        timestamp: DateTime<Utc>,
        measurements: OceanMeasurements,
    ) -> Self {
        Self {
            id: None,
            geo_point,
            bottom_depth: measurements.bottom_depth,
            tidal_effect: measurements.tidal_effect,
            sea_height: measurements.sea_height,
            mean_wave_length: measurements.mean_wave_length,
            timestamp,
        }
    }
}
