//! Maps decoded feed records plus resolved auxiliary data (country name,
//! ship-type name, backing vessel identifier) into the persisted entities.

use crate::domain::{
    GeoPoint, MotionAttrs, OceanConditions, OceanMeasurements, Vessel, VesselAttrs,
    VesselTrajectoryPoint,
};
use crate::error::{IngestError, Result};
use crate::parser::record::{DynamicPositionRecord, OceanConditionRecord, StaticVesselRecord};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub fn vessel(
    record: StaticVesselRecord,
    ship_type: Option<String>,
    country: Option<String>,
) -> Vessel {
    Vessel::new(
        record.mmsi,
        VesselAttrs {
            imo: record.imo,
            call_sign: record.call_sign,
            name: record.ship_name,
            ship_type,
            draught: record.draught,
            destination: record.destination,
            country,
        },
    )
}

pub fn trajectory_point(
    record: &DynamicPositionRecord,
    vessel_id: Uuid,
) -> Result<VesselTrajectoryPoint> {
    let geo_point = GeoPoint::new(record.longitude, record.latitude)?;
    Ok(VesselTrajectoryPoint::new(
        vessel_id,
        geo_point,
        record.speed,
        timestamp(record.timestamp)?,
        MotionAttrs {
            course: record.course,
            heading: record.heading,
        },
    ))
}

pub fn ocean_conditions(record: &OceanConditionRecord) -> Result<OceanConditions> {
    let geo_point = GeoPoint::new(record.longitude, record.latitude)?;
    Ok(OceanConditions::new(
        geo_point,
        timestamp(record.timestamp)?,
        OceanMeasurements {
            bottom_depth: record.bottom_depth,
            tidal_effect: record.tidal_effect,
            sea_height: record.sea_height,
            mean_wave_length: record.mean_wave_length,
        },
    ))
}

fn timestamp(epoch_seconds: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(epoch_seconds, 0).ok_or(IngestError::FieldFormat {
        target: "timestamp",
        token: epoch_seconds.to_string(),
    })
}
