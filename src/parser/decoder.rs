//! Turns one raw feed line into exactly one typed record.
//!
//! Decoding is all-or-nothing: any mandatory field failure aborts the line
//! with a [`IngestError::LineDecode`] wrapping the cause, and the caller
//! discards it. The header line of a feed must be skipped by the caller and
//! is never passed here.

use crate::constants::*;
use crate::error::{IngestError, Result};
use crate::parser::fields;
use crate::parser::record::{
    CountryCodeRecord, DynamicPositionRecord, OceanConditionRecord, StaticVesselRecord,
};

pub struct LineDecoder;

impl LineDecoder {
    pub fn static_vessel(&self, line: &str) -> Result<StaticVesselRecord> {
        self.decode_static(line).map_err(|e| decode_error(line, e))
    }

    pub fn dynamic_position(&self, line: &str) -> Result<DynamicPositionRecord> {
        self.decode_dynamic(line).map_err(|e| decode_error(line, e))
    }

    pub fn country_code(&self, line: &str) -> Result<CountryCodeRecord> {
        self.decode_country(line).map_err(|e| decode_error(line, e))
    }

    pub fn ocean_condition(&self, line: &str) -> Result<OceanConditionRecord> {
        self.decode_ocean(line).map_err(|e| decode_error(line, e))
    }

    fn decode_static(&self, line: &str) -> Result<StaticVesselRecord> {
        let f = split_expecting(line, STATIC_VESSEL_FIELDS)?;
        Ok(StaticVesselRecord {
            mmsi: fields::parse_u32(f[0])?,
            imo: fields::parse_u32_or(f[1], 0),
            call_sign: fields::parse_text_opt(f[2]),
            ship_name: fields::parse_text_opt(f[3]),
            ship_type: fields::parse_u32_or(f[4], 0),
            to_bow: fields::parse_i32_or(f[5], 0),
            to_stern: fields::parse_i32_or(f[6], 0),
            to_starboard: fields::parse_i32_or(f[7], 0),
            to_port: fields::parse_i32_or(f[8], 0),
            eta: fields::parse_text_opt(f[9]),
            draught: fields::parse_f64_or(f[10], 0.0),
            destination: fields::parse_text_opt(f[11]),
            mother_ship_mmsi: fields::parse_u32_or(f[12], 0),
            timestamp: fields::parse_i64(f[13])?,
        })
    }

    fn decode_dynamic(&self, line: &str) -> Result<DynamicPositionRecord> {
        let f = split_expecting(line, DYNAMIC_POSITION_FIELDS)?;
        Ok(DynamicPositionRecord {
            mmsi: fields::parse_u32(f[0])?,
            nav_status: fields::parse_i32_or(f[1], UNDEFINED_NAV_STATUS),
            rate_of_turn: fields::parse_f64_or(f[2], UNDEFINED_RATE_OF_TURN),
            speed: fields::parse_f64(f[3])?,
            course: fields::parse_f64_or(f[4], UNDEFINED_COURSE),
            heading: fields::parse_i32_or(f[5], UNDEFINED_HEADING),
            longitude: fields::parse_f64(f[6])?,
            latitude: fields::parse_f64(f[7])?,
            timestamp: fields::parse_i64(f[8])?,
        })
    }

    fn decode_country(&self, line: &str) -> Result<CountryCodeRecord> {
        let f = split_expecting(line, COUNTRY_CODE_FIELDS)?;
        Ok(CountryCodeRecord {
            code: fields::parse_text(f[0])?,
            country: fields::parse_text(f[1])?,
        })
    }

    fn decode_ocean(&self, line: &str) -> Result<OceanConditionRecord> {
        let f = split_expecting(line, OCEAN_CONDITION_FIELDS)?;
        Ok(OceanConditionRecord {
            longitude: fields::parse_f64(f[0])?,
            latitude: fields::parse_f64(f[1])?,
            bottom_depth: fields::parse_f64_or(f[2], UNDEFINED_BOTTOM_DEPTH),
            tidal_effect: fields::parse_f64_or(f[3], UNDEFINED_TIDAL_EFFECT),
            sea_height: fields::parse_f64_or(f[4], UNDEFINED_SEA_HEIGHT),
            mean_wave_length: fields::parse_i32_or(f[5], UNDEFINED_MEAN_WAVE_LENGTH),
            timestamp: fields::parse_i64(f[6])?,
        })
    }
}

fn split_expecting(line: &str, expected: usize) -> Result<Vec<&str>> {
    let fields = fields::split_line(line);
    if fields.len() < expected {
        return Err(IngestError::FieldValidation {
            target: "field count",
        });
    }
    Ok(fields)
}

fn decode_error(line: &str, source: IngestError) -> IngestError {
    // Preserve what happened without re-wrapping an already wrapped error.
    match source {
        e @ IngestError::LineDecode { .. } => e,
        other => IngestError::LineDecode {
            line: line.to_string(),
            source: Box::new(other),
        },
    }
}
