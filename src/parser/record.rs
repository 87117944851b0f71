//! Strongly-typed records produced from one feed line, before any
//! cross-entity resolution. Optional fields carry their documented sentinel
//! value rather than being absent.

use serde::Serialize;

/// One line of the static vessel feed.
#[derive(Debug, Clone, Serialize)]
pub struct StaticVesselRecord {
    pub mmsi: u32,
    pub imo: u32,
    pub call_sign: Option<String>,
    pub ship_name: Option<String>,
    pub ship_type: u32,
    pub to_bow: i32,
    pub to_stern: i32,
    pub to_starboard: i32,
    pub to_port: i32,
    pub eta: Option<String>,
    pub draught: f64,
    pub destination: Option<String>,
    pub mother_ship_mmsi: u32,
    pub timestamp: i64,
}

/// One line of the dynamic position feed.
#[derive(Debug, Clone, Serialize)]
pub struct DynamicPositionRecord {
    pub mmsi: u32,
    pub nav_status: i32,
    pub rate_of_turn: f64,
    pub speed: f64,
    pub course: f64,
    pub heading: i32,
    pub longitude: f64,
    pub latitude: f64,
    pub timestamp: i64,
}

/// One line of the MMSI country code table (MID prefix to country name).
#[derive(Debug, Clone, Serialize)]
pub struct CountryCodeRecord {
    pub code: String,
    pub country: String,
}

/// One line of an ocean conditions feed.
#[derive(Debug, Clone, Serialize)]
pub struct OceanConditionRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub bottom_depth: f64,
    pub tidal_effect: f64,
    pub sea_height: f64,
    pub mean_wave_length: i32,
    pub timestamp: i64,
}
