//! Static reference tables: country-by-MMSI-prefix and ship-type-by-code.
//!
//! Both tables ship embedded in the binary and are loaded exactly once via
//! [`init`], which must run before any ingestion; a malformed table is fatal
//! at startup. Lookups afterwards are plain read-only map hits.

use crate::error::{IngestError, Result};
use crate::parser::{fields, LineDecoder};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use tracing::info;

const COUNTRY_CODES_CSV: &str = include_str!("../data/mmsi_country_codes.csv");
const SHIP_TYPES_CSV: &str = include_str!("../data/ship_types.csv");

static COUNTRY_BY_MID: OnceCell<HashMap<String, String>> = OnceCell::new();
static SHIP_TYPE_BY_CODE: OnceCell<HashMap<u32, String>> = OnceCell::new();

/// Loads both tables. Idempotent, so concurrent runs can each call it.
pub fn init() -> Result<()> {
    let countries = COUNTRY_BY_MID.get_or_try_init(load_country_codes)?;
    let ship_types = SHIP_TYPE_BY_CODE.get_or_try_init(load_ship_types)?;
    info!(
        countries = countries.len(),
        ship_types = ship_types.len(),
        "reference tables loaded"
    );
    Ok(())
}

/// Flag country for an MMSI, keyed by its first three digits (the MID
/// prefix). An MMSI shorter than three digits resolves to nothing.
pub fn country_by_mmsi(mmsi: u32) -> Option<&'static str> {
    let digits = mmsi.to_string();
    if digits.len() < 3 {
        return None;
    }
    COUNTRY_BY_MID
        .get()?
        .get(&digits[..3])
        .map(String::as_str)
}

/// Human-readable name for an AIS ship-type code.
pub fn ship_type_name(code: u32) -> Option<&'static str> {
    SHIP_TYPE_BY_CODE.get()?.get(&code).map(String::as_str)
}

fn load_country_codes() -> Result<HashMap<String, String>> {
    let decoder = LineDecoder;
    let mut table = HashMap::new();
    for line in COUNTRY_CODES_CSV.lines().skip(1) {
        let record = decoder
            .country_code(line)
            .map_err(|e| IngestError::ReferenceData(format!("country code table: {e}")))?;
        table.insert(record.code, record.country);
    }
    Ok(table)
}

fn load_ship_types() -> Result<HashMap<u32, String>> {
    let mut table = HashMap::new();
    for line in SHIP_TYPES_CSV.lines().skip(1) {
        let f = fields::split_line(line);
        if f.len() != 2 {
            return Err(IngestError::ReferenceData(format!(
                "ship type table: bad row '{line}'"
            )));
        }
        let code = fields::parse_u32(f[0])
            .map_err(|e| IngestError::ReferenceData(format!("ship type table: {e}")))?;
        let name = fields::parse_text(f[1])
            .map_err(|e| IngestError::ReferenceData(format!("ship type table: {e}")))?;
        table.insert(code, name);
    }
    Ok(table)
}
