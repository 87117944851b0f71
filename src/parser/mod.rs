pub mod decoder;
pub mod fields;
pub mod record;

pub use decoder::LineDecoder;
pub use record::{
    CountryCodeRecord, DynamicPositionRecord, OceanConditionRecord, StaticVesselRecord,
};
