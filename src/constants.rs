/// Default number of entities committed per bulk insert when the caller does
/// not choose a chunk size.
pub const DEFAULT_CHUNK_SIZE: usize = 3000;

// Positional field counts per feed layout.
pub const STATIC_VESSEL_FIELDS: usize = 14;
pub const DYNAMIC_POSITION_FIELDS: usize = 9;
pub const COUNTRY_CODE_FIELDS: usize = 2;
pub const OCEAN_CONDITION_FIELDS: usize = 7;

// AIS "no measurement" sentinels for dynamic position reports.
pub const UNDEFINED_NAV_STATUS: i32 = 15;
pub const UNDEFINED_RATE_OF_TURN: f64 = -128.0;
pub const UNDEFINED_COURSE: f64 = 360.0;
pub const UNDEFINED_HEADING: i32 = 511;

// Ocean-condition sentinels, as documented by the measurement provider.
pub const UNDEFINED_BOTTOM_DEPTH: f64 = -16384.0;
pub const UNDEFINED_TIDAL_EFFECT: f64 = -327.67;
pub const UNDEFINED_SEA_HEIGHT: f64 = -65.534;
pub const UNDEFINED_MEAN_WAVE_LENGTH: i32 = -32767;
