use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("missing value for mandatory {target} field")]
    FieldValidation { target: &'static str },

    #[error("malformed {target} value: '{token}'")]
    FieldFormat { target: &'static str, token: String },

    #[error("cannot decode line '{line}': {source}")]
    LineDecode {
        line: String,
        #[source]
        source: Box<IngestError>,
    },

    #[error("coordinates out of range: longitude {longitude}, latitude {latitude}")]
    InvalidCoordinates { longitude: f64, latitude: f64 },

    #[error("bulk insert failed: {0}")]
    Persistence(String),

    #[error("reference table load failed: {0}")]
    ReferenceData(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Per-line errors are recoverable: the pipeline discards the line and
    /// keeps going. Everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IngestError::FieldValidation { .. }
                | IngestError::FieldFormat { .. }
                | IngestError::LineDecode { .. }
                | IngestError::InvalidCoordinates { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
