pub mod app_config;
pub mod config;
pub mod location;
pub mod probe;
pub mod shift;
pub mod state;
pub mod tabular;
pub mod validate;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use location::Location;
pub use probe::{load_probe_config, ProbeConfig};
pub use shift::{AuState, Shift, ShiftCandidate, ShiftSet};
pub use state::{state_from_address, state_from_postcode, suburb_from_address};
pub use tabular::{encode_csv, Cell, TabularRecord};
pub use validate::{retain_complete, validate_shifts, ValidationError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read probe config {path}: {source}")]
    ProbeFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse probe config: {0}")]
    ProbeFileParse(#[from] serde_yaml::Error),

    #[error("probe config validation failed: {0}")]
    Validation(String),
}

/// Errors raised while rendering a validated shift set to its output formats.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
