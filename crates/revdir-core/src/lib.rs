pub mod app_config;
pub mod config;
pub mod csv_out;
pub mod record;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use csv_out::{write_records, write_records_to_path};
pub use record::ListingRecord;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error writing output: {0}")]
    Io(#[from] std::io::Error),
}
