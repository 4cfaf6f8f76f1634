use crate::time::Time;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for invalid operations on a model.
#[derive(Error, Debug)]
pub enum BmiError {
    #[error("Could not read configuration file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse configuration file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
    #[error("Configuration is missing required key '{0}'")]
    MissingConfigKey(String),
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
    #[error("No values were provided for {0}")]
    EmptyBuffer(String),
    #[error("Unknown variable {0}")]
    UnknownVariable(String),
    #[error("Cannot set value of var {0}")]
    UnsupportedVariable(String),
    #[error("Model has not been initialized. Call initialize before using the model")]
    NotInitialized,
    #[error("No time converter is available to convert timestep {0} into a unix time")]
    TimeConversionUnavailable(Time),
    #[error("Time conversion failed: {0}")]
    TimeConversion(String),
    #[error("Model has no end time because it steps without bound")]
    NoEndTime,
}

/// Convenience type for `Result<T, BmiError>`.
pub type BmiResult<T> = Result<T, BmiError>;
