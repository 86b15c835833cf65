mod conversions;

use thiserror::Error;

use crate::storage::ObjectLocation;

#[derive(Error, Debug)]
pub enum JobError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Source unavailable at {location}: {source}")]
    SourceUnavailable {
        location: ObjectLocation,
        #[source]
        source: StorageError,
    },

    #[error("Destination unavailable at {location}: {source}")]
    DestinationUnavailable {
        location: ObjectLocation,
        #[source]
        source: StorageError,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Loading error: {0}")]
    Loading(String),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid CSV record at line {line}: {message}")]
    Record { line: u64, message: String },

    #[error("invalid CSV: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object not found")]
    NotFound,

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read object body: {0}")]
    Body(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid object location '{input}': {reason}")]
pub struct LocationParseError {
    pub input: String,
    pub reason: &'static str,
}
