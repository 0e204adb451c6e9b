//! Error types for dronify.
//!
//! This module defines all error types used throughout the dronify crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dronify operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Catalogue Errors ===
    /// Failed to read the catalogue file.
    #[error("failed to read catalogue at {path}: {source}")]
    CatalogueRead {
        /// Path to the catalogue file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the catalogue file.
    #[error("failed to parse catalogue at {path}: {source}")]
    CatalogueParse {
        /// Path to the catalogue file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The catalogue contents are invalid.
    #[error("invalid catalogue: {message}")]
    CatalogueValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// No record exists for the requested model key.
    #[error("no drone matching model key '{key}'")]
    ModelNotFound {
        /// The model key that was looked up.
        key: String,
    },

    // === Taxonomy Errors ===
    /// Failed to read the taxonomy file.
    #[error("failed to read taxonomy at {path}: {source}")]
    TaxonomyRead {
        /// Path to the taxonomy file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the taxonomy file.
    #[error("failed to parse taxonomy at {path}: {source}")]
    TaxonomyParse {
        /// Path to the taxonomy file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The taxonomy contents are invalid.
    #[error("invalid taxonomy: {message}")]
    TaxonomyValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for dronify operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a catalogue validation error.
    #[must_use]
    pub fn catalogue_validation(message: impl Into<String>) -> Self {
        Self::CatalogueValidation {
            message: message.into(),
        }
    }

    /// Create a taxonomy validation error.
    #[must_use]
    pub fn taxonomy_validation(message: impl Into<String>) -> Self {
        Self::TaxonomyValidation {
            message: message.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a model-not-found error.
    #[must_use]
    pub fn model_not_found(key: impl Into<String>) -> Self {
        Self::ModelNotFound { key: key.into() }
    }

    /// Check if this error means a model key had no record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ModelNotFound { .. })
    }
}
