use thiserror::Error;

use crate::package::PackageId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Package database {location} does not exist")]
    DatabaseMissing { location: String },

    #[error("Failed to read package database {location}")]
    DatabaseReadError {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Package database {location} is corrupt: {source}")]
    DatabaseCorrupt {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write package database {location}")]
    DatabaseWriteError {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("No {reference} package database is available on this system")]
    NullDatabase { reference: String },

    #[error("Package not found: {0}")]
    PackageNotFound(PackageId),

    #[error("Invalid database name {0:?}: must be non-empty and contain no path separators")]
    InvalidBackendName(String),
}

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
