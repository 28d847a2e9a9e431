use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a seeder run. Each variant maps to its own exit status.
#[derive(Debug, Error)]
pub enum SeederError {
    #[error("{0} is invalid command")]
    InvalidCommand(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot read seed directory {}: {source}", .path.display())]
    SeedDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read seed file {}: {source}", .path.display())]
    SeedFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode seed file {}: {source}", .path.display())]
    SeedDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to connect to MongoDB: {0:#}")]
    Connection(anyhow::Error),

    #[error("migration aborted at {collection}: {message}")]
    MigrationAborted {
        collection: String,
        message: String,
        /// Collections created before the abort. They are not rolled back.
        created: Vec<String>,
    },

    #[error("failed to drop {}", .failed.join(", "))]
    TeardownFailed { failed: Vec<String> },
}

impl SeederError {
    pub fn exit_code(&self) -> u8 {
        match self {
            SeederError::InvalidCommand(_) | SeederError::Config(_) => 2,
            SeederError::SeedDirectory { .. }
            | SeederError::SeedFile { .. }
            | SeederError::SeedDecode { .. } => 3,
            SeederError::Connection(_) => 4,
            SeederError::MigrationAborted { .. } => 5,
            SeederError::TeardownFailed { .. } => 6,
        }
    }
}

/// Failure of a single collection operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("collection {0} already exists")]
    AlreadyExists(String),

    #[error("{collection}: {message}")]
    Failed { collection: String, message: String },
}

impl CollectionError {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, CollectionError::AlreadyExists(_))
    }
}
