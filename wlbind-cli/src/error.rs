//! Error types for the CLI.

use std::path::PathBuf;
use thiserror::Error;
use wlbind_gen::GenError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error loading the schema tree.
    #[error("Failed to read schema: {0}")]
    Read(#[from] ReadError),

    /// Error building the model or emitting bindings.
    #[error("Failed to generate bindings: {0}")]
    Generate(#[from] GenError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// An existing artifact does not match what would be generated.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The artifact to check does not exist.
    #[error("Artifact not found: {}", .0.display())]
    MissingArtifact(PathBuf),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Validation(_) => 2,
            _ => 1,
        }
    }
}

/// Error loading a schema tree.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Schema file does not exist.
    #[error("Schema file not found: {path}")]
    NotFound { path: PathBuf },

    /// The file is not a valid JSON document tree.
    #[error("Invalid schema tree in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    /// IO error reading the schema.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the temporary file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to move the finished file into place.
    #[error("Failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Refused to replace an existing file.
    #[error("File already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },
}

impl ReadError {
    /// Create an invalid JSON error.
    pub fn invalid_json(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidJson {
            path,
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Validation("stale".to_string()).exit_code(), 2);
        assert_eq!(CliError::MissingArtifact(PathBuf::from("gen/wayland_glue.rs")).exit_code(), 1);
        assert_eq!(
            CliError::from(GenError::malformed("demo", "missing name")).exit_code(),
            1
        );
    }

    #[test]
    fn test_messages_carry_context() {
        let err = CliError::from(ConfigError::invalid_value("output.indent", "expected spaces2, spaces4 or tabs"));
        assert_eq!(
            err.to_string(),
            "Failed to load configuration: Invalid configuration value for 'output.indent': expected spaces2, spaces4 or tabs"
        );

        let err = CliError::from(GenError::malformed("demo.interface[0]", "missing required attribute 'name'"));
        assert!(err.to_string().starts_with("Failed to generate bindings: Malformed schema at demo.interface[0]"));

        let err = CliError::MissingArtifact(PathBuf::from("gen/wayland_glue.rs"));
        assert_eq!(err.to_string(), "Artifact not found: gen/wayland_glue.rs");
    }
}
