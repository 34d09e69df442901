//! Error types for power operations and configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::operation::Operation;

/// The two ways a power operation can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PowerError {
    /// There is no known method for this operation on this platform.
    #[error("{operation} is not supported on {platform}")]
    Unsupported { operation: Operation, platform: String },

    /// The platform is supported but every candidate method failed.
    #[error("no working method to {operation} ({attempts} attempts failed)")]
    NoWorkingMethod { operation: Operation, attempts: usize },
}

pub type Result<T> = std::result::Result<T, PowerError>;

/// Terminal result of a power operation, flattened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NoWorkingMethod,
    UnsupportedOperation,
}

impl PowerError {
    pub fn operation(&self) -> Operation {
        match self {
            PowerError::Unsupported { operation, .. }
            | PowerError::NoWorkingMethod { operation, .. } => *operation,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            PowerError::Unsupported { .. } => Outcome::UnsupportedOperation,
            PowerError::NoWorkingMethod { .. } => Outcome::NoWorkingMethod,
        }
    }
}

impl<T> From<&Result<T>> for Outcome {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Outcome::Success,
            Err(e) => e.outcome(),
        }
    }
}

/// Errors raised while loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine config directory: {0}")]
    NoConfigDir(String),

    /// An escalation prefix or extra command with no program in it.
    #[error("Invalid command in config: {0:?}")]
    InvalidCommand(String),
}
