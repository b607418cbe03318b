/// Error types for configuration loading
use std::path::PathBuf;

use thiserror::Error;

/// A color literal that could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color literal {input:?}, expected #rgb or #rrggbb")]
pub struct ColorError {
    pub input: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
