pub mod diagnostics;
pub mod messages;

use crate::config::error::ConfigError;
use thiserror::Error;

/// Failure of a single command invocation.
///
/// The `Display` form is exactly the line printed to stderr before the
/// process exits.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", messages::UNKNOWN_METALAKE)]
    UnknownMetalake,
    #[error("{}", messages::UNKNOWN_CATALOG)]
    UnknownCatalog,
    #[error("{}", messages::UNKNOWN_SCHEMA)]
    UnknownSchema,
    #[error("{}", messages::UNKNOWN_FILESET)]
    UnknownFileset,
    #[error("{} {qualified}", messages::UNKNOWN_TABLE)]
    UnknownTable { qualified: String },
    /// The lookup succeeded but there was nothing to show.
    #[error("{0}")]
    EmptyResult(&'static str),
    /// Any other failure, reported with the underlying message untouched.
    #[error("{0}")]
    Generic(String),
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CliError {
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic(message.into())
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn unknown_table(qualified: impl Into<String>) -> Self {
        Self::UnknownTable {
            qualified: qualified.into(),
        }
    }

    /// Process exit status for this failure. Usage mistakes share clap's code.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Generic(err.to_string())
    }
}
