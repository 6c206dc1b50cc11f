use common::error::diagnostics::DiagnosticMessage;
use reqwest::StatusCode;
use std::fmt::{self, Display};
use thiserror::Error;
use tracing::debug;

/// Which entity a "does not exist" answer refers to, ordered from the
/// outermost namespace inwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotFoundKind {
    Metalake,
    Catalog,
    Schema,
    Fileset,
    Table,
}

impl NotFoundKind {
    /// Classify the `type` field of a service error body.
    pub fn from_exception_type(exception: &str) -> Option<Self> {
        match exception {
            "NoSuchMetalakeException" => Some(NotFoundKind::Metalake),
            "NoSuchCatalogException" => Some(NotFoundKind::Catalog),
            "NoSuchSchemaException" => Some(NotFoundKind::Schema),
            "NoSuchFilesetException" => Some(NotFoundKind::Fileset),
            "NoSuchTableException" => Some(NotFoundKind::Table),
            _ => None,
        }
    }
}

impl Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotFoundKind::Metalake => "metalake",
            NotFoundKind::Catalog => "catalog",
            NotFoundKind::Schema => "schema",
            NotFoundKind::Fileset => "fileset",
            NotFoundKind::Table => "table",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("{kind} not found: {context}")]
    NotFound {
        kind: NotFoundKind,
        context: DiagnosticMessage,
    },
    #[error("connectivity error: {context}")]
    FailedToConnect { context: DiagnosticMessage },
    #[error("version mismatch: {context}")]
    VersionMismatch { context: DiagnosticMessage },
    #[error("invalid response: {context}")]
    InvalidResponse { context: DiagnosticMessage },
    #[error("unexpected response: {context}")]
    UnexpectedError { context: DiagnosticMessage },
}

impl CatalogClientError {
    #[track_caller]
    pub fn not_found(kind: NotFoundKind, message: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn failed_to_connect(message: impl Into<String>) -> Self {
        Self::FailedToConnect {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn version_mismatch(message: impl Into<String>) -> Self {
        Self::VersionMismatch {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    #[track_caller]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedError {
            context: DiagnosticMessage::new(message.into()),
        }
    }

    /// Set when the service reported a missing entity.
    pub fn not_found_kind(&self) -> Option<NotFoundKind> {
        match self {
            CatalogClientError::NotFound { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    fn context(&self) -> &DiagnosticMessage {
        match self {
            CatalogClientError::NotFound { context, .. }
            | CatalogClientError::FailedToConnect { context }
            | CatalogClientError::VersionMismatch { context }
            | CatalogClientError::InvalidResponse { context }
            | CatalogClientError::UnexpectedError { context } => context,
        }
    }

    /// The bare message, without the category prefix used by `Display`.
    pub fn message(&self) -> &str {
        self.context().message()
    }

    /// Where the error was raised, for debug logging.
    pub fn origin(&self) -> String {
        self.context().origin()
    }
}

impl From<reqwest::Error> for CatalogClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            CatalogClientError::failed_to_connect(err.to_string())
        } else if err.is_decode() {
            CatalogClientError::invalid_response(err.to_string())
        } else if let Some(status) = err.status() {
            CatalogClientError::unexpected(format!(
                "request failed with status code {}: {}",
                status.as_u16(),
                err
            ))
        } else {
            CatalogClientError::unexpected(format!(
                "Unexpected error sending catalog service request: {}",
                err
            ))
        }
    }
}

/// Error body returned by the catalog service.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub code: i32,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    #[track_caller]
    pub(crate) fn into_error(self, status: StatusCode) -> CatalogClientError {
        let message = self
            .message
            .unwrap_or_else(|| format!("request failed with status {status}"));

        match self
            .error_type
            .as_deref()
            .and_then(NotFoundKind::from_exception_type)
        {
            Some(kind) => CatalogClientError::not_found(kind, message),
            None => {
                debug!(
                    status = status.as_u16(),
                    code = self.code,
                    error_type = self.error_type.as_deref().unwrap_or("unknown"),
                    "catalog service returned an error"
                );
                CatalogClientError::unexpected(message)
            }
        }
    }
}
