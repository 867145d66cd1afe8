//! Error types for the Incapsula client.
//!
//! # Design
//! Every failure mode is a distinct `ApiError` variant with structured
//! fields, and every rendered message embeds the raw context an operator
//! needs (status code, raw body, underlying cause). The message prefixes are
//! stable per operation, e.g. `Error status code 406 from Incapsula service
//! when adding Role`, so existing callers that match on text keep working
//! while new callers can use [`ApiError::kind`].

use crate::http::HttpMethod;

/// Boxed cause returned by a [`crate::Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not be prepared locally; nothing was sent.
    Request,
    /// No response was received (connection, DNS, TLS, timeout).
    Transport,
    /// The response status was not 200.
    Status,
    /// The response body did not decode into the expected shape.
    Decode,
    /// HTTP 200 with a well-formed envelope that reports failure.
    Semantic,
}

/// Errors returned by entity operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to JSON marshal {entity}: {source}")]
    Serialization {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error preparing HTTP {method} for {action}: {reason}")]
    InvalidRequest {
        method: HttpMethod,
        action: String,
        reason: String,
    },

    #[error("Error from Incapsula service when {action}: {source}")]
    Transport {
        action: String,
        #[source]
        source: BoxError,
    },

    #[error("Error status code {status} from Incapsula service when {action}: {body}")]
    Status {
        action: String,
        status: u16,
        body: String,
    },

    #[error("Error parsing {subject}: {source}\nresponse: {body}")]
    Decode {
        subject: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error(
        "Error deleting {subject}: application code {}, message: {message}\nresponse: {body}",
        .code.map_or_else(|| "missing".to_string(), |c| c.to_string())
    )]
    Rejected {
        subject: String,
        code: Option<i64>,
        message: String,
        body: String,
    },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Serialization { .. } | ApiError::InvalidRequest { .. } => ErrorKind::Request,
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::Status { .. } => ErrorKind::Status,
            ApiError::Decode { .. } => ErrorKind::Decode,
            ApiError::Rejected { .. } => ErrorKind::Semantic,
        }
    }

    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, for every kind that received one.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. }
            | ApiError::Decode { body, .. }
            | ApiError::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The remote side answered 404: the entity is gone.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors raised while assembling a [`crate::ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid timeout '{value}': {source}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
