//! HTTP error types for loading and saving documents.
//!
//! [`RequestError`] covers transport failures shared by both directions;
//! [`LoadError`] and [`SaveError`] add the status and payload failures of
//! each operation.

use std::fmt;

/// Errors that can occur while sending a request.
#[derive(Debug)]
pub enum RequestError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    NetworkError(String),

    /// Request timed out before completion.
    Timeout,

    /// Invalid document URI.
    InvalidUrl(String),

    /// TLS/SSL error occurred during HTTPS connection.
    TlsError(String),

    /// The HTTP client or request could not be built.
    ///
    /// Typically an invalid header name or value in the configuration.
    BuildError(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RequestError::Timeout => write!(f, "Request timed out"),
            RequestError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            RequestError::TlsError(msg) => write!(f, "TLS/SSL error: {}", msg),
            RequestError::BuildError(msg) => write!(f, "Request build error: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}

/// Convert reqwest errors to RequestError.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else if err.to_string().contains("certificate")
            || err.to_string().contains("TLS")
            || err.to_string().contains("SSL")
        {
            RequestError::TlsError(err.to_string())
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}

/// Errors that can occur while loading a document.
#[derive(Debug)]
pub enum LoadError {
    /// The request could not be completed.
    Request(RequestError),

    /// The server answered with a status other than 200 or 304.
    UnexpectedStatus { status: u16, body: String },

    /// The server answered with a success status but sent no document,
    /// as a `304 Not Modified` does.
    EmptyBody { status: u16 },

    /// The response body is not a valid document.
    Parse(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Request(err) => write!(f, "{}", err),
            LoadError::UnexpectedStatus { status, body } => {
                write!(f, "Unexpected status {}: {}", status, body)
            }
            LoadError::EmptyBody { status } => {
                write!(f, "Status {} carried no document to edit", status)
            }
            LoadError::Parse(msg) => write!(f, "Invalid document: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RequestError> for LoadError {
    fn from(err: RequestError) -> Self {
        LoadError::Request(err)
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Request(err.into())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

/// Errors that can occur while saving a document.
#[derive(Debug)]
pub enum SaveError {
    /// The request could not be completed.
    Request(RequestError),

    /// The server answered with a status other than 200.
    Rejected { status: u16, body: String },

    /// The document could not be serialized.
    Serialize(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Request(err) => write!(f, "{}", err),
            SaveError::Rejected { status, body } => write!(f, "{}\r\n{}", status, body),
            SaveError::Serialize(msg) => write!(f, "Failed to serialize document: {}", msg),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RequestError> for SaveError {
    fn from(err: RequestError) -> Self {
        SaveError::Request(err)
    }
}

impl From<reqwest::Error> for SaveError {
    fn from(err: reqwest::Error) -> Self {
        SaveError::Request(err.into())
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(err: serde_json::Error) -> Self {
        SaveError::Serialize(err.to_string())
    }
}
