//! Document transport using reqwest.
//!
//! [`DocumentClient`] fetches a variables document with `GET` and writes the
//! whole document back with `PUT` to the same URI.

use crate::executor::config::ExecutionConfig;
use crate::executor::error::{LoadError, RequestError, SaveError};
use crate::models::document::Document;
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

/// Outcome of a successful save.
#[derive(Debug, Clone, Serialize)]
pub struct SaveReceipt {
    /// HTTP status returned by the server (always 200).
    pub status: u16,

    /// When the server acknowledged the save.
    pub saved_at: DateTime<Utc>,
}

/// Whether a load response carries a usable document.
pub fn is_load_success(status: u16) -> bool {
    status == 200 || status == 304
}

fn parse_loaded(status: u16, body: String) -> Result<Document, LoadError> {
    if !is_load_success(status) {
        return Err(LoadError::UnexpectedStatus { status, body });
    }
    if body.trim().is_empty() {
        return Err(LoadError::EmptyBody { status });
    }
    Ok(Document::from_json(&body)?)
}

/// HTTP client for one document endpoint.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    http: reqwest::Client,
}

impl DocumentClient {
    /// Builds a client from the execution configuration.
    ///
    /// Default headers and credentials are attached to every request.
    pub fn new(config: &ExecutionConfig) -> Result<Self, RequestError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RequestError::BuildError(format!("header '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RequestError::BuildError(format!("header '{}': {}", name, e)))?;
            headers.insert(name, value);
        }

        if let Some(credentials) = &config.credentials {
            let mut value = HeaderValue::from_str(&credentials.header_value())
                .map_err(|e| RequestError::BuildError(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .danger_accept_invalid_certs(!config.validate_ssl)
            .default_headers(headers)
            .build()?;

        Ok(Self { http })
    }

    /// Fetches and parses the document at `uri`.
    ///
    /// Statuses 200 and 304 are accepted; any other status is returned as
    /// [`LoadError::UnexpectedStatus`] with the response body. An accepted
    /// response without a body is [`LoadError::EmptyBody`].
    pub async fn fetch_document(&self, uri: &Url) -> Result<Document, LoadError> {
        debug!("GET {}", uri);
        let response = self
            .http
            .get(uri.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("GET {} -> {} ({} bytes)", uri, status, body.len());

        parse_loaded(status, body)
    }

    /// Writes the whole document to `uri`.
    ///
    /// Any status other than 200 is returned as [`SaveError::Rejected`] with
    /// the raw response body.
    pub async fn put_document(
        &self,
        uri: &Url,
        document: &Document,
    ) -> Result<SaveReceipt, SaveError> {
        let body = document.to_json_string()?;
        debug!("PUT {} ({} bytes)", uri, body.len());

        let response = self
            .http
            .put(uri.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!("PUT {} -> {}", uri, status);

        if status != 200 {
            return Err(SaveError::Rejected { status, body: text });
        }

        Ok(SaveReceipt {
            status,
            saved_at: Utc::now(),
        })
    }
}
