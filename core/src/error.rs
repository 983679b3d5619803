//! Error types for the Pipedrive client.
//!
//! # Design
//! A single enum covers every failure a call can surface. Variants raised
//! after a response arrived (`Api`, `Decode`) carry the `ResponseMeta` of
//! that response so callers can still inspect the HTTP status and headers.
//! There is no retry or recovery layer; errors reach the caller as built.

use thiserror::Error;

use crate::http::ResponseMeta;

/// A specialized `Result` type for Pipedrive operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response: DNS, connect, timeout, or a
    /// failure while reading the body.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The server answered with a non-2xx status or an envelope whose
    /// `success` flag is false.
    #[error("API error: HTTP {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Raw response body for debugging.
        body: String,
        meta: ResponseMeta,
    },

    /// The response looked successful but its JSON could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String, meta: ResponseMeta },

    /// Query or body parameters could not be serialized.
    #[error("failed to encode request: {0}")]
    Encoding(String),

    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Metadata of the response that produced this error, if one arrived.
    pub fn meta(&self) -> Option<&ResponseMeta> {
        match self {
            ApiError::Api { meta, .. } | ApiError::Decode { meta, .. } => Some(meta),
            _ => None,
        }
    }

    /// HTTP status of the response that produced this error, if one arrived.
    pub fn status(&self) -> Option<u16> {
        self.meta().map(|meta| meta.status)
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Api { status, .. } if (400..500).contains(status))
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Api { status, .. } if *status >= 500)
    }
}
