//! Synchronous, typed client for the Pipedrive CRM REST API.
//!
//! # Overview
//! Covers deals, organizations, persons and pipelines. Every endpoint is
//! available both as a pure `build_*` step that produces an `HttpRequest`
//! and as an executing call that sends it with ureq and parses the
//! `{success, data, additional_data}` envelope into an `ApiResponse<T>`.
//!
//! # Design
//! - `PipedriveClient` holds an immutable `ClientConfig` and a ureq agent
//!   behind an `Arc`; services (`client.deals()` and friends) borrow it.
//! - GET and DELETE carry their parameters in the query string, POST and
//!   PUT in a JSON body. The API token is attached to every request.
//! - `parse` is a free function over plain data, so responses obtained by
//!   any other means decode the same way.
//! - Every failure is an `ApiError`; API and decode failures keep the
//!   response status and headers.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod services;
pub mod transport;
pub mod types;

pub use client::{parse, PipedriveClient};
pub use config::{ClientConfig, TokenPlacement};
pub use envelope::{AdditionalData, ApiResponse, Pagination};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseMeta};
