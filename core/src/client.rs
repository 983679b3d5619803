//! Request builder, response parser and the client that ties them to the
//! network.
//!
//! # Design
//! `PipedriveClient` owns the configuration and a ureq agent behind an `Arc`
//! and carries no mutable state between calls. Every call is split in two
//! halves that can be used on their own:
//! - `build` turns a method, a path and optional parameters into an
//!   `HttpRequest` without touching the network.
//! - `parse` turns an `HttpResponse` into a typed `ApiResponse` or an
//!   `ApiError`.
//!
//! `execute` joins them with one round trip through `transport::send`.
//! Callers with their own HTTP stack can run `build`, execute the request
//! themselves and hand the result to `parse`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ClientConfig, TokenPlacement, TOKEN_HEADER, TOKEN_QUERY_PARAM};
use crate::envelope::{ApiResponse, Envelope};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseMeta};
use crate::services::{DealsService, OrganizationsService, PersonsService, PipelinesService};
use crate::transport;

/// Synchronous client for the Pipedrive API.
///
/// Cheap to clone; clones share the configuration and the connection pool.
///
/// ```no_run
/// use pipedrive_core::{ClientConfig, PipedriveClient};
///
/// # fn main() -> pipedrive_core::Result<()> {
/// let client = PipedriveClient::new(ClientConfig::from_env()?)?;
/// let deals = client.deals().list(&Default::default())?;
/// for deal in deals.data {
///     println!("{} {}", deal.id, deal.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PipedriveClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) config: ClientConfig,
    pub(crate) agent: ureq::Agent,
}

impl std::fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PipedriveClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let agent = transport::default_agent(config.timeout);
        Self::with_agent(config, agent)
    }

    /// Use a caller-configured agent (proxy, TLS, timeouts). The agent must
    /// not treat HTTP error statuses as errors, or API failures surface as
    /// `ApiError::Transport`.
    pub fn with_agent(config: ClientConfig, agent: ureq::Agent) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(ClientInner { config, agent }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn deals(&self) -> DealsService {
        DealsService::new(self.inner.clone())
    }

    pub fn organizations(&self) -> OrganizationsService {
        OrganizationsService::new(self.inner.clone())
    }

    pub fn persons(&self) -> PersonsService {
        PersonsService::new(self.inner.clone())
    }

    pub fn pipelines(&self) -> PipelinesService {
        PipelinesService::new(self.inner.clone())
    }

    /// Build a request without sending it.
    ///
    /// GET and DELETE take `query`, POST and PUT take `body`; the API token
    /// is attached either way.
    pub fn build<Q, B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<HttpRequest>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.inner.build(method, path, query, body)
    }

    /// Send a built request and decode its `data` into `T`.
    pub fn execute<T: DeserializeOwned>(&self, req: &HttpRequest) -> Result<ApiResponse<T>> {
        self.inner.execute(req)
    }

    /// Send a built request and decode its `data` into `dest`.
    ///
    /// `dest` is only written when the call succeeds; on any error it keeps
    /// the value it had before the call.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        req: &HttpRequest,
        dest: &mut T,
    ) -> Result<ResponseMeta> {
        let response = self.inner.execute::<T>(req)?;
        *dest = response.data;
        Ok(response.meta)
    }

    /// Decode a response obtained outside this client.
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<ApiResponse<T>> {
        parse(response)
    }
}

impl ClientInner {
    /// Build the request for `method` and `path` (relative to the base URL).
    ///
    /// GET and DELETE encode `query` into the query string, POST and PUT
    /// encode `body` as JSON. Handing a payload to the other slot is an
    /// `Encoding` error. The API token is attached in every case.
    pub(crate) fn build<Q, B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<HttpRequest>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let mut req = HttpRequest {
            method,
            path: format!("{}{}", self.config.base_url, path),
            query: Vec::new(),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("user-agent".to_string(), self.config.user_agent.clone()),
            ],
            body: None,
        };

        if let Some(query) = query {
            if method.carries_body() {
                return Err(ApiError::Encoding(format!(
                    "{method} sends its parameters in the body, not the query string"
                )));
            }
            req.query = encode_query(query)?;
        }

        if let Some(body) = body {
            if !method.carries_body() {
                return Err(ApiError::Encoding(format!(
                    "{method} sends its parameters in the query string, not a body"
                )));
            }
            let json = serde_json::to_string(body).map_err(|e| ApiError::Encoding(e.to_string()))?;
            req.headers
                .push(("content-type".to_string(), "application/json".to_string()));
            req.body = Some(json);
        }

        match self.config.token_placement {
            TokenPlacement::QueryParam => req
                .query
                .push((TOKEN_QUERY_PARAM.to_string(), self.config.api_token.clone())),
            TokenPlacement::Header => req
                .headers
                .push((TOKEN_HEADER.to_string(), self.config.api_token.clone())),
        }

        Ok(req)
    }

    pub(crate) fn execute<T: DeserializeOwned>(&self, req: &HttpRequest) -> Result<ApiResponse<T>> {
        tracing::debug!(method = %req.method, path = %req.path, "sending request");
        let response = transport::send(&self.agent, req)?;
        tracing::debug!(status = response.status, path = %req.path, "received response");
        parse(response).inspect_err(|err| {
            if let ApiError::Api { status, message, .. } = err {
                tracing::warn!(status, %message, path = %req.path, "API call failed");
            }
        })
    }
}

/// Serialize `query` with form encoding and split it back into pairs.
fn encode_query<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>> {
    let encoded = serde_urlencoded::to_string(query).map_err(|e| ApiError::Encoding(e.to_string()))?;
    serde_urlencoded::from_str(&encoded).map_err(|e| ApiError::Encoding(e.to_string()))
}

/// Decode `response` into the envelope's `data`.
///
/// Any status outside 200–299 and any envelope with `success: false` is an
/// `ApiError::Api`. A 2xx body that is not a valid envelope, or whose `data`
/// does not fit `T`, is an `ApiError::Decode`.
pub fn parse<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>> {
    let meta = response.meta();

    if !meta.is_success() {
        let message = serde_json::from_str::<Envelope>(&response.body)
            .ok()
            .and_then(|envelope| envelope.error_message())
            .unwrap_or_else(|| fallback_message(&response));
        return Err(ApiError::Api {
            status: response.status,
            message,
            body: response.body,
            meta,
        });
    }

    let envelope: Envelope = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Err(ApiError::Decode {
                message: e.to_string(),
                meta,
            })
        }
    };

    if !envelope.success {
        let message = envelope
            .error_message()
            .unwrap_or_else(|| "request was not successful".to_string());
        return Err(ApiError::Api {
            status: response.status,
            message,
            body: response.body,
            meta,
        });
    }

    match serde_json::from_value(envelope.data) {
        Ok(data) => Ok(ApiResponse {
            data,
            additional_data: envelope.additional_data,
            meta,
        }),
        Err(e) => Err(ApiError::Decode {
            message: e.to_string(),
            meta,
        }),
    }
}

fn fallback_message(response: &HttpResponse) -> String {
    let body = response.body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    match response.status {
        400 => "bad request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "not found",
        410 => "gone",
        422 => "unprocessable entity",
        429 => "too many requests",
        500..=599 => "server error",
        _ => "unexpected status",
    }
    .to_string()
}
