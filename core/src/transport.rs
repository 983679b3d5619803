//! Executes an `HttpRequest` over the network with ureq.
//!
//! # Design
//! One blocking round trip per call. HTTP status codes are returned as data
//! (`http_status_as_error(false)`) so that status interpretation stays in
//! `PipedriveClient::parse`; only failures that prevent a response from being
//! read become `ApiError::Transport`.

use std::time::Duration;

use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Build the ureq agent used when the caller does not supply one.
pub fn default_agent(timeout: Option<Duration>) -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(timeout)
        .build()
        .new_agent()
}

/// Send `req` and read the full response body.
pub fn send(agent: &ureq::Agent, req: &HttpRequest) -> Result<HttpResponse> {
    let url = req.url();

    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => with_headers(agent.get(&url), &req.headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(&url), &req.headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(&url), &req.headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(&url), &req.headers).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(&url), &req.headers).send(body.as_bytes())
        }
        (HttpMethod::Put, None) => with_headers(agent.put(&url), &req.headers).send_empty(),
    };
    let mut response = result?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_string()?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
