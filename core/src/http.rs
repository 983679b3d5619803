//! HTTP transport types shared by the request builder and the executor.
//!
//! # Design
//! Requests and responses are plain data. `PipedriveClient::build` produces an
//! `HttpRequest` without touching the network, the executor in `transport`
//! turns it into a real round trip, and `PipedriveClient::parse` consumes the
//! resulting `HttpResponse`. Callers that bring their own HTTP stack can stop
//! after `build` and resume at `parse`.

use std::fmt;

use url::form_urlencoded;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// POST and PUT send their parameters as a JSON body; GET and DELETE use
    /// the query string.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound request described as plain data.
///
/// `path` is the absolute URL without its query string; `query` holds the
/// decoded key/value pairs, authentication included when the token travels
/// as a query parameter.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// The full URL: `path` followed by the encoded query string, if any.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{}", self.path, query)
    }

    /// First value of the query parameter `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

// The token may sit in the query string or a header, keep it out of logs.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), if is_secret(k) { "<redacted>" } else { v.as_str() }))
            .collect();
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), if is_secret(k) { "<redacted>" } else { v.as_str() }))
            .collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &query)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

fn is_secret(key: &str) -> bool {
    key.eq_ignore_ascii_case(crate::config::TOKEN_QUERY_PARAM)
        || key.eq_ignore_ascii_case(crate::config::TOKEN_HEADER)
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn meta(&self) -> ResponseMeta {
        ResponseMeta {
            status: self.status,
            headers: self.headers.clone(),
        }
    }
}

/// Status and headers of a received response.
///
/// Returned with every decoded value and attached to every error raised after
/// a response arrived, so callers can inspect rate-limit headers or the HTTP
/// status on failure paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl ResponseMeta {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Requests left in the current rate-limit window.
    pub fn rate_limit_remaining(&self) -> Option<u64> {
        self.header("x-ratelimit-remaining")?.trim().parse().ok()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: Vec<(&str, &str)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "https://api.pipedrive.com/v1/deals".to_string(),
            query: query
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn url_without_query_is_the_path() {
        let req = request(Vec::new());
        assert_eq!(req.url(), "https://api.pipedrive.com/v1/deals");
    }

    #[test]
    fn url_encodes_query_pairs() {
        let req = request(vec![("ids", "1,2,3"), ("term", "acme inc")]);
        assert_eq!(
            req.url(),
            "https://api.pipedrive.com/v1/deals?ids=1%2C2%2C3&term=acme+inc"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let req = request(vec![("api_token", "secret-token")]);
        let printed = format!("{req:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn meta_header_lookup_is_case_insensitive() {
        let meta = ResponseMeta {
            status: 200,
            headers: vec![("X-RateLimit-Remaining".to_string(), "39".to_string())],
        };
        assert_eq!(meta.header("x-ratelimit-remaining"), Some("39"));
        assert_eq!(meta.rate_limit_remaining(), Some(39));
        assert!(meta.is_success());
    }

    #[test]
    fn only_post_and_put_carry_bodies() {
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Put.carries_body());
        assert!(!HttpMethod::Get.carries_body());
        assert!(!HttpMethod::Delete.carries_body());
    }
}
