//! The `{success, data, additional_data}` wrapper every response uses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::http::ResponseMeta;
use crate::types::common::null_as_default;

/// Raw envelope as it comes off the wire. `data` stays untyped until the
/// `success` flag has been checked.
///
/// The side fields are read leniently: a badly shaped `error` or
/// `additional_data` is dropped instead of failing the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Envelope {
    #[serde(deserialize_with = "bool_or_false")]
    pub success: bool,
    pub data: Value,
    #[serde(deserialize_with = "object_or_none")]
    pub additional_data: Option<AdditionalData>,
    #[serde(deserialize_with = "string_or_none")]
    pub error: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub error_info: Option<String>,
}

fn bool_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn object_or_none<'de, D>(deserializer: D) -> Result<Option<AdditionalData>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

impl Envelope {
    /// The most specific error text the server supplied.
    pub fn error_message(&self) -> Option<String> {
        match (&self.error, &self.error_info) {
            (Some(error), Some(info)) if !info.is_empty() => Some(format!("{error} ({info})")),
            (Some(error), _) => Some(error.clone()),
            (None, Some(info)) => Some(info.clone()),
            (None, None) => None,
        }
    }
}

/// Server-supplied metadata accompanying list responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalData {
    pub pagination: Option<Pagination>,
    /// Anything else the endpoint attaches.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Offset-based pagination cursor. The client never follows it on its own;
/// pass `next_start` back through `ListOptions::start` to fetch more.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    #[serde(deserialize_with = "null_as_default")]
    pub start: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub limit: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub more_items_in_collection: bool,
    pub next_start: Option<u64>,
}

impl Pagination {
    pub fn has_more(&self) -> bool {
        self.more_items_in_collection
    }

    pub fn next_start(&self) -> Option<u64> {
        if self.has_more() {
            Some(self.next_start.unwrap_or(self.start.saturating_add(self.limit)))
        } else {
            None
        }
    }
}

/// A decoded successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub additional_data: Option<AdditionalData>,
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            additional_data: self.additional_data,
            meta: self.meta,
        }
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.additional_data.as_ref()?.pagination.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pagination_cursor() {
        let data: AdditionalData = serde_json::from_value(json!({
            "pagination": {"start": 0, "limit": 100, "more_items_in_collection": true, "next_start": 100},
            "company_id": 42
        }))
        .unwrap();
        let page = data.pagination.as_ref().unwrap();
        assert!(page.has_more());
        assert_eq!(page.next_start(), Some(100));
        assert_eq!(data.extra["company_id"], json!(42));
    }

    #[test]
    fn last_page_has_no_next_start() {
        let page = Pagination {
            start: 100,
            limit: 100,
            more_items_in_collection: false,
            next_start: None,
        };
        assert_eq!(page.next_start(), None);
    }

    #[test]
    fn next_start_saturates_instead_of_overflowing() {
        let page = Pagination {
            start: u64::MAX,
            limit: 1,
            more_items_in_collection: true,
            next_start: None,
        };
        assert_eq!(page.next_start(), Some(u64::MAX));
    }

    #[test]
    fn misshapen_side_fields_are_dropped() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": "yes",
            "data": {"id": 1},
            "additional_data": [],
            "error": {"code": "ERR"},
            "error_info": 5
        }))
        .unwrap();
        assert!(!envelope.success);
        assert!(envelope.additional_data.is_none());
        assert!(envelope.error_message().is_none());
        assert_eq!(envelope.data, json!({"id": 1}));
    }

    #[test]
    fn null_pagination_fields_keep_the_cursor() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": true,
            "additional_data": {"pagination": {"start": null, "limit": 50, "more_items_in_collection": true}}
        }))
        .unwrap();
        let page = envelope.additional_data.unwrap().pagination.unwrap();
        assert_eq!(page.next_start(), Some(50));
    }

    #[test]
    fn error_message_combines_fields() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": false,
            "error": "Deal not found",
            "error_info": "Please check developers.pipedrive.com"
        }))
        .unwrap();
        assert_eq!(
            envelope.error_message().unwrap(),
            "Deal not found (Please check developers.pipedrive.com)"
        );
        assert!(envelope.data.is_null());
    }
}
