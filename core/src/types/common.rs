//! Shapes shared by several resource families: embedded summaries of
//! related records, bulk and merge parameters, and small response payloads.

use serde::{Deserialize, Deserializer, Serialize};

use super::values::Loose;

/// Summary of a user embedded in another record (`owner_id`, `user_id`,
/// `creator_user_id`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRef {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_pic: bool,
    pub pic_hash: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub value: u64,
}

impl From<u64> for UserRef {
    fn from(id: u64) -> Self {
        Self {
            id,
            value: id,
            ..Default::default()
        }
    }
}

/// Summary of a person embedded in another record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonRef {
    #[serde(deserialize_with = "null_as_default")]
    pub value: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: Vec<ContactDetail>,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: Vec<ContactDetail>,
    #[serde(deserialize_with = "null_as_default")]
    pub active_flag: bool,
}

impl From<u64> for PersonRef {
    fn from(value: u64) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }
}

/// Summary of an organization embedded in another record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgRef {
    #[serde(deserialize_with = "null_as_default")]
    pub value: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub people_count: u64,
    pub owner_id: Option<u64>,
    pub address: Loose,
    pub cc_email: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub active_flag: bool,
}

impl From<u64> for OrgRef {
    fn from(value: u64) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }
}

/// One email address or phone number of a person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub primary: bool,
    pub label: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RefOrId<T> {
    Id(u64),
    Ref(T),
}

/// Decode a related-record field that arrives either as an embedded summary
/// object or as a bare id.
pub(crate) fn ref_or_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + From<u64>,
{
    Ok(
        Option::<RefOrId<T>>::deserialize(deserializer)?.map(|field| match field {
            RefOrId::Id(id) => T::from(id),
            RefOrId::Ref(summary) => summary,
        }),
    )
}

/// Decode an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Paging parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl ListOptions {
    pub fn page(start: u64, limit: u64) -> Self {
        Self {
            start: Some(start),
            limit: Some(limit),
        }
    }
}

/// Bulk deletion parameters: the ids travel as one comma-joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteMultipleOptions {
    pub ids: String,
}

impl DeleteMultipleOptions {
    pub fn new(ids: &[u64]) -> Self {
        let ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self { ids }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeOptions {
    pub merge_with_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddFollowerOptions {
    pub user_id: u64,
}

/// Parameters of the `/find` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FindOptions {
    pub term: String,
    /// `1` makes person lookups match on email instead of name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_by_email: Option<u8>,
}

impl FindOptions {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            search_by_email: None,
        }
    }
}

/// Payload of a single-record deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletedId {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
}

/// Payload of a bulk deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletedIds {
    #[serde(deserialize_with = "null_as_default")]
    pub id: Vec<u64>,
}

/// A follower link created by an `add_follower` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Follower {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: u64,
    pub person_id: Option<u64>,
    pub deal_id: Option<u64>,
    pub org_id: Option<u64>,
    pub add_time: Option<String>,
}
