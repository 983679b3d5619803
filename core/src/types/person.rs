use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{null_as_default, ref_or_id, ContactDetail, OrgRef, UserRef};
use super::values::{Loose, Timestamp, VisibleTo};

/// A person (contact) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub company_id: u64,
    #[serde(deserialize_with = "ref_or_id")]
    pub owner_id: Option<UserRef>,
    #[serde(deserialize_with = "ref_or_id")]
    pub org_id: Option<OrgRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub open_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub related_open_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub closed_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub related_closed_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub participant_open_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub participant_closed_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub email_messages_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub activities_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub done_activities_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub undone_activities_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub files_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub notes_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub followers_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub won_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub related_won_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub lost_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub related_lost_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub active_flag: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: Vec<ContactDetail>,
    #[serde(deserialize_with = "null_as_default")]
    pub email: Vec<ContactDetail>,
    pub first_char: Option<String>,
    pub update_time: Option<String>,
    pub add_time: Option<String>,
    pub visible_to: Option<VisibleTo>,
    pub picture_id: Loose,
    pub next_activity_date: Loose,
    pub next_activity_time: Loose,
    pub next_activity_id: Loose,
    pub last_activity_id: Option<u64>,
    pub last_activity_date: Option<String>,
    pub timeline_last_activity_time: Loose,
    pub timeline_last_activity_time_by_owner: Loose,
    pub last_incoming_mail_time: Loose,
    pub last_outgoing_mail_time: Loose,
    pub org_name: Option<String>,
    pub owner_name: Option<String>,
    pub cc_email: Option<String>,
    #[serde(flatten)]
    pub custom_fields: HashMap<String, Value>,
}

impl Person {
    pub fn primary_email(&self) -> Option<&str> {
        primary(&self.email)
    }

    pub fn primary_phone(&self) -> Option<&str> {
        primary(&self.phone)
    }
}

fn primary(details: &[ContactDetail]) -> Option<&str> {
    details
        .iter()
        .find(|d| d.primary)
        .or_else(|| details.first())
        .map(|d| d.value.as_str())
        .filter(|v| !v.is_empty())
}

/// Body of `POST /persons`. Only `name` is required by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_time: Option<Timestamp>,
}

impl PersonCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body of `PUT /persons/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
}

/// Query of `GET /persons/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonSearchOptions {
    pub term: String,
    /// Comma-separated subset of `custom_fields,email,notes,phone,name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl PersonSearchOptions {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }

    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }
}

/// `data` of a person search: matches wrapped in `items[].item`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PersonSearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<PersonSearchItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PersonSearchItem {
    pub item: Person,
}
