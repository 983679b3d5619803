use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{null_as_default, ref_or_id, UserRef};
use super::values::{Loose, Timestamp, VisibleTo};

/// An organization record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub company_id: u64,
    #[serde(deserialize_with = "ref_or_id")]
    pub owner_id: Option<UserRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub open_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub related_open_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub closed_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub related_closed_deals_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub email_messages_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub people_count: u64,
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
    pub category_id: Loose,
    pub picture_id: Loose,
    pub country_code: Loose,
    pub first_char: Option<String>,
    pub update_time: Option<String>,
    pub add_time: Option<String>,
    pub visible_to: Option<VisibleTo>,
    pub next_activity_date: Loose,
    pub next_activity_time: Loose,
    pub next_activity_id: Loose,
    pub last_activity_id: Option<u64>,
    pub last_activity_date: Option<String>,
    pub timeline_last_activity_time: Loose,
    pub timeline_last_activity_time_by_owner: Loose,
    pub address: Loose,
    pub address_subpremise: Loose,
    pub address_street_number: Loose,
    pub address_route: Loose,
    pub address_sublocality: Loose,
    pub address_locality: Loose,
    pub address_admin_area_level_1: Loose,
    pub address_admin_area_level_2: Loose,
    pub address_country: Loose,
    pub address_postal_code: Loose,
    pub address_formatted_address: Loose,
    pub owner_name: Option<String>,
    pub cc_email: Option<String>,
    #[serde(flatten)]
    pub custom_fields: HashMap<String, Value>,
}

/// Body of `POST /organizations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizationCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_time: Option<Timestamp>,
}

impl OrganizationCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body of `PUT /organizations/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizationUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
}
