use serde::{Deserialize, Serialize};

use super::common::null_as_default;
use super::values::Loose;

/// An activity attached to a person, deal or organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub company_id: u64,
    pub user_id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub done: bool,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    pub note: Option<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub duration: Option<String>,
    pub add_time: Option<String>,
    pub marked_as_done_time: Option<String>,
    pub deal_id: Option<u64>,
    pub person_id: Option<u64>,
    pub org_id: Option<u64>,
    pub person_name: Option<String>,
    pub org_name: Option<String>,
    pub deal_title: Option<String>,
    pub owner_name: Option<String>,
    pub location: Loose,
    #[serde(deserialize_with = "null_as_default")]
    pub active_flag: bool,
}
