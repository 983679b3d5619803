use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{null_as_default, ref_or_id, OrgRef, PersonRef, UserRef};
use super::values::{Loose, Timestamp, VisibleTo};

/// A deal record as returned by the deals endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deal {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "ref_or_id")]
    pub creator_user_id: Option<UserRef>,
    #[serde(deserialize_with = "ref_or_id")]
    pub user_id: Option<UserRef>,
    #[serde(deserialize_with = "ref_or_id")]
    pub person_id: Option<PersonRef>,
    #[serde(deserialize_with = "ref_or_id")]
    pub org_id: Option<OrgRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub stage_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub pipeline_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    pub add_time: Option<String>,
    pub update_time: Option<String>,
    pub stage_change_time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub deleted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub probability: Option<u8>,
    pub next_activity_date: Loose,
    pub next_activity_time: Loose,
    pub next_activity_id: Loose,
    pub next_activity_subject: Loose,
    pub next_activity_type: Loose,
    pub next_activity_duration: Loose,
    pub next_activity_note: Loose,
    pub last_activity_id: Option<u64>,
    pub last_activity_date: Option<String>,
    pub lost_reason: Option<String>,
    pub visible_to: Option<VisibleTo>,
    pub close_time: Option<String>,
    pub won_time: Loose,
    pub first_won_time: Loose,
    pub lost_time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub products_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub files_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub notes_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub followers_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub email_messages_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub activities_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub done_activities_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub undone_activities_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub participants_count: u64,
    pub expected_close_date: Option<String>,
    pub last_incoming_mail_time: Loose,
    pub last_outgoing_mail_time: Loose,
    #[serde(deserialize_with = "null_as_default")]
    pub stage_order_nr: u64,
    pub person_name: Option<String>,
    pub org_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub formatted_value: String,
    pub rotten_time: Loose,
    #[serde(deserialize_with = "null_as_default")]
    pub weighted_value: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub formatted_weighted_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cc_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub org_hidden: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub person_hidden: bool,
    /// Account-specific custom fields, keyed by their hash.
    #[serde(flatten)]
    pub custom_fields: HashMap<String, Value>,
}

/// Deal status values accepted by create and update calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Open,
    Won,
    Lost,
    Deleted,
}

/// Body of `POST /deals`. Only `title` is required by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DealCreateOptions {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    #[serde(rename = "org_id", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DealStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lost_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_time: Option<Timestamp>,
}

impl DealCreateOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Body of `PUT /deals/{id}`. Unset fields are left unchanged server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DealUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    #[serde(rename = "org_id", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DealStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lost_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_to: Option<VisibleTo>,
}

/// One entry of a deal's update flow (`/deals/{id}/flow`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealUpdate {
    /// Kind of entry: `dealChange`, `activity`, `note`, `file`, ...
    #[serde(deserialize_with = "null_as_default")]
    pub object: String,
    pub timestamp: Option<String>,
    pub data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_embedded_references() {
        let deal: Deal = serde_json::from_value(json!({
            "id": 1,
            "title": "Big sale",
            "value": 5000,
            "currency": "EUR",
            "user_id": {"id": 9, "name": "Owner", "email": "o@example.com", "value": 9},
            "person_id": {"value": 3, "name": "Ada"},
            "org_id": 4,
            "visible_to": "3",
            "next_activity_date": null,
            "next_activity_id": 77,
            "won_time": "2024-02-01 10:00:00",
            "802aa45ecc05f31fcebe8b706510389f56b7a041": "custom"
        }))
        .unwrap();

        assert_eq!(deal.user_id.unwrap().name, "Owner");
        assert_eq!(deal.person_id.unwrap().name, "Ada");
        assert_eq!(deal.org_id.unwrap().value, 4);
        assert_eq!(deal.visible_to, Some(VisibleTo::Entire));
        assert!(deal.next_activity_date.is_absent());
        assert_eq!(deal.next_activity_id.as_id(), Some(77));
        assert!(deal.won_time.as_timestamp().is_some());
        assert_eq!(
            deal.custom_fields["802aa45ecc05f31fcebe8b706510389f56b7a041"],
            json!("custom")
        );
    }

    #[test]
    fn null_scalars_decode_to_defaults() {
        let deal: Deal = serde_json::from_value(json!({
            "id": 9,
            "title": "Nulls",
            "currency": null,
            "status": null,
            "value": null,
            "stage_id": null,
            "active": null,
            "products_count": null,
            "owner_name": null,
            "cc_email": null,
            "formatted_value": null
        }))
        .unwrap();

        assert_eq!(deal.id, 9);
        assert_eq!(deal.title, "Nulls");
        assert_eq!(deal.currency, "");
        assert_eq!(deal.status, "");
        assert_eq!(deal.value, 0.0);
        assert_eq!(deal.stage_id, 0);
        assert!(!deal.active);
        assert_eq!(deal.products_count, 0);
        assert!(deal.custom_fields.is_empty());
    }

    #[test]
    fn create_options_omit_unset_fields() {
        let opts = DealCreateOptions {
            value: Some(250.0),
            status: Some(DealStatus::Open),
            ..DealCreateOptions::new("Starter plan")
        };
        let body = serde_json::to_value(&opts).unwrap();
        assert_eq!(
            body,
            json!({"title": "Starter plan", "value": 250.0, "status": "open"})
        );
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let body = serde_json::to_value(DealUpdateOptions::default()).unwrap();
        assert_eq!(body, json!({}));
    }
}
