use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::common::null_as_default;
use super::values::{ActiveFlag, DealProbability, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order_nr: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub deal_probability: bool,
    pub add_time: Option<String>,
    pub update_time: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub selected: bool,
}

/// Body of `POST /pipelines`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineCreateOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_probability: Option<DealProbability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_nr: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<ActiveFlag>,
}

impl PipelineCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body of `PUT /pipelines/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_probability: Option<DealProbability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_nr: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<ActiveFlag>,
}

/// Reporting window of the statistics endpoints, sent as two
/// `YYYY-MM-DD` query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsPeriod {
    pub start_date: String,
    pub end_date: String,
}

impl StatisticsPeriod {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start_date: start.format_date(),
            end_date: end.format_date(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConversionStatistics {
    #[serde(deserialize_with = "null_as_default")]
    pub stage_conversions: Vec<StageConversion>,
    #[serde(deserialize_with = "null_as_default")]
    pub won_conversion: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lost_conversion: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConversion {
    #[serde(deserialize_with = "null_as_default")]
    pub from_stage_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub to_stage_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineMovementStatistics {
    #[serde(deserialize_with = "null_as_default")]
    pub movements_between_stages: MovementCount,
    #[serde(deserialize_with = "null_as_default")]
    pub new_deals: DealMovement,
    #[serde(deserialize_with = "null_as_default")]
    pub deals_left_open: DealMovement,
    #[serde(deserialize_with = "null_as_default")]
    pub won_deals: DealMovement,
    #[serde(deserialize_with = "null_as_default")]
    pub lost_deals: DealMovement,
    #[serde(deserialize_with = "null_as_default")]
    pub average_age_in_days: AverageAge,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementCount {
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Deals in one movement bucket, with totals per currency code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealMovement {
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub deal_ids: Vec<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub values: HashMap<String, f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub formatted_values: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AverageAge {
    #[serde(deserialize_with = "null_as_default")]
    pub across_all_stages: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub by_stages: Vec<StageAge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageAge {
    #[serde(deserialize_with = "null_as_default")]
    pub stage_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
}
