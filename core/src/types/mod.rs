//! Data-transfer types for the Pipedrive API.
//!
//! # Design
//! Records mirror the API's JSON field for field and carry no behavior.
//! Every record is `#[serde(default)]`, so fields the API leaves out decode
//! to their defaults, and related records decode from either an embedded
//! summary or a bare id. Request payloads use `Option` fields skipped when
//! `None`, which keeps unset values out of both query strings and bodies.

pub mod activity;
pub mod common;
pub mod deal;
pub mod organization;
pub mod person;
pub mod pipeline;
pub mod values;

pub use activity::Activity;
pub use common::{
    AddFollowerOptions, ContactDetail, DeleteMultipleOptions, DeletedId, DeletedIds, FindOptions,
    Follower, ListOptions, MergeOptions, OrgRef, PersonRef, UserRef,
};
pub use deal::{Deal, DealCreateOptions, DealStatus, DealUpdate, DealUpdateOptions};
pub use organization::{Organization, OrganizationCreateOptions, OrganizationUpdateOptions};
pub use person::{Person, PersonCreateOptions, PersonSearchOptions, PersonUpdateOptions};
pub use pipeline::{
    AverageAge, DealMovement, MovementCount, Pipeline, PipelineConversionStatistics,
    PipelineCreateOptions, PipelineMovementStatistics, PipelineUpdateOptions, StageAge,
    StageConversion, StatisticsPeriod,
};
pub use values::{ActiveFlag, DealProbability, Loose, Timestamp, VisibleTo};
