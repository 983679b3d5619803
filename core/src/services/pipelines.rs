//! Pipelines service.

use std::sync::Arc;

use super::{list_or_empty, NO_PARAMS};
use crate::client::ClientInner;
use crate::envelope::ApiResponse;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{
    Deal, DeletedId, ListOptions, Pipeline, PipelineConversionStatistics, PipelineCreateOptions,
    PipelineMovementStatistics, PipelineUpdateOptions, StatisticsPeriod, Timestamp,
};

/// Endpoints under `/pipelines`.
#[derive(Debug)]
pub struct PipelinesService {
    inner: Arc<ClientInner>,
}

impl PipelinesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    pub fn build_list(&self) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, "/pipelines", NO_PARAMS, NO_PARAMS)
    }

    pub fn list(&self) -> Result<ApiResponse<Vec<Pipeline>>> {
        let req = self.build_list()?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_get(&self, id: u64) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, &format!("/pipelines/{id}"), NO_PARAMS, NO_PARAMS)
    }

    pub fn get(&self, id: u64) -> Result<ApiResponse<Pipeline>> {
        let req = self.build_get(id)?;
        self.inner.execute(&req)
    }

    pub fn build_deals(&self, id: u64, opts: &ListOptions) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Get,
            &format!("/pipelines/{id}/deals"),
            Some(opts),
            NO_PARAMS,
        )
    }

    /// Deals in a pipeline.
    pub fn deals(&self, id: u64, opts: &ListOptions) -> Result<ApiResponse<Vec<Deal>>> {
        let req = self.build_deals(id, opts)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_conversion_statistics(
        &self,
        id: u64,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Get,
            &format!("/pipelines/{id}/conversion_statistics"),
            Some(&StatisticsPeriod::new(start, end)),
            NO_PARAMS,
        )
    }

    /// Stage-to-stage and won/lost conversion rates for the period.
    pub fn conversion_statistics(
        &self,
        id: u64,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<ApiResponse<PipelineConversionStatistics>> {
        let req = self.build_conversion_statistics(id, start, end)?;
        self.inner.execute(&req)
    }

    pub fn build_movement_statistics(
        &self,
        id: u64,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Get,
            &format!("/pipelines/{id}/movement_statistics"),
            Some(&StatisticsPeriod::new(start, end)),
            NO_PARAMS,
        )
    }

    /// New, won, lost and still-open deals for the period.
    pub fn movement_statistics(
        &self,
        id: u64,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<ApiResponse<PipelineMovementStatistics>> {
        let req = self.build_movement_statistics(id, start, end)?;
        self.inner.execute(&req)
    }

    pub fn build_create(&self, opts: &PipelineCreateOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Post, "/pipelines", NO_PARAMS, Some(opts))
    }

    pub fn create(&self, opts: &PipelineCreateOptions) -> Result<ApiResponse<Pipeline>> {
        let req = self.build_create(opts)?;
        self.inner.execute(&req)
    }

    pub fn build_update(&self, id: u64, opts: &PipelineUpdateOptions) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Put,
            &format!("/pipelines/{id}"),
            NO_PARAMS,
            Some(opts),
        )
    }

    pub fn update(&self, id: u64, opts: &PipelineUpdateOptions) -> Result<ApiResponse<Pipeline>> {
        let req = self.build_update(id, opts)?;
        self.inner.execute(&req)
    }

    pub fn build_delete(&self, id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Delete,
            &format!("/pipelines/{id}"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    /// Mark a pipeline as deleted.
    pub fn delete(&self, id: u64) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete(id)?;
        self.inner.execute(&req)
    }
}
