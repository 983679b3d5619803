//! Organizations service.

use std::sync::Arc;

use super::{list_or_empty, NO_PARAMS};
use crate::client::ClientInner;
use crate::envelope::ApiResponse;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{
    DeleteMultipleOptions, DeletedId, DeletedIds, FindOptions, ListOptions, MergeOptions,
    Organization, OrganizationCreateOptions, OrganizationUpdateOptions,
};

/// Endpoints under `/organizations`.
#[derive(Debug)]
pub struct OrganizationsService {
    inner: Arc<ClientInner>,
}

impl OrganizationsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    pub fn build_list(&self, opts: &ListOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, "/organizations", Some(opts), NO_PARAMS)
    }

    pub fn list(&self, opts: &ListOptions) -> Result<ApiResponse<Vec<Organization>>> {
        let req = self.build_list(opts)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_get(&self, id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Get,
            &format!("/organizations/{id}"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    pub fn get(&self, id: u64) -> Result<ApiResponse<Organization>> {
        let req = self.build_get(id)?;
        self.inner.execute(&req)
    }

    pub fn build_find(&self, term: &str) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Get,
            "/organizations/find",
            Some(&FindOptions::term(term)),
            NO_PARAMS,
        )
    }

    /// Organizations whose name matches `term`.
    pub fn find(&self, term: &str) -> Result<ApiResponse<Vec<Organization>>> {
        let req = self.build_find(term)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_create(&self, opts: &OrganizationCreateOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Post, "/organizations", NO_PARAMS, Some(opts))
    }

    pub fn create(&self, opts: &OrganizationCreateOptions) -> Result<ApiResponse<Organization>> {
        let req = self.build_create(opts)?;
        self.inner.execute(&req)
    }

    pub fn build_update(&self, id: u64, opts: &OrganizationUpdateOptions) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Put,
            &format!("/organizations/{id}"),
            NO_PARAMS,
            Some(opts),
        )
    }

    pub fn update(
        &self,
        id: u64,
        opts: &OrganizationUpdateOptions,
    ) -> Result<ApiResponse<Organization>> {
        let req = self.build_update(id, opts)?;
        self.inner.execute(&req)
    }

    pub fn build_merge(&self, id: u64, merge_with_id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Put,
            &format!("/organizations/{id}/merge"),
            NO_PARAMS,
            Some(&MergeOptions { merge_with_id }),
        )
    }

    pub fn merge(&self, id: u64, merge_with_id: u64) -> Result<ApiResponse<Organization>> {
        let req = self.build_merge(id, merge_with_id)?;
        self.inner.execute(&req)
    }

    pub fn build_delete(&self, id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Delete,
            &format!("/organizations/{id}"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    /// Mark an organization as deleted.
    pub fn delete(&self, id: u64) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete(id)?;
        self.inner.execute(&req)
    }

    pub fn build_delete_multiple(&self, ids: &[u64]) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Delete,
            "/organizations",
            Some(&DeleteMultipleOptions::new(ids)),
            NO_PARAMS,
        )
    }

    pub fn delete_multiple(&self, ids: &[u64]) -> Result<ApiResponse<DeletedIds>> {
        let req = self.build_delete_multiple(ids)?;
        self.inner.execute(&req)
    }

    pub fn build_delete_follower(&self, id: u64, follower_id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Delete,
            &format!("/organizations/{id}/followers/{follower_id}"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    pub fn delete_follower(&self, id: u64, follower_id: u64) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete_follower(id, follower_id)?;
        self.inner.execute(&req)
    }
}
