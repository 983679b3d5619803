//! Deals service.

use std::sync::Arc;

use super::{list_or_empty, NO_PARAMS};
use crate::client::ClientInner;
use crate::envelope::ApiResponse;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{
    Deal, DealCreateOptions, DealUpdate, DealUpdateOptions, DeleteMultipleOptions, DeletedId,
    DeletedIds, FindOptions, ListOptions, MergeOptions,
};

/// Endpoints under `/deals`.
///
/// ```no_run
/// # fn example(client: pipedrive_core::PipedriveClient) -> pipedrive_core::Result<()> {
/// use pipedrive_core::types::DealCreateOptions;
///
/// let created = client.deals().add(&DealCreateOptions::new("Annual plan"))?;
/// client.deals().delete_multiple(&[created.data.id])?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DealsService {
    inner: Arc<ClientInner>,
}

impl DealsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    pub fn build_list(&self, opts: &ListOptions) -> Result<HttpRequest> {
        self.inner.build(HttpMethod::Get, "/deals", Some(opts), NO_PARAMS)
    }

    /// One page of deals; read `pagination()` for the next `start`.
    pub fn list(&self, opts: &ListOptions) -> Result<ApiResponse<Vec<Deal>>> {
        let req = self.build_list(opts)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_get(&self, id: u64) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, &format!("/deals/{id}"), NO_PARAMS, NO_PARAMS)
    }

    pub fn get(&self, id: u64) -> Result<ApiResponse<Deal>> {
        let req = self.build_get(id)?;
        self.inner.execute(&req)
    }

    pub fn build_find(&self, term: &str) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Get,
            "/deals/find",
            Some(&FindOptions::term(term)),
            NO_PARAMS,
        )
    }

    /// Deals whose title matches `term`.
    pub fn find(&self, term: &str) -> Result<ApiResponse<Vec<Deal>>> {
        let req = self.build_find(term)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_list_updates(&self, id: u64) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, &format!("/deals/{id}/flow"), NO_PARAMS, NO_PARAMS)
    }

    /// The update flow of a deal: field changes, activities, notes, files.
    pub fn list_updates(&self, id: u64) -> Result<ApiResponse<Vec<DealUpdate>>> {
        let req = self.build_list_updates(id)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_add(&self, opts: &DealCreateOptions) -> Result<HttpRequest> {
        self.inner.build(HttpMethod::Post, "/deals", NO_PARAMS, Some(opts))
    }

    pub fn add(&self, opts: &DealCreateOptions) -> Result<ApiResponse<Deal>> {
        let req = self.build_add(opts)?;
        self.inner.execute(&req)
    }

    pub fn build_update(&self, id: u64, opts: &DealUpdateOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Put, &format!("/deals/{id}"), NO_PARAMS, Some(opts))
    }

    pub fn update(&self, id: u64, opts: &DealUpdateOptions) -> Result<ApiResponse<Deal>> {
        let req = self.build_update(id, opts)?;
        self.inner.execute(&req)
    }

    pub fn build_duplicate(&self, id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Post,
            &format!("/deals/{id}/duplicate"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    /// Copy a deal; the response holds the new deal.
    pub fn duplicate(&self, id: u64) -> Result<ApiResponse<Deal>> {
        let req = self.build_duplicate(id)?;
        self.inner.execute(&req)
    }

    pub fn build_merge(&self, id: u64, merge_with_id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Put,
            &format!("/deals/{id}/merge"),
            NO_PARAMS,
            Some(&MergeOptions { merge_with_id }),
        )
    }

    /// Merge deal `id` into `merge_with_id`.
    pub fn merge(&self, id: u64, merge_with_id: u64) -> Result<ApiResponse<Deal>> {
        let req = self.build_merge(id, merge_with_id)?;
        self.inner.execute(&req)
    }

    pub fn build_delete(&self, id: u64) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Delete, &format!("/deals/{id}"), NO_PARAMS, NO_PARAMS)
    }

    pub fn delete(&self, id: u64) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete(id)?;
        self.inner.execute(&req)
    }

    pub fn build_delete_multiple(&self, ids: &[u64]) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Delete,
            "/deals",
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
            &format!("/deals/{id}/followers/{follower_id}"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    pub fn delete_follower(&self, id: u64, follower_id: u64) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete_follower(id, follower_id)?;
        self.inner.execute(&req)
    }

    pub fn build_delete_participant(&self, id: u64, participant_id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Delete,
            &format!("/deals/{id}/participants/{participant_id}"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    pub fn delete_participant(
        &self,
        id: u64,
        participant_id: u64,
    ) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete_participant(id, participant_id)?;
        self.inner.execute(&req)
    }

    pub fn build_delete_attached_product(
        &self,
        id: u64,
        product_attachment_id: u64,
    ) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Delete,
            &format!("/deals/{id}/products/{product_attachment_id}"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    pub fn delete_attached_product(
        &self,
        id: u64,
        product_attachment_id: u64,
    ) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete_attached_product(id, product_attachment_id)?;
        self.inner.execute(&req)
    }
}
