//! Persons service.

use std::sync::Arc;

use super::{list_or_empty, NO_PARAMS};
use crate::client::ClientInner;
use crate::envelope::ApiResponse;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::person::PersonSearchResult;
use crate::types::{
    Activity, AddFollowerOptions, Deal, DeleteMultipleOptions, DeletedId, DeletedIds,
    FindOptions, Follower, ListOptions, MergeOptions, Person, PersonCreateOptions,
    PersonSearchOptions, PersonUpdateOptions,
};

/// Endpoints under `/persons`.
#[derive(Debug)]
pub struct PersonsService {
    inner: Arc<ClientInner>,
}

impl PersonsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    pub fn build_list(&self, opts: &ListOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, "/persons", Some(opts), NO_PARAMS)
    }

    pub fn list(&self, opts: &ListOptions) -> Result<ApiResponse<Vec<Person>>> {
        let req = self.build_list(opts)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_get(&self, id: u64) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, &format!("/persons/{id}"), NO_PARAMS, NO_PARAMS)
    }

    pub fn get(&self, id: u64) -> Result<ApiResponse<Person>> {
        let req = self.build_get(id)?;
        self.inner.execute(&req)
    }

    pub fn build_find(&self, opts: &FindOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, "/persons/find", Some(opts), NO_PARAMS)
    }

    /// Persons whose name, or email with `search_by_email`, matches the term.
    pub fn find(&self, opts: &FindOptions) -> Result<ApiResponse<Vec<Person>>> {
        let req = self.build_find(opts)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_search(&self, opts: &PersonSearchOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, "/persons/search", Some(opts), NO_PARAMS)
    }

    /// Search persons, optionally restricted to the fields named in
    /// `opts.fields`.
    pub fn search(&self, opts: &PersonSearchOptions) -> Result<ApiResponse<Vec<Person>>> {
        let req = self.build_search(opts)?;
        let response: ApiResponse<Option<PersonSearchResult>> = self.inner.execute(&req)?;
        Ok(response.map(|result| {
            result
                .map(|r| r.items.into_iter().map(|item| item.item).collect())
                .unwrap_or_default()
        }))
    }

    pub fn build_create(&self, opts: &PersonCreateOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Post, "/persons", NO_PARAMS, Some(opts))
    }

    pub fn create(&self, opts: &PersonCreateOptions) -> Result<ApiResponse<Person>> {
        let req = self.build_create(opts)?;
        self.inner.execute(&req)
    }

    pub fn build_update(&self, id: u64, opts: &PersonUpdateOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Put, &format!("/persons/{id}"), NO_PARAMS, Some(opts))
    }

    pub fn update(&self, id: u64, opts: &PersonUpdateOptions) -> Result<ApiResponse<Person>> {
        let req = self.build_update(id, opts)?;
        self.inner.execute(&req)
    }

    pub fn build_merge(&self, id: u64, merge_with_id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Put,
            &format!("/persons/{id}/merge"),
            NO_PARAMS,
            Some(&MergeOptions { merge_with_id }),
        )
    }

    pub fn merge(&self, id: u64, merge_with_id: u64) -> Result<ApiResponse<Person>> {
        let req = self.build_merge(id, merge_with_id)?;
        self.inner.execute(&req)
    }

    pub fn build_add_follower(&self, id: u64, user_id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Post,
            &format!("/persons/{id}/followers"),
            NO_PARAMS,
            Some(&AddFollowerOptions { user_id }),
        )
    }

    pub fn add_follower(&self, id: u64, user_id: u64) -> Result<ApiResponse<Follower>> {
        let req = self.build_add_follower(id, user_id)?;
        self.inner.execute(&req)
    }

    pub fn build_list_deals(&self, id: u64, opts: &ListOptions) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Get, &format!("/persons/{id}/deals"), Some(opts), NO_PARAMS)
    }

    /// Deals associated with a person.
    pub fn list_deals(&self, id: u64, opts: &ListOptions) -> Result<ApiResponse<Vec<Deal>>> {
        let req = self.build_list_deals(id, opts)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_list_activities(&self, id: u64, opts: &ListOptions) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Get,
            &format!("/persons/{id}/activities"),
            Some(opts),
            NO_PARAMS,
        )
    }

    pub fn list_activities(
        &self,
        id: u64,
        opts: &ListOptions,
    ) -> Result<ApiResponse<Vec<Activity>>> {
        let req = self.build_list_activities(id, opts)?;
        self.inner.execute(&req).map(list_or_empty)
    }

    pub fn build_delete(&self, id: u64) -> Result<HttpRequest> {
        self.inner
            .build(HttpMethod::Delete, &format!("/persons/{id}"), NO_PARAMS, NO_PARAMS)
    }

    /// Mark a person as deleted.
    pub fn delete(&self, id: u64) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete(id)?;
        self.inner.execute(&req)
    }

    pub fn build_delete_multiple(&self, ids: &[u64]) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Delete,
            "/persons",
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
            &format!("/persons/{id}/followers/{follower_id}"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    pub fn delete_follower(&self, id: u64, follower_id: u64) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete_follower(id, follower_id)?;
        self.inner.execute(&req)
    }

    pub fn build_delete_picture(&self, id: u64) -> Result<HttpRequest> {
        self.inner.build(
            HttpMethod::Delete,
            &format!("/persons/{id}/picture"),
            NO_PARAMS,
            NO_PARAMS,
        )
    }

    pub fn delete_picture(&self, id: u64) -> Result<ApiResponse<DeletedId>> {
        let req = self.build_delete_picture(id)?;
        self.inner.execute(&req)
    }
}
