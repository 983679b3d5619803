//! Resource services, one per API resource family.
//!
//! Every endpoint has a `build_*` method returning the `HttpRequest` it
//! would send and an executing method of the same name without the prefix.
//! Services do no validation of their own and never follow pagination.

mod deals;
mod organizations;
mod persons;
mod pipelines;

pub use deals::DealsService;
pub use organizations::OrganizationsService;
pub use persons::PersonsService;
pub use pipelines::PipelinesService;

use crate::envelope::ApiResponse;

/// Placeholder for the unused parameter slot of `ClientInner::build`.
pub(crate) const NO_PARAMS: Option<&()> = None;

/// List endpoints answer `"data": null` when nothing matches.
pub(crate) fn list_or_empty<T>(response: ApiResponse<Option<Vec<T>>>) -> ApiResponse<Vec<T>> {
    response.map(Option::unwrap_or_default)
}
