//! In-memory stand-in for the Pipedrive REST API.
//!
//! Serves a subset of `/v1` (deals, persons, pipeline statistics) with the
//! same `{success, data, additional_data}` envelope and token rules as the
//! real service. Records are kept in a `BTreeMap`, so listings come back in
//! id order.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Timestamp stamped on records created without an explicit `add_time`.
pub const DEFAULT_TIME: &str = "2024-01-01 00:00:00";

/// Value reported in the `x-ratelimit-remaining` header.
pub const RATE_LIMIT_REMAINING: u32 = 79;

const DEFAULT_LIMIT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deal {
    pub id: u64,
    pub title: String,
    pub value: f64,
    pub currency: String,
    pub status: String,
    pub stage_id: u64,
    pub pipeline_id: u64,
    pub person_id: Option<u64>,
    pub org_id: Option<u64>,
    pub add_time: String,
    pub update_time: Option<String>,
    pub active: bool,
    pub deleted: bool,
}

#[derive(Deserialize)]
pub struct CreateDeal {
    pub title: Option<String>,
    pub value: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub stage_id: Option<u64>,
    pub pipeline_id: Option<u64>,
    pub person_id: Option<u64>,
    pub org_id: Option<u64>,
    pub add_time: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateDeal {
    pub title: Option<String>,
    pub value: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub stage_id: Option<u64>,
    pub person_id: Option<u64>,
    pub org_id: Option<u64>,
}

#[derive(Deserialize)]
pub struct MergeDeal {
    pub merge_with_id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    pub value: String,
    pub primary: bool,
    pub label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub email: Vec<Contact>,
    pub phone: Vec<Contact>,
    pub org_id: Option<u64>,
    pub add_time: String,
    pub active_flag: bool,
}

#[derive(Deserialize)]
pub struct CreatePerson {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub org_id: Option<u64>,
    pub add_time: Option<String>,
}

#[derive(Default)]
pub struct Store {
    last_id: u64,
    deals: BTreeMap<u64, Deal>,
    persons: BTreeMap<u64, Person>,
}

impl Store {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    db: Db,
}

/// An error answered with a `success: false` envelope.
#[derive(Debug)]
pub struct Failure(StatusCode, &'static str);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.1,
            "error_info": "Please check developers.pipedrive.com for more information about Pipedrive API.",
            "data": null,
            "additional_data": null,
        });
        (self.0, Json(body)).into_response()
    }
}

type ApiResult = Result<Json<Value>, Failure>;

fn ok(data: impl Serialize) -> ApiResult {
    Ok(Json(json!({ "success": true, "data": data })))
}

fn not_found(what: &'static str) -> Failure {
    Failure(StatusCode::NOT_FOUND, what)
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        db: Arc::new(RwLock::new(Store::default())),
    };
    let api = Router::new()
        .route("/deals", get(list_deals).post(add_deal).delete(delete_deals))
        .route("/deals/find", get(find_deals))
        .route("/deals/{id}", get(get_deal).put(update_deal).delete(delete_deal))
        .route("/deals/{id}/duplicate", post(duplicate_deal))
        .route("/deals/{id}/merge", put(merge_deal))
        .route("/persons", post(create_person))
        .route("/persons/search", get(search_persons))
        .route("/persons/{id}", get(get_person))
        .route(
            "/pipelines/{id}/conversion_statistics",
            get(conversion_statistics),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize))
        .with_state(state);
    Router::new().nest("/v1", api)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

/// Accepts the token from the `api_token` query parameter or the
/// `x-api-token` header.
async fn authorize(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let from_query = params.get("api_token").map(String::as_str);
    let from_header = headers.get("x-api-token").and_then(|v| v.to_str().ok());
    let presented = from_query.or(from_header);
    if presented != Some(&*state.token) {
        return Failure(StatusCode::UNAUTHORIZED, "unauthorized access").into_response();
    }
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        "x-ratelimit-remaining",
        HeaderValue::from(RATE_LIMIT_REMAINING),
    );
    response
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn param_usize(params: &HashMap<String, String>, key: &str) -> Result<Option<usize>, Failure> {
    param(params, key)
        .map(|v| v.parse().map_err(|_| Failure(StatusCode::BAD_REQUEST, "Invalid paging parameter")))
        .transpose()
}

async fn list_deals(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let start = param_usize(&params, "start")?.unwrap_or(0);
    let limit = param_usize(&params, "limit")?.unwrap_or(DEFAULT_LIMIT);
    let store = state.db.read().await;
    let page: Vec<Deal> = store.deals.values().skip(start).take(limit).cloned().collect();
    let more = store.deals.len() > start + page.len();
    let mut pagination = json!({
        "start": start,
        "limit": limit,
        "more_items_in_collection": more,
    });
    if more {
        pagination["next_start"] = json!(start + page.len());
    }
    let data = if page.is_empty() { json!(null) } else { json!(page) };
    Ok(Json(json!({
        "success": true,
        "data": data,
        "additional_data": { "pagination": pagination },
    })))
}

async fn find_deals(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let term = param(&params, "term")
        .ok_or(Failure(StatusCode::BAD_REQUEST, "Search term must be given"))?
        .to_lowercase();
    let store = state.db.read().await;
    let matches: Vec<Value> = store
        .deals
        .values()
        .filter(|d| d.title.to_lowercase().contains(&term))
        .map(|d| json!({ "id": d.id, "title": d.title, "value": d.value, "currency": d.currency }))
        .collect();
    if matches.is_empty() {
        ok(Value::Null)
    } else {
        ok(matches)
    }
}

async fn get_deal(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult {
    let store = state.db.read().await;
    store.deals.get(&id).map_or(Err(not_found("Deal not found")), ok)
}

async fn add_deal(State(state): State<AppState>, Json(input): Json<CreateDeal>) -> ApiResult {
    let title = input
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or(Failure(StatusCode::BAD_REQUEST, "Deal title must be given."))?;
    let mut store = state.db.write().await;
    let deal = Deal {
        id: store.next_id(),
        title,
        value: input.value.unwrap_or(0.0),
        currency: input.currency.unwrap_or_else(|| "EUR".to_string()),
        status: input.status.unwrap_or_else(|| "open".to_string()),
        stage_id: input.stage_id.unwrap_or(1),
        pipeline_id: input.pipeline_id.unwrap_or(1),
        person_id: input.person_id,
        org_id: input.org_id,
        add_time: input.add_time.unwrap_or_else(|| DEFAULT_TIME.to_string()),
        update_time: None,
        active: true,
        deleted: false,
    };
    store.deals.insert(deal.id, deal.clone());
    ok(deal)
}

async fn update_deal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateDeal>,
) -> ApiResult {
    let mut store = state.db.write().await;
    let deal = store.deals.get_mut(&id).ok_or(not_found("Deal not found"))?;
    if let Some(title) = input.title {
        deal.title = title;
    }
    if let Some(value) = input.value {
        deal.value = value;
    }
    if let Some(currency) = input.currency {
        deal.currency = currency;
    }
    if let Some(status) = input.status {
        deal.active = status == "open";
        deal.status = status;
    }
    if let Some(stage_id) = input.stage_id {
        deal.stage_id = stage_id;
    }
    if input.person_id.is_some() {
        deal.person_id = input.person_id;
    }
    if input.org_id.is_some() {
        deal.org_id = input.org_id;
    }
    deal.update_time = Some(DEFAULT_TIME.to_string());
    ok(deal.clone())
}

async fn delete_deal(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult {
    let mut store = state.db.write().await;
    store
        .deals
        .remove(&id)
        .map_or(Err(not_found("Deal not found")), |_| ok(json!({ "id": id })))
}

/// Bulk delete; `ids` is one comma-separated query parameter.
async fn delete_deals(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let ids: Vec<u64> = param(&params, "ids")
        .ok_or(Failure(StatusCode::BAD_REQUEST, "Parameter ids must be given"))?
        .split(',')
        .map(|id| id.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| Failure(StatusCode::BAD_REQUEST, "Parameter ids is malformed"))?;
    let mut store = state.db.write().await;
    let deleted: Vec<u64> = ids
        .into_iter()
        .filter(|id| store.deals.remove(id).is_some())
        .collect();
    ok(json!({ "id": deleted }))
}

async fn duplicate_deal(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult {
    let mut store = state.db.write().await;
    let original = store.deals.get(&id).cloned().ok_or(not_found("Deal not found"))?;
    let copy = Deal {
        id: store.next_id(),
        title: format!("{} (copy)", original.title),
        ..original
    };
    store.deals.insert(copy.id, copy.clone());
    ok(copy)
}

async fn merge_deal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<MergeDeal>,
) -> ApiResult {
    if input.merge_with_id == id {
        return Err(Failure(StatusCode::BAD_REQUEST, "Cannot merge a deal with itself"));
    }
    let mut store = state.db.write().await;
    if !store.deals.contains_key(&input.merge_with_id) {
        return Err(not_found("Deal not found"));
    }
    store.deals.remove(&id).ok_or(not_found("Deal not found"))?;
    let target = store.deals.get(&input.merge_with_id).cloned();
    ok(target)
}

async fn create_person(
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> ApiResult {
    let name = input
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(Failure(StatusCode::BAD_REQUEST, "Name must be given."))?;
    let contact = |value: String| Contact {
        value,
        primary: true,
        label: "work".to_string(),
    };
    let mut store = state.db.write().await;
    let person = Person {
        id: store.next_id(),
        name,
        email: input.email.into_iter().map(contact).collect(),
        phone: input.phone.into_iter().map(contact).collect(),
        org_id: input.org_id,
        add_time: input.add_time.unwrap_or_else(|| DEFAULT_TIME.to_string()),
        active_flag: true,
    };
    store.persons.insert(person.id, person.clone());
    ok(person)
}

async fn get_person(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult {
    let store = state.db.read().await;
    store
        .persons
        .get(&id)
        .map_or(Err(not_found("Person not found")), ok)
}

/// Matches `term` against the names and emails selected by `fields`
/// (all searchable fields when absent).
async fn search_persons(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let term = param(&params, "term")
        .filter(|t| t.chars().count() >= 2)
        .ok_or(Failure(StatusCode::BAD_REQUEST, "Search term must be at least 2 characters"))?
        .to_lowercase();
    let fields = param(&params, "fields").unwrap_or("name,email");
    let by_name = fields.split(',').any(|f| f == "name");
    let by_email = fields.split(',').any(|f| f == "email");
    let store = state.db.read().await;
    let items: Vec<Value> = store
        .persons
        .values()
        .filter(|p| {
            (by_name && p.name.to_lowercase().contains(&term))
                || (by_email && p.email.iter().any(|e| e.value.to_lowercase().contains(&term)))
        })
        .map(|p| json!({ "result_score": 1.0, "item": p }))
        .collect();
    ok(json!({ "items": items }))
}

/// Answers fixed rates for any pipeline once both dates parse as
/// `YYYY-MM-DD`, echoing the period in `period`.
async fn conversion_statistics(
    Path(_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let start = param(&params, "start_date").filter(|d| is_date(d));
    let end = param(&params, "end_date").filter(|d| is_date(d));
    let (Some(start), Some(end)) = (start, end) else {
        return Err(Failure(
            StatusCode::BAD_REQUEST,
            "start_date and end_date must be given as YYYY-MM-DD",
        ));
    };
    ok(json!({
        "stage_conversions": [
            { "from_stage_id": 1, "to_stage_id": 2, "conversion_rate": 50 },
            { "from_stage_id": 2, "to_stage_id": 3, "conversion_rate": 25 },
        ],
        "won_conversion": 12.5,
        "lost_conversion": 87.5,
        "period": { "start_date": start, "end_date": end },
    }))
}

/// A real calendar date written as zero-padded `YYYY-MM-DD`.
fn is_date(s: &str) -> bool {
    s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
