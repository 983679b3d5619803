//! Verify request building and response parsing against the JSON vectors in
//! `test-vectors/`.
//!
//! Request vectors name a service operation, its input and the exact request
//! it must produce. Response vectors pair a raw response with the outcome
//! `parse` must report. Bodies are compared as parsed JSON so field order
//! does not matter.

use pipedrive_core::types::{
    Deal, DealCreateOptions, ListOptions, OrganizationCreateOptions, PersonSearchOptions,
    PipelineUpdateOptions,
};
use pipedrive_core::{
    parse, ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse, PipedriveClient,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/v1";

fn client() -> PipedriveClient {
    let config = ClientConfig::new("test-token")
        .with_base_url(BASE_URL)
        .with_user_agent("vectors/1.0");
    PipedriveClient::new(config).unwrap()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn input<T: DeserializeOwned>(case: &Value) -> T {
    serde_json::from_value(case["input"].clone()).unwrap()
}

/// Dispatch a vector's `operation` to the matching `build_*` method.
///
/// Option types only implement `Serialize`, so the vector inputs are mapped
/// onto them by hand.
fn build(c: &PipedriveClient, case: &Value) -> HttpRequest {
    let id = case["id"].as_u64().unwrap_or_default();
    match case["operation"].as_str().unwrap() {
        "deals.list" => {
            let raw: Value = input(case);
            let opts = ListOptions {
                start: raw["start"].as_u64(),
                limit: raw["limit"].as_u64(),
            };
            c.deals().build_list(&opts)
        }
        "deals.add" => {
            let raw: Value = input(case);
            let opts = DealCreateOptions {
                value: raw["value"].as_f64(),
                currency: raw["currency"].as_str().map(str::to_string),
                organization_id: raw["org_id"].as_u64(),
                status: serde_json::from_value(raw["status"].clone()).ok(),
                visible_to: serde_json::from_value(raw["visible_to"].clone()).ok(),
                ..DealCreateOptions::new(raw["title"].as_str().unwrap())
            };
            c.deals().build_add(&opts)
        }
        "deals.delete_multiple" => {
            let ids: Vec<u64> = input(case);
            c.deals().build_delete_multiple(&ids)
        }
        "persons.search" => {
            let raw: Value = input(case);
            let mut opts = PersonSearchOptions::new(raw["term"].as_str().unwrap());
            opts.fields = raw["fields"].as_str().map(str::to_string);
            opts.exact_match = raw["exact_match"].as_bool();
            c.persons().build_search(&opts)
        }
        "pipelines.update" => {
            let raw: Value = input(case);
            let opts = PipelineUpdateOptions {
                name: raw["name"].as_str().map(str::to_string),
                deal_probability: serde_json::from_value(raw["deal_probability"].clone()).ok(),
                active: serde_json::from_value(raw["active"].clone()).ok(),
                ..Default::default()
            };
            c.pipelines().build_update(id, &opts)
        }
        "organizations.create" => {
            let raw: Value = input(case);
            let opts = OrganizationCreateOptions {
                owner_id: raw["owner_id"].as_u64(),
                ..OrganizationCreateOptions::new(raw["name"].as_str().unwrap())
            };
            c.organizations().build_create(&opts)
        }
        other => panic!("unknown operation: {other}"),
    }
    .unwrap()
}

#[test]
fn request_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];
        let req = build(&c, case);

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
        assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");

        let body: Value = req
            .body
            .as_deref()
            .map(|b| serde_json::from_str(b).unwrap())
            .unwrap_or(Value::Null);
        assert_eq!(body, expected["body"], "{name}: body");
    }
}

#[test]
fn response_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["response"]["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["response"]["body"].as_str().unwrap().to_string(),
        };
        let expected = &case["expected"];
        let result = parse::<Deal>(response);

        match expected["kind"].as_str().unwrap() {
            "ok" => {
                let deal = result.unwrap_or_else(|e| panic!("{name}: {e}")).data;
                assert_eq!(deal.id, expected["id"].as_u64().unwrap(), "{name}: id");
                assert_eq!(deal.title, expected["title"].as_str().unwrap(), "{name}: title");
                assert_eq!(
                    deal.person_id.map(|p| p.value),
                    expected["person_id"].as_u64(),
                    "{name}: person_id"
                );
                assert_eq!(
                    deal.org_id.map(|o| o.value),
                    expected["org_id"].as_u64(),
                    "{name}: org_id"
                );
                assert_eq!(
                    deal.custom_fields.len() as u64,
                    expected["custom_field_count"].as_u64().unwrap(),
                    "{name}: custom fields"
                );
            }
            "api" => match result {
                Err(ApiError::Api { status, message, .. }) => {
                    assert_eq!(u64::from(status), expected["status"].as_u64().unwrap(), "{name}: status");
                    assert_eq!(message, expected["message"].as_str().unwrap(), "{name}: message");
                }
                other => panic!("{name}: expected Api error, got {other:?}"),
            },
            "decode" => assert!(
                matches!(result, Err(ApiError::Decode { .. })),
                "{name}: expected Decode error"
            ),
            other => panic!("{name}: unknown kind {other}"),
        }
    }
}
