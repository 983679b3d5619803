//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port, so records never
//! leak between tests, then drives `PipedriveClient` over real HTTP.

use std::sync::Once;

use pipedrive_core::types::{
    Deal, DealCreateOptions, DealStatus, DealUpdateOptions, ListOptions, PersonCreateOptions,
    PersonSearchOptions, Timestamp,
};
use pipedrive_core::{ApiError, ClientConfig, HttpMethod, PipedriveClient, TokenPlacement};

const TOKEN: &str = "integration-token";

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// Start a mock server on a random port and return its `/v1` base URL.
fn start_server() -> String {
    init_tracing();
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, TOKEN).await
        })
        .unwrap();
    });

    format!("http://{addr}/v1")
}

fn client(base_url: &str) -> PipedriveClient {
    PipedriveClient::new(ClientConfig::new(TOKEN).with_base_url(base_url)).unwrap()
}

#[test]
fn deal_lifecycle() {
    let client = client(&start_server());
    let deals = client.deals();

    // Step 1: list, which the server answers with null data.
    let listed = deals.list(&ListOptions::default()).unwrap();
    assert!(listed.data.is_empty());
    assert_eq!(listed.meta.status, 200);

    // Step 2: create.
    let opts = DealCreateOptions {
        value: Some(1500.0),
        currency: Some("USD".to_string()),
        person_id: Some(7),
        add_time: Timestamp::from_ymd_hms(2024, 3, 1, 9, 30, 0),
        ..DealCreateOptions::new("Integration deal")
    };
    let created = deals.add(&opts).unwrap().data;
    assert_eq!(created.title, "Integration deal");
    assert_eq!(created.value, 1500.0);
    assert_eq!(created.currency, "USD");
    assert_eq!(created.person_id.as_ref().map(|p| p.value), Some(7));
    assert_eq!(created.add_time.as_deref(), Some("2024-03-01 09:30:00"));
    let id = created.id;

    // Step 3: get.
    let fetched = deals.get(id).unwrap();
    assert_eq!(fetched.data, created);
    assert_eq!(fetched.meta.rate_limit_remaining(), Some(79));

    // Step 4: update.
    let update = DealUpdateOptions {
        title: Some("Renamed deal".to_string()),
        status: Some(DealStatus::Won),
        ..Default::default()
    };
    let updated = deals.update(id, &update).unwrap().data;
    assert_eq!(updated.title, "Renamed deal");
    assert_eq!(updated.status, "won");
    assert_eq!(updated.value, 1500.0);

    // Step 5: find.
    let found = deals.find("renamed").unwrap().data;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
    assert!(deals.find("nothing-matches").unwrap().data.is_empty());

    // Step 6: duplicate, then merge the copy back into the original.
    let copy = deals.duplicate(id).unwrap().data;
    assert_ne!(copy.id, id);
    let merged = deals.merge(copy.id, id).unwrap().data;
    assert_eq!(merged.id, id);

    // Step 7: delete, after which the deal is gone.
    assert_eq!(deals.delete(id).unwrap().data.id, id);
    let err = deals.get(id).unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.is_client_error());
    match err {
        ApiError::Api { message, .. } => assert!(message.starts_with("Deal not found")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn list_pages_through_pagination() {
    let client = client(&start_server());
    let deals = client.deals();
    for title in ["one", "two", "three"] {
        deals.add(&DealCreateOptions::new(title)).unwrap();
    }

    let first = deals.list(&ListOptions::page(0, 2)).unwrap();
    assert_eq!(first.data.len(), 2);
    let pagination = first.pagination().unwrap();
    assert!(pagination.has_more());
    assert_eq!(pagination.next_start(), Some(2));

    let second = deals.list(&ListOptions::page(2, 2)).unwrap();
    assert_eq!(second.data.len(), 1);
    assert!(!second.pagination().unwrap().has_more());
}

#[test]
fn delete_multiple_removes_every_listed_deal() {
    let client = client(&start_server());
    let deals = client.deals();
    let ids: Vec<u64> = ["a", "b", "c"]
        .into_iter()
        .map(|title| deals.add(&DealCreateOptions::new(title)).unwrap().data.id)
        .collect();

    let deleted = deals.delete_multiple(&ids[..2]).unwrap().data;
    assert_eq!(deleted.id, ids[..2]);

    let remaining = deals.list(&ListOptions::default()).unwrap().data;
    assert_eq!(remaining.iter().map(|d| d.id).collect::<Vec<_>>(), vec![ids[2]]);
}

#[test]
fn execute_into_keeps_destination_on_error() {
    let client = client(&start_server());
    let req = client
        .build(HttpMethod::Get, "/deals/424242", None::<&()>, None::<&()>)
        .unwrap();

    let mut dest = Deal {
        id: 1,
        title: "untouched".to_string(),
        ..Default::default()
    };
    let err = client.execute_into(&req, &mut dest).unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(dest.id, 1);
    assert_eq!(dest.title, "untouched");

    let created = client.deals().add(&DealCreateOptions::new("fresh")).unwrap().data;
    let req = client.deals().build_get(created.id).unwrap();
    let meta = client.execute_into(&req, &mut dest).unwrap();
    assert!(meta.is_success());
    assert_eq!(dest.title, "fresh");
}

#[test]
fn wrong_token_is_unauthorized() {
    let base_url = start_server();
    let client = PipedriveClient::new(ClientConfig::new("wrong").with_base_url(&base_url)).unwrap();
    let err = client.deals().list(&ListOptions::default()).unwrap_err();
    assert_eq!(err.status(), Some(401));
    match err {
        ApiError::Api { message, body, .. } => {
            assert!(message.starts_with("unauthorized access"));
            assert!(body.contains("\"success\":false"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn header_token_placement_is_accepted() {
    let base_url = start_server();
    let config = ClientConfig::new(TOKEN)
        .with_base_url(&base_url)
        .with_token_placement(TokenPlacement::Header);
    let client = PipedriveClient::new(config).unwrap();
    let req = client.deals().build_list(&ListOptions::default()).unwrap();
    assert!(req.query_value("api_token").is_none());
    assert!(client.deals().list(&ListOptions::default()).is_ok());
}

#[test]
fn closed_port_is_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = client(&format!("http://{addr}/v1"));
    let err = client.deals().get(1).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert!(err.meta().is_none());
}

#[test]
fn person_create_and_search_by_field() {
    let client = client(&start_server());
    let persons = client.persons();
    let opts = PersonCreateOptions {
        email: Some("hopper@example.com".to_string()),
        ..PersonCreateOptions::new("Grace")
    };
    let created = persons.create(&opts).unwrap().data;
    assert_eq!(created.primary_email(), Some("hopper@example.com"));
    assert_eq!(persons.get(created.id).unwrap().data.name, "Grace");

    let by_name = PersonSearchOptions::new("hopper").with_fields("name");
    assert!(persons.search(&by_name).unwrap().data.is_empty());

    let by_email = PersonSearchOptions::new("hopper").with_fields("email");
    let hits = persons.search(&by_email).unwrap().data;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, created.id);
}

#[test]
fn conversion_statistics_sends_plain_dates() {
    let client = client(&start_server());
    let stats = client
        .pipelines()
        .conversion_statistics(
            1,
            Timestamp::from_ymd(2024, 1, 1).unwrap(),
            Timestamp::from_ymd_hms(2024, 3, 31, 18, 0, 0).unwrap(),
        )
        .unwrap()
        .data;
    assert_eq!(stats.stage_conversions.len(), 2);
    assert_eq!(stats.stage_conversions[0].conversion_rate, 50.0);
    assert_eq!(stats.won_conversion, 12.5);
    assert_eq!(stats.lost_conversion, 87.5);
}
