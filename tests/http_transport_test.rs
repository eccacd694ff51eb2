use remote_resource::clients::ResourceOperations;
use remote_resource::config::SystemConfig;
use remote_resource::dispatcher::{Dispatcher, DEFAULT_API_PREFIX};
use remote_resource::framework::{transformers, Intent, Outcome, ResourceDescriptor};
use remote_resource::lifecycle::ResourceSystem;
use remote_resource::signals::SignalBus;
use remote_resource::transport::{HttpTransport, Method, Transport, TransportRequest};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn dispatcher_for(uri: &str) -> Dispatcher {
    let transport = HttpTransport::new(uri).unwrap();
    Dispatcher::new(Arc::new(transport), DEFAULT_API_PREFIX, SignalBus::new(8))
}

#[tokio::test]
async fn test_get_forwards_headers_and_parses_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/qfx-api/v1/widgets/7"))
        .and(header("X-Tenant", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "name": "X" })))
        .expect(1)
        .mount(&server)
        .await;

    let descriptor = ResourceDescriptor::new("widgets", "widget7")
        .with_id("7")
        .with_header("X-Tenant", "acme");
    let outcome = dispatcher_for(&server.uri())
        .execute(Intent::Get, &descriptor)
        .await;

    assert_eq!(outcome, Outcome::Success(json!({ "id": 7, "name": "X" })));
}

#[tokio::test]
async fn test_create_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/qfx-api/v1/widgets"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "new" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 8 })))
        .expect(1)
        .mount(&server)
        .await;

    let descriptor = ResourceDescriptor::new("widgets", "widgets").with_body(json!({ "name": "new" }));
    let outcome = dispatcher_for(&server.uri())
        .execute(Intent::Create, &descriptor)
        .await;

    assert_eq!(outcome, Outcome::Success(json!({ "id": 8 })));
}

#[tokio::test]
async fn test_query_option_reaches_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/qfx-api/v1/widgets/7"))
        .and(query_param("expand", "parts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let descriptor = ResourceDescriptor::new("widgets", "widget7")
        .with_id("7")
        .with_option("query", json!({ "expand": "parts" }));
    let outcome = dispatcher_for(&server.uri())
        .execute(Intent::Get, &descriptor)
        .await;

    assert_eq!(outcome, Outcome::Success(json!({ "id": 7 })));
}

#[tokio::test]
async fn test_delete_not_found_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/qfx-api/v1/widgets/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let descriptor = ResourceDescriptor::new("widgets", "widget9").with_id("9");
    let outcome = dispatcher_for(&server.uri())
        .execute(Intent::Delete, &descriptor)
        .await;

    assert_eq!(
        outcome,
        Outcome::failure("Failed to DELETE, response status [404].", Some(404))
    );
}

#[tokio::test]
async fn test_transport_reports_status_and_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/qfx-api/v1/widgets/7"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri()).unwrap();
    let response = transport
        .send(TransportRequest::new(Method::Put, "/qfx-api/v1/widgets/7"))
        .await
        .unwrap();

    assert_eq!(response.status, 422);
    assert_eq!(response.body, "invalid");
}

#[tokio::test]
async fn test_unreachable_backend_is_failure_outcome() {
    // Nothing listens on port 1.
    let outcome = dispatcher_for("http://127.0.0.1:1")
        .execute(Intent::List, &ResourceDescriptor::new("widgets", "widgets"))
        .await;

    match outcome {
        Outcome::Failure { message, status } => {
            assert!(message.starts_with("Failed to LIST"));
            assert_eq!(status, None);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_system_over_http_applies_latest_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/qfx-api/v1/widgets"))
        .and(header("X-Request", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(["slow"]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/qfx-api/v1/widgets"))
        .and(header("X-Request", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["fast"])))
        .mount(&server)
        .await;

    let system = ResourceSystem::http(&server.uri(), &SystemConfig::default()).unwrap();
    let descriptor = |tag: &str| {
        ResourceDescriptor::new("widgets", "widgets")
            .with_header("X-Request", tag)
            .with_transformer(transformers::identity)
    };

    let slow = system.client.list(descriptor("slow"));
    let fast = system.client.list(descriptor("fast"));
    fast.await.unwrap().unwrap();
    slow.await.unwrap().unwrap();

    let state = system.client.snapshot().await.unwrap();
    assert_eq!(state.get("widgets"), Some(&json!(["fast"])));
}
