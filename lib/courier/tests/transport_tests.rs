//! Integration tests for the transports using wiremock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert2::{check, let_assert};
use bytes::Bytes;
use courier::plugins::{ActivityIndicator, ActivityPlugin, LoggingPlugin};
use courier::{
    Fixture, FixtureTransport, Fixtures, Headers, HttpRequest, HyperTransport, Method, Plugin,
    Received, Request, Transport, ValidationRule,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, method, path},
};

type Journal = Arc<Mutex<Vec<String>>>;

/// Plugin writing what it sees into a shared journal.
struct Recorder {
    name: &'static str,
    journal: Journal,
}

impl Plugin for Recorder {
    fn will_send(&self, request: &HttpRequest) {
        self.journal.lock().expect("lock").push(format!(
            "{}:will_send:{} {}",
            self.name,
            request.method(),
            request.url().path()
        ));
    }

    fn did_receive(&self, received: &Received<'_>) {
        let outcome = match (received.status(), received.error()) {
            (Some(status), _) => format!(
                "{status}:{}",
                received
                    .body()
                    .map(|body| String::from_utf8_lossy(body).into_owned())
                    .unwrap_or_default()
            ),
            (None, Some(_)) => "error".to_string(),
            (None, None) => "nothing".to_string(),
        };
        self.journal
            .lock()
            .expect("lock")
            .push(format!("{}:did_receive:{outcome}", self.name));
    }
}

fn recorders(journal: &Journal) -> [Recorder; 2] {
    ["first", "second"].map(|name| Recorder {
        name,
        journal: Arc::clone(journal),
    })
}

fn request(method: Method, url: &str) -> Request {
    Request::new(method, url::Url::parse(url).expect("url"), Headers::new())
}

#[tokio::test]
async fn hooks_fire_in_order_and_see_rejected_responses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(ResponseTemplate::new(403).set_body_string("nope"))
        .mount(&server)
        .await;

    let journal = Journal::default();
    let [first, second] = recorders(&journal);
    let transport = HyperTransport::builder()
        .plugin(first)
        .plugin(second)
        .plugin(LoggingPlugin::debug())
        .build();

    let_assert!(
        Err(err) = transport
            .send(request(Method::Get, &format!("{}/secret", server.uri())).validate_success())
            .await
    );
    check!(err.status_code() == Some(403));

    check!(
        *journal.lock().expect("lock")
            == [
                "first:will_send:GET /secret",
                "second:will_send:GET /secret",
                "first:did_receive:403:nope",
                "second:did_receive:403:nope",
            ]
    );
}

#[tokio::test]
async fn hooks_fire_on_connection_error() {
    let journal = Journal::default();
    let [first, second] = recorders(&journal);
    let transport = HyperTransport::builder()
        .plugin(first)
        .plugin(second)
        .connect_timeout(Duration::from_secs(1))
        .build();

    // Nothing listens on the discard port.
    let_assert!(
        Err(err) = transport
            .send(request(Method::Get, "http://127.0.0.1:9/unreachable"))
            .await
    );
    check!(err.is_transport());

    check!(
        *journal.lock().expect("lock")
            == [
                "first:will_send:GET /unreachable",
                "second:will_send:GET /unreachable",
                "first:did_receive:error",
                "second:did_receive:error",
            ]
    );
}

#[tokio::test]
async fn post_receive_hooks_fire_before_validation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ordered"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let journal = Journal::default();
    let [first, second] = recorders(&journal);
    let transport = HyperTransport::builder()
        .plugin(first)
        .plugin(second)
        .build();

    let rule = ValidationRule::new("journal", {
        let journal = Arc::clone(&journal);
        move |head: courier::ResponseHead<'_>| {
            journal
                .lock()
                .expect("lock")
                .push(format!("validate:{}", head.status()));
            Ok(())
        }
    });

    transport
        .send(request(Method::Get, &format!("{}/ordered", server.uri())).validate_with(rule))
        .await
        .expect("send");

    check!(
        *journal.lock().expect("lock")
            == [
                "first:will_send:GET /ordered",
                "second:will_send:GET /ordered",
                "first:did_receive:200:",
                "second:did_receive:200:",
                "validate:200",
            ]
    );
}

#[tokio::test]
async fn validation_rules_run_in_attachment_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/text"))
        .respond_with(ResponseTemplate::new(500).set_body_string("plain"))
        .mount(&server)
        .await;

    let transport = HyperTransport::new();
    let url = format!("{}/text", server.uri());

    let_assert!(
        Err(err) = transport
            .send(
                request(Method::Get, &url)
                    .validate_with(ValidationRule::content_type("application/json"))
                    .validate_success(),
            )
            .await
    );
    check!(matches!(err, courier::Error::UnacceptableContentType { .. }));

    let_assert!(
        Err(err) = transport
            .send(
                request(Method::Get, &url)
                    .validate_success()
                    .validate_with(ValidationRule::content_type("application/json")),
            )
            .await
    );
    check!(err == courier::Error::UnacceptableStatusCode { code: 500 });
}

#[tokio::test]
async fn accepted_status_passes_body_through() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/items/1"))
        .and(body_json(json!({ "name": "box" })))
        .respond_with(ResponseTemplate::new(202).set_body_string("queued"))
        .mount(&server)
        .await;

    let transport = HyperTransport::new();
    let body = transport
        .send(
            request(Method::Put, &format!("{}/items/1", server.uri()))
                .parameters_from(&json!({ "name": "box" }))
                .validate([200, 202]),
        )
        .await
        .expect("send");

    check!(body == Some(Bytes::from_static(b"queued")));
}

#[tokio::test]
async fn parameters_that_are_not_an_object_send_no_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HyperTransport::new();
    let body = transport
        .send(
            request(Method::Post, &format!("{}/echo", server.uri()))
                .parameters_from(&["not", "an", "object"])
                .validate_success(),
        )
        .await
        .expect("send");

    check!(body.is_none());
}

#[tokio::test]
async fn activity_returns_to_idle_after_concurrent_requests() {
    const REQUESTS: usize = 10;

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(100)))
        .expect(REQUESTS as u64)
        .mount(&server)
        .await;

    let transitions = Arc::new(Mutex::new(Vec::new()));
    let indicator = ActivityIndicator::with_listener({
        let transitions = Arc::clone(&transitions);
        move |active| transitions.lock().expect("lock").push(active)
    });
    let transport = Arc::new(
        HyperTransport::builder()
            .plugin(ActivityPlugin::new(indicator.clone()))
            .build(),
    );

    let url = format!("{}/slow", server.uri());
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..REQUESTS {
        let transport = Arc::clone(&transport);
        let request = request(Method::Get, &url);
        tasks.spawn(async move { transport.send(request).await });
    }
    while let Some(result) = tasks.join_next().await {
        result.expect("join").expect("send");
    }

    check!(indicator.in_flight() == 0);
    check!(!indicator.is_active());
    check!(indicator.started() == REQUESTS as u64);
    check!(indicator.finished() == REQUESTS as u64);

    let transitions = transitions.lock().expect("lock");
    check!(transitions.first() == Some(&true));
    check!(transitions.last() == Some(&false));
}

#[tokio::test(start_paused = true)]
async fn dropped_call_returns_activity_to_idle() {
    let indicator = ActivityIndicator::new();
    let journal = Journal::default();
    let [first, _] = recorders(&journal);
    let fixtures = Fixtures::new().with(
        Method::Get,
        "/slow",
        Fixture::new(200).with_delay(Duration::from_secs(5)),
    );
    let transport = FixtureTransport::builder(fixtures)
        .plugin(ActivityPlugin::new(indicator.clone()))
        .plugin(first)
        .build();

    let outcome = tokio::time::timeout(
        Duration::from_secs(1),
        transport.send(request(Method::Get, "https://api.example.com/slow")),
    )
    .await;
    check!(outcome.is_err());

    check!(indicator.in_flight() == 0);
    check!(indicator.started() == 1);
    check!(indicator.finished() == 1);
    check!(
        *journal.lock().expect("lock")
            == ["first:will_send:GET /slow", "first:did_receive:error"]
    );
}

#[tokio::test]
async fn fixture_transport_never_touches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let journal = Journal::default();
    let [first, second] = recorders(&journal);
    let fixtures = Fixtures::new().with(
        Method::Get,
        "/status",
        Fixture::new(200).with_body("ok"),
    );
    let transport = FixtureTransport::builder(fixtures)
        .plugin(first)
        .plugin(second)
        .build();

    let body = transport
        .send(request(Method::Get, &format!("{}/status", server.uri())).validate_success())
        .await
        .expect("send");

    check!(body == Some(Bytes::from_static(b"ok")));
    check!(journal.lock().expect("lock").len() == 4);
}
