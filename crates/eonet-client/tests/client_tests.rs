//! Integration tests for eonet-client.
//!
//! Each test points a real client at a scripted `mock-eonet` upstream, and
//! records backoff through a `Sleeper` instead of waiting.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use eonet_client::{AttemptFailure, EonetClient, EonetError, EventQuery, Settings, Sleeper};
use mock_eonet::{fixtures, MockUpstream, ScriptedResponse};

/// Records requested sleeps without waiting.
#[derive(Default)]
struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

fn client_for(base_url: &str, retries: u32, backoff_secs: f64) -> (EonetClient, Arc<RecordingSleeper>) {
    let sleeper = Arc::new(RecordingSleeper::default());
    let settings = Settings::new(base_url)
        .with_retries(retries, backoff_secs)
        .with_timeout_secs(5);
    let client = EonetClient::new(settings)
        .unwrap()
        .with_sleeper(sleeper.clone());
    (client, sleeper)
}

// ============================================================================
// Retry policy
// ============================================================================

#[tokio::test]
async fn test_retries_server_errors_then_succeeds() {
    let upstream = MockUpstream::start(vec![
        ScriptedResponse::status(500),
        ScriptedResponse::status(500),
        ScriptedResponse::ok(fixtures::events_payload()),
    ])
    .await
    .unwrap();
    let (client, sleeper) = client_for(upstream.base_url(), 3, 0.5);

    let payload = client.get_events(&EventQuery::default()).await.unwrap();

    assert_eq!(payload["title"], "EONET Events");
    assert_eq!(upstream.hits(), 3);
    assert_eq!(
        sleeper.sleeps(),
        vec![Duration::from_millis(500), Duration::from_millis(1000)]
    );
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::status(404)])
        .await
        .unwrap();
    let (client, sleeper) = client_for(upstream.base_url(), 3, 0.5);

    let err = client.get_categories().await.unwrap_err();

    match &err {
        EonetError::Status { url, status } => {
            assert_eq!(*status, 404);
            assert!(url.ends_with("/categories"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
    assert!(err.to_string().contains("404"));
    assert_eq!(upstream.hits(), 1);
    assert!(sleeper.sleeps().is_empty());
}

#[tokio::test]
async fn test_bad_request_is_not_retried() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::status(400)])
        .await
        .unwrap();
    let (client, sleeper) = client_for(upstream.base_url(), 5, 0.1);

    let err = client.get_events(&EventQuery::default()).await.unwrap_err();

    assert!(matches!(err, EonetError::Status { status: 400, .. }));
    assert_eq!(upstream.hits(), 1);
    assert!(sleeper.sleeps().is_empty());
}

#[tokio::test]
async fn test_exhaustion_after_configured_attempts() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::status(503)])
        .await
        .unwrap();
    let (client, sleeper) = client_for(upstream.base_url(), 2, 0.7);

    let err = client.get_sources().await.unwrap_err();

    match &err {
        EonetError::Exhausted { url, attempts, source } => {
            assert_eq!(*attempts, 2);
            assert!(url.ends_with("/sources"));
            assert!(matches!(source, AttemptFailure::Status(503)));
        }
        other => panic!("expected Exhausted error, got {other:?}"),
    }
    assert_eq!(upstream.hits(), 2);
    assert_eq!(sleeper.sleeps(), vec![Duration::from_millis(700)]);
}

#[tokio::test]
async fn test_too_many_requests_is_retried() {
    let upstream = MockUpstream::start(vec![
        ScriptedResponse::status(429),
        ScriptedResponse::ok(fixtures::categories_payload()),
    ])
    .await
    .unwrap();
    let (client, sleeper) = client_for(upstream.base_url(), 3, 1.0);

    let payload = client.get_categories().await.unwrap();

    assert!(payload["categories"].is_array());
    assert_eq!(upstream.hits(), 2);
    assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(1)]);
}

#[tokio::test]
async fn test_single_attempt_never_sleeps() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::status(502)])
        .await
        .unwrap();
    let (client, sleeper) = client_for(upstream.base_url(), 1, 1.0);

    let err = client.get_sources().await.unwrap_err();

    assert!(matches!(err, EonetError::Exhausted { attempts: 1, .. }));
    assert_eq!(upstream.hits(), 1);
    assert!(sleeper.sleeps().is_empty());
}

#[tokio::test]
async fn test_connection_failure_is_retried_then_exhausted() {
    // Grab a free port, then release it so nothing is listening there.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let (client, sleeper) = client_for(&format!("http://{addr}"), 3, 0.2);

    let err = client.get_categories().await.unwrap_err();

    match &err {
        EonetError::Exhausted { attempts, source, .. } => {
            assert_eq!(*attempts, 3);
            assert!(!matches!(source, AttemptFailure::Status(_)));
        }
        other => panic!("expected Exhausted error, got {other:?}"),
    }
    assert_eq!(
        sleeper.sleeps(),
        vec![Duration::from_millis(200), Duration::from_millis(400)]
    );
}

#[tokio::test]
async fn test_timeout_is_retried_then_exhausted() {
    let upstream = MockUpstream::start(vec![
        ScriptedResponse::ok(fixtures::events_payload()).with_delay(Duration::from_secs(3)),
    ])
    .await
    .unwrap();
    let (client, sleeper) = client_for(upstream.base_url(), 2, 0.1);
    let client = EonetClient::new(client.settings().clone().with_timeout_secs(1))
        .unwrap()
        .with_sleeper(sleeper.clone());

    let err = client.get_events(&EventQuery::default()).await.unwrap_err();

    match &err {
        EonetError::Exhausted { attempts, source, .. } => {
            assert_eq!(*attempts, 2);
            assert!(matches!(source, AttemptFailure::Timeout(_)), "{source:?}");
        }
        other => panic!("expected Exhausted error, got {other:?}"),
    }
    assert_eq!(upstream.hits(), 2);
    assert_eq!(sleeper.sleeps(), vec![Duration::from_millis(100)]);
}

// ============================================================================
// Requests and bodies
// ============================================================================

#[tokio::test]
async fn test_event_query_sends_only_set_params() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::ok(fixtures::events_payload())])
        .await
        .unwrap();
    let (client, _) = client_for(upstream.base_url(), 3, 0.0);

    let query = EventQuery::default()
        .with_category("wildfires")
        .with_status("")
        .with_days(20);
    client.get_events(&query).await.unwrap();

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/events");
    assert_eq!(
        requests[0].query_pairs(),
        vec![
            ("category".to_string(), "wildfires".to_string()),
            ("days".to_string(), "20".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_filter_values_are_url_encoded() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::ok(fixtures::events_payload())])
        .await
        .unwrap();
    let (client, _) = client_for(upstream.base_url(), 1, 0.0);

    let query = EventQuery::default()
        .with_source("Inci Web&Co")
        .with_category("a+b=c");
    client.get_events(&query).await.unwrap();

    assert_eq!(
        upstream.requests()[0].query_pairs(),
        vec![
            ("category".to_string(), "a+b=c".to_string()),
            ("source".to_string(), "Inci Web&Co".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_catalog_requests_have_no_query() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::ok(fixtures::sources_payload())])
        .await
        .unwrap();
    let (client, _) = client_for(upstream.base_url(), 3, 0.0);

    let payload = client.get_sources().await.unwrap();
    assert_eq!(payload["title"], "EONET Event Sources");

    let requests = upstream.requests();
    assert_eq!(requests[0].path, "/sources");
    assert!(requests[0].query.is_none());
    assert_eq!(
        requests[0].user_agent.as_deref(),
        Some(format!("eonet-client/{}", eonet_client::version()).as_str())
    );
}

#[tokio::test]
async fn test_base_url_path_is_preserved() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::ok(fixtures::categories_payload())])
        .await
        .unwrap();
    let (client, _) = client_for(&format!("{}/api/v3/", upstream.base_url()), 3, 0.0);

    client.get_categories().await.unwrap();
    assert_eq!(upstream.requests()[0].path, "/api/v3/categories");
}

#[tokio::test]
async fn test_non_json_body_is_invalid_and_not_retried() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::text(200, "<html>maintenance</html>")])
        .await
        .unwrap();
    let (client, sleeper) = client_for(upstream.base_url(), 3, 0.1);

    let err = client.get_events(&EventQuery::default()).await.unwrap_err();

    assert!(matches!(err, EonetError::InvalidBody { .. }));
    assert_eq!(upstream.hits(), 1);
    assert!(sleeper.sleeps().is_empty());
}

#[tokio::test]
async fn test_payload_feeds_normalizer() {
    let upstream = MockUpstream::start(vec![ScriptedResponse::ok(fixtures::events_payload())])
        .await
        .unwrap();
    let (client, _) = client_for(upstream.base_url(), 3, 0.0);

    let payload = client.get_events(&EventQuery::default()).await.unwrap();
    let normalized = eonet_normalizer::normalize_events(&payload);

    assert_eq!(normalized.count, 2);
    assert_eq!(normalized.events[0].id, "EONET_6500");
    assert_eq!(normalized.events[0].status, eonet_normalizer::EventStatus::Closed);
    assert_eq!(normalized.events[1].status, eonet_normalizer::EventStatus::Open);
}
