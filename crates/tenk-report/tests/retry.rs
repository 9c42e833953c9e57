use std::time::Duration;
use tenk_report::config::ReportConfig;
use tenk_report::error::{FetchFailure, ReportError};
use tenk_report::fetch::{FetchClient, Query};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ten_years() -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    for i in 0..10 {
        payload.insert(
            format!("{}", 2015 + i),
            serde_json::json!({ "assets": 100.0 + 10.0 * i as f64 }),
        );
    }
    serde_json::Value::Object(payload)
}

fn test_config(endpoint: String) -> ReportConfig {
    ReportConfig {
        endpoint,
        retry_delay: Duration::from_millis(5),
        ..Default::default()
    }
}

#[tokio::test]
async fn transient_statuses_are_retried_until_success() {
    let server = MockServer::start().await;

    // two bad gateways, then the real payload
    Mock::given(method("GET"))
        .and(path("/security/10-k/msft/"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/security/10-k/msft/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ten_years()))
        .expect(1)
        .mount(&server)
        .await;

    let client = FetchClient::new(test_config(format!("{}/security", server.uri())));
    let payload = client
        .fetch(&Query::new("10-k", "msft"))
        .await
        .expect("third attempt should succeed");
    assert_eq!(payload.len(), 10);
}

#[tokio::test]
async fn retries_exhaust_at_the_attempt_bound() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/security/10-k/msft/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(5)
        .mount(&server)
        .await;

    let client = FetchClient::new(test_config(format!("{}/security", server.uri())));
    let err = client
        .fetch(&Query::new("10-k", "msft"))
        .await
        .expect_err("all five attempts fail");

    match err {
        ReportError::Network { attempts, cause } => {
            assert_eq!(attempts, 5);
            assert!(matches!(cause, FetchFailure::HttpStatus(status) if status.as_u16() == 500));
        }
        other => panic!("expected a network error, got {other:?}"),
    }
}

#[tokio::test]
async fn refused_connections_are_transient_and_still_bounded() {
    // grab a port that nothing listens on anymore
    let endpoint = {
        let server = MockServer::start().await;
        format!("{}/security", server.uri())
    };

    let client = FetchClient::new(test_config(endpoint));
    let err = client
        .fetch(&Query::new("10-k", "msft"))
        .await
        .expect_err("nothing is listening");

    match err {
        ReportError::Network { attempts, cause } => {
            assert_eq!(attempts, 5);
            assert!(matches!(
                cause,
                FetchFailure::Connection(_) | FetchFailure::Timeout
            ));
        }
        other => panic!("expected a network error, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_bodies_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/security/10-k/msft/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&server)
        .await;

    let client = FetchClient::new(test_config(format!("{}/security", server.uri())));
    let err = client
        .fetch(&Query::new("10-k", "msft"))
        .await
        .expect_err("the body never deserializes");

    assert!(matches!(
        err,
        ReportError::Network {
            attempts: 1,
            cause: FetchFailure::Decode(_),
        }
    ));
}
