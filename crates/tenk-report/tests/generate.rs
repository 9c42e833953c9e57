use std::time::Duration;
use tenk_report::config::ReportConfig;
use tenk_report::error::{ReportError, ValidationError};
use tenk_report::fetch::Query;
use tenk_report::generator::Generator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// One entry per fiscal year, matching the backend's wire shape.
fn payload_with_years(n: usize) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    for i in 0..n {
        payload.insert(
            format!("{}", 2015 + i),
            serde_json::json!({ "assets": 100.0 + 10.0 * i as f64 }),
        );
    }
    serde_json::Value::Object(payload)
}

fn test_config(server: &MockServer) -> ReportConfig {
    ReportConfig {
        endpoint: format!("{}/security", server.uri()),
        retry_delay: Duration::from_millis(5),
        ..Default::default()
    }
}

#[tokio::test]
async fn ten_year_report_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/security/10-k/msft/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload_with_years(10)))
        .expect(1)
        .mount(&server)
        .await;

    let generator = Generator::new(test_config(&server));
    let report = generator
        .generate(Query::new("10-k", "MSFT"))
        .await
        .expect("ten years of data should generate");

    // one row per distinct year, in order
    let table = report.table();
    assert_eq!(table.len(), 10);
    let years: Vec<_> = table.years().collect();
    assert_eq!(years.first(), Some(&"2015"));
    assert_eq!(years.last(), Some(&"2024"));

    // the chart follows the same order on both axes
    let fragment = report.chart("assets").expect("assets column exists");
    assert!(fragment.html().contains("\"x\":[\"2015\",\"2016\",\"2017\""));
    assert!(fragment.html().contains("\"y\":[100.0,110.0,120.0"));
    assert!(fragment.html().contains("\"y\":[100.0,110.0,120.0,130.0,140.0,150.0,160.0,170.0,180.0,190.0]"));
}

#[tokio::test]
async fn short_payload_is_rejected_before_building() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/security/10-k/aapl/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload_with_years(5)))
        .expect(1)
        .mount(&server)
        .await;

    let generator = Generator::new(test_config(&server));
    let err = generator
        .generate(Query::new("10-k", "aapl"))
        .await
        .expect_err("five years must not pass validation");

    assert!(matches!(
        err,
        ReportError::Validation(ValidationError::TooFewYears { got: 5, need: 10 })
    ));
}

#[tokio::test]
async fn a_report_serves_many_charts_without_refetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/security/10-k/msft/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload_with_years(10)))
        .expect(1)
        .mount(&server)
        .await;

    let generator = Generator::new(test_config(&server));
    let report = generator
        .generate(Query::new("10-k", "msft"))
        .await
        .expect("should generate");

    let first = report.chart("assets").expect("assets column exists");
    let second = report.chart("assets").expect("assets column exists");
    assert_eq!(first, second);

    // a bad field becomes a placeholder without aborting its siblings
    let fragments = report.charts(["assets", "goodwill"]);
    assert_eq!(fragments.len(), 2);
    assert!(fragments[0].html().contains("Plotly.newPlot"));
    assert!(fragments[1].html().contains("no data available for goodwill"));

    // the expect(1) on the mock asserts no re-fetch happened
    server.verify().await;
}
