//! Link reachability probing against mock servers

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use url::Url;
use web_analyzer::analyzer::{check_links, LinkCheckSettings, ProbeOutcome, Prober};
use web_analyzer::config::Config;
use web_analyzer::Analyzer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn settings(max_workers: usize, deadline: Duration, probe_timeout: Duration) -> LinkCheckSettings {
    LinkCheckSettings {
        max_workers,
        deadline,
        probe_timeout,
        max_redirects: 3,
    }
}

fn prober(settings: &LinkCheckSettings) -> Prober {
    Prober::new(settings, "TestAnalyzer/1.0").expect("Failed to create prober")
}

fn base_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Failed to parse mock server URI")
}

async fn mount_page(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_all_links_not_found() {
    let mock_server = MockServer::start().await;
    let port = base_url(&mock_server)
        .port()
        .expect("Mock server URI has a port");

    // "localhost" is a different host from "127.0.0.1", so these links are external
    mount_page(
        &mock_server,
        format!(
            r#"<html><body>
        <a href="/gone-1">1</a>
        <a href="/gone-2">2</a>
        <a href="gone-3">3</a>
        <a href="http://localhost:{port}/gone-4">4</a>
        <a href="http://localhost:{port}/gone-5">5</a>
        <a href="http://LOCALHOST:{port}/gone-6">6</a>
        </body></html>"#
        ),
    )
    .await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .expect(6)
        .mount(&mock_server)
        .await;

    let analyzer = Analyzer::new(Config::default()).expect("Failed to create analyzer");
    let report = analyzer
        .analyze(&format!("{}/", mock_server.uri()))
        .await
        .expect("Broken links never fail the analysis");

    assert_eq!(report.internal_link_count, 3);
    assert_eq!(report.external_link_count, 3);
    assert_eq!(report.inaccessible_link_count, 6);
    assert!(!report.link_check_truncated);
}

#[tokio::test]
async fn test_zero_links_makes_no_requests() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "<!DOCTYPE html><html><body><h1>No links</h1><a>anchor only</a></body></html>"
            .to_string(),
    )
    .await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let analyzer = Analyzer::new(Config::default()).expect("Failed to create analyzer");
    let report = analyzer
        .analyze(&format!("{}/", mock_server.uri()))
        .await
        .expect("Analysis should succeed");

    assert_eq!(report.internal_link_count, 0);
    assert_eq!(report.external_link_count, 0);
    assert_eq!(report.inaccessible_link_count, 0);
    assert!(!report.link_check_truncated);
}

#[tokio::test]
async fn test_head_error_status_does_not_fall_back_to_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let settings = LinkCheckSettings::default();
    let outcome = prober(&settings)
        .probe("/no-head", &base_url(&mock_server))
        .await;

    assert_eq!(outcome, ProbeOutcome::Broken { status: 405 });
    assert!(!outcome.is_accessible());
}

#[tokio::test]
async fn test_head_timeout_falls_back_to_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/slow-head"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow-head"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = settings(4, Duration::from_secs(10), Duration::from_millis(300));
    let outcome = prober(&settings)
        .probe("/slow-head", &base_url(&mock_server))
        .await;

    assert_eq!(outcome, ProbeOutcome::Reachable { status: 200 });
}

#[tokio::test]
async fn test_get_fallback_error_status_is_broken() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let settings = settings(4, Duration::from_secs(10), Duration::from_millis(300));
    let outcome = prober(&settings)
        .probe("/flaky", &base_url(&mock_server))
        .await;

    assert_eq!(outcome, ProbeOutcome::Broken { status: 503 });
}

#[tokio::test]
async fn test_both_requests_timing_out_fails_probe() {
    let mock_server = MockServer::start().await;

    Mock::given(path("/stalled"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let settings = settings(4, Duration::from_secs(10), Duration::from_millis(200));
    let outcome = prober(&settings)
        .probe("/stalled", &base_url(&mock_server))
        .await;

    assert!(matches!(outcome, ProbeOutcome::Failed { .. }));
}

#[tokio::test]
async fn test_redirects_followed_up_to_limit() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    // /hop-1 -> /hop-2 -> /hop-3 -> /hop-4 -> /hop-5
    for hop in 1..=4 {
        Mock::given(path(format!("/hop-{}", hop)))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/hop-{}", uri, hop + 1).as_str()),
            )
            .mount(&mock_server)
            .await;
    }
    Mock::given(path("/hop-5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let settings = LinkCheckSettings::default();
    let outcome = prober(&settings)
        .probe("/hop-1", &base_url(&mock_server))
        .await;

    // Three hops are followed; the fourth redirect response is taken as-is
    assert_eq!(outcome, ProbeOutcome::Reachable { status: 302 });
}

#[tokio::test]
async fn test_redirect_to_missing_page_is_broken() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(path("/moved"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/gone", uri).as_str()),
        )
        .mount(&mock_server)
        .await;
    Mock::given(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let settings = LinkCheckSettings::default();
    let outcome = prober(&settings)
        .probe("/moved", &base_url(&mock_server))
        .await;

    assert_eq!(outcome, ProbeOutcome::Broken { status: 410 });
}

#[tokio::test]
async fn test_shared_deadline_truncates_link_check() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        r#"<html><body>
        <a href="/slow-1">1</a>
        <a href="/slow-2">2</a>
        <a href="/slow-3">3</a>
        <a href="/slow-4">4</a>
        <a href="/slow-5">5</a>
        <a href="/slow-6">6</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let analyzer = Analyzer::with_link_settings(
        Config::default(),
        settings(2, Duration::from_millis(400), Duration::from_secs(20)),
    )
    .expect("Failed to create analyzer");

    let started = Instant::now();
    let report = analyzer
        .analyze(&format!("{}/", mock_server.uri()))
        .await
        .expect("A deadline never fails the analysis");

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(report.link_check_truncated);
    assert!(report.checked_link_count() < 6);
}

#[tokio::test]
async fn test_duplicate_links_are_each_probed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/same"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let settings = settings(1, Duration::from_secs(10), Duration::from_secs(5));
    let links = vec!["/same".to_string(), "/same".to_string(), "/same".to_string()];
    let tally = check_links(links, &base_url(&mock_server), &prober(&settings), &settings).await;

    assert_eq!(tally.internal, 3);
    assert_eq!(tally.external, 0);
    assert_eq!(tally.inaccessible, 0);
    assert!(!tally.deadline_exceeded);
}

#[tokio::test]
async fn test_non_http_links_are_not_requested() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let settings = LinkCheckSettings::default();
    let links = vec![
        "mailto:someone@example.com".to_string(),
        "tel:+15555550100".to_string(),
        "javascript:void(0)".to_string(),
    ];
    let tally = check_links(links, &base_url(&mock_server), &prober(&settings), &settings).await;

    assert_eq!(tally.external, 3);
    assert_eq!(tally.inaccessible, 0);
}

#[tokio::test]
async fn test_pool_smaller_than_link_count_checks_everything() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let settings = settings(2, Duration::from_secs(10), Duration::from_secs(5));
    let links: Vec<String> = (0..10)
        .map(|i| if i % 2 == 0 { "/ok" } else { "/bad" }.to_string())
        .collect();
    let tally = check_links(links, &base_url(&mock_server), &prober(&settings), &settings).await;

    assert_eq!(tally.checked(), 10);
    assert_eq!(tally.inaccessible, 5);
}

/// Answers after a fixed delay and records when each request arrived
///
/// A worker sends its next request only after the previous response, so
/// arrivals less than one delay apart come from different workers.
struct SlowResponder {
    delay: Duration,
    arrivals: Arc<Mutex<Vec<Instant>>>,
}

/// Largest number of requests that arrived within one delay of each other
fn peak_in_flight(arrivals: &[Instant], delay: Duration) -> usize {
    arrivals
        .iter()
        .map(|&at| {
            arrivals
                .iter()
                .filter(|&&other| other <= at && at.duration_since(other) < delay)
                .count()
        })
        .max()
        .unwrap_or(0)
}

impl Respond for SlowResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.arrivals
            .lock()
            .expect("arrivals lock poisoned")
            .push(Instant::now());
        ResponseTemplate::new(404).set_delay(self.delay)
    }
}

#[tokio::test]
async fn test_in_flight_probes_never_exceed_pool_size() {
    let mock_server = MockServer::start().await;
    let arrivals = Arc::new(Mutex::new(Vec::new()));
    let delay = Duration::from_millis(150);

    Mock::given(method("HEAD"))
        .respond_with(SlowResponder {
            delay,
            arrivals: Arc::clone(&arrivals),
        })
        .expect(40)
        .mount(&mock_server)
        .await;

    let settings = settings(5, Duration::from_secs(30), Duration::from_secs(5));
    let links: Vec<String> = (0..40).map(|i| format!("/page-{}", i)).collect();
    let tally = check_links(links, &base_url(&mock_server), &prober(&settings), &settings).await;

    assert_eq!(tally.checked(), 40);
    assert_eq!(tally.inaccessible, 40);
    assert!(!tally.deadline_exceeded);

    let peak = peak_in_flight(&arrivals.lock().expect("arrivals lock poisoned"), delay);
    assert!(peak <= settings.max_workers, "peak of {} in-flight probes", peak);
    assert!(peak > 1, "probes should overlap");
}
