//! HttpFetcher and Scheduler against a local stub metrics endpoint.
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;

use sysdash::fetch::{HttpFetcher, PollError, SnapshotSource};
use sysdash::scheduler::{CycleStats, Render, Scheduler, Trigger};
use sysdash::status::Status;
use sysdash::widgets::Dashboard;

fn scenario_json() -> Value {
    json!({
        "cpu": [10, 90],
        "ram": 70,
        "disk": 40,
        "gpu": [],
        "battery": null,
        "network": {"uploadBytesPerSec": 2048, "downloadBytesPerSec": 1024}
    })
}

async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api/system")
}

#[tokio::test]
async fn fetches_and_parses_snapshot() {
    let app = Router::new().route("/api/system", get(|| async { Json(scenario_json()) }));
    let url = spawn_stub(app).await;
    let mut fetcher = HttpFetcher::new(&url).unwrap();
    let snap = fetcher.fetch().await.expect("snapshot");
    assert_eq!(snap.cpu, vec![10.0, 90.0]);
    assert!(snap.gpu.is_empty());
    assert!(snap.battery.is_none());
}

#[tokio::test]
async fn bare_base_url_reaches_metrics_path() {
    let app = Router::new().route("/api/system", get(|| async { Json(scenario_json()) }));
    let url = spawn_stub(app).await;
    let base = url.trim_end_matches("/api/system");
    let mut fetcher = HttpFetcher::new(base).unwrap();
    assert!(fetcher.fetch().await.is_ok());
}

#[tokio::test]
async fn http_500_is_a_fetch_error() {
    let app = Router::new().route(
        "/api/system",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = spawn_stub(app).await;
    let err = HttpFetcher::new(&url).unwrap().fetch().await.unwrap_err();
    assert!(err.is_fetch());
    assert!(matches!(err, PollError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn html_body_is_a_parse_error() {
    let app = Router::new().route("/api/system", get(|| async { "<html>not json</html>" }));
    let url = spawn_stub(app).await;
    let err = HttpFetcher::new(&url).unwrap().fetch().await.unwrap_err();
    assert!(err.is_parse(), "{err}");
}

#[tokio::test]
async fn missing_mandatory_field_is_a_parse_error() {
    let app = Router::new().route(
        "/api/system",
        get(|| async { Json(json!({"cpu": [1], "ram": 1, "disk": 1, "gpu": []})) }),
    );
    let url = spawn_stub(app).await;
    let err = HttpFetcher::new(&url).unwrap().fetch().await.unwrap_err();
    assert!(err.is_parse(), "{err}");
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = HttpFetcher::new(&format!("http://{addr}/api/system"))
        .unwrap()
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, PollError::Transport(_)), "{err}");
}

struct Ticks(mpsc::UnboundedReceiver<()>);

impl Trigger for Ticks {
    async fn tick(&mut self) -> bool {
        self.0.recv().await.is_some()
    }
}

#[derive(Default)]
struct Recorder(VecDeque<Dashboard>);

impl Render for Recorder {
    fn render(&mut self, dashboard: &Dashboard) -> io::Result<()> {
        self.0.push_back(dashboard.clone());
        Ok(())
    }
}

async fn flaky(State(hits): State<Arc<AtomicUsize>>) -> Response {
    // second request fails
    if hits.fetch_add(1, Ordering::SeqCst) == 1 {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
    } else {
        Json(scenario_json()).into_response()
    }
}

#[tokio::test]
async fn server_error_skips_one_render_and_polling_continues() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/api/system", get(flaky))
        .with_state(hits.clone());
    let url = spawn_stub(app).await;

    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(()).unwrap();
    tx.send(()).unwrap();
    drop(tx);

    let (mut scheduler, _cancel) = Scheduler::new(HttpFetcher::new(&url).unwrap(), Ticks(rx));
    let mut dash = Dashboard::new();
    let mut rec = Recorder::default();
    let stats = scheduler.run(&mut dash, &mut rec).await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(
        stats,
        CycleStats {
            cycles: 3,
            applied: 2,
            failed: 1
        }
    );
    assert_eq!(rec.0.len(), 2);
    assert_eq!(dash.cycles_applied(), 2);
    assert_eq!(dash.cpu.status, Status::Red);
    assert_eq!(dash.ram.status, Status::Amber);
    assert_eq!(dash.disk.status, Status::Green);
    // one sample per applied snapshot, none for the failed cycle
    assert_eq!(dash.net.window.len(), 2);
}
