//! The HTTP action driven through the orchestrator.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use graceful_shutdown::config::HttpConfig;
use graceful_shutdown::lifecycle::{
    GracefulShutdown, Level, Shutdown, ShutdownError, StartFailurePolicy,
};
use graceful_shutdown::HttpServer;

fn config(bind_address: &str) -> HttpConfig {
    HttpConfig {
        enabled: true,
        bind_address: bind_address.to_string(),
        request_timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_http_action_serves_until_shutdown() {
    let server = Arc::new(HttpServer::new(config("127.0.0.1:0")));
    let mut gs = GracefulShutdown::new()
        .with_shutdown_timeout(Duration::from_secs(5))
        .with_start_failure_policy(StartFailurePolicy::Propagate);

    gs.register(server.clone(), Level::High).await.unwrap();
    let addr = server.local_addr().expect("bound after start");

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client.get(format!("http://{}/health", addr)).send().await.expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "OK");

    let shutdown = Shutdown::new();
    let run = tokio::spawn(gs.run_until(shutdown.subscribe()));
    shutdown.trigger();

    let report = run.await.unwrap().unwrap();
    assert_eq!(report.stopped, 1);

    assert!(client.get(format!("http://{}/health", addr)).send().await.is_err());
}

#[tokio::test]
async fn test_taken_port_fails_registration() {
    let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = occupied.local_addr().unwrap();

    let mut gs = GracefulShutdown::new().with_start_failure_policy(StartFailurePolicy::Propagate);
    let err = gs
        .register(Arc::new(HttpServer::new(config(&addr.to_string()))), Level::High)
        .await
        .unwrap_err();

    assert_eq!(err.action(), "http-server");
    assert_eq!(gs.action_count(), 0);
}

#[tokio::test]
async fn test_drain_past_deadline_reports_timeout() {
    let routes = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            "done"
        }),
    );
    let server = Arc::new(HttpServer::with_router(config("127.0.0.1:0"), routes));
    let mut gs = GracefulShutdown::new()
        .with_shutdown_timeout(Duration::from_millis(300))
        .with_start_failure_policy(StartFailurePolicy::Propagate);

    gs.register(server.clone(), Level::High).await.unwrap();
    let addr = server.local_addr().unwrap();

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let in_flight = tokio::spawn(async move { client.get(format!("http://{}/slow", addr)).send().await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let err = gs.shutdown().await.unwrap_err();

    match err {
        ShutdownError::TimedOut { pending, stopped, .. } => {
            assert_eq!(pending, "http-server");
            assert_eq!(stopped, 0);
        }
        other => panic!("expected timeout, got {other}"),
    }

    in_flight.abort();
}
