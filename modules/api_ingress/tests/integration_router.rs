//! Integration tests for the API Ingress router and serve loop.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    routing::{get, post},
    Router,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tower::util::ServiceExt;

use api_ingress::{ApiIngress, ApiIngressConfig};

async fn echo(body: String) -> String {
    body
}

fn ingress(body_limit_bytes: usize) -> ApiIngress {
    ApiIngress::new(ApiIngressConfig {
        body_limit_bytes,
        ..Default::default()
    })
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_is_always_mounted() {
    let app = ApiIngress::default().build_router(Router::new());

    let resp = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let app = ApiIngress::default().build_router(Router::new());

    let resp = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "Not found");
}

#[tokio::test]
async fn body_limit_rejects_oversized_payloads() {
    let app = ingress(16).build_router(Router::new().route("/echo", post(echo)));

    let payload = "x".repeat(64);
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/echo")
                .header("content-length", payload.len())
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/echo")
                .header("content-length", 2)
                .body(Body::from("ok"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn slow_handlers_time_out_with_408() {
    let ingress = ApiIngress::new(ApiIngressConfig {
        request_timeout_sec: 1,
        ..Default::default()
    });
    let app = ingress.build_router(Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    ));

    let resp = app
        .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn serve_answers_until_cancelled() {
    let ingress = ApiIngress::default();
    let router = ingress.build_router(Router::new());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();

    let server = {
        let cancel = cancel.clone();
        tokio::spawn(async move { ingress.serve(listener, router, cancel).await })
    };

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    assert!(raw.starts_with("HTTP/1.1 200"), "unexpected response: {raw}");
    assert!(raw.to_ascii_lowercase().contains("x-request-id"));

    cancel.cancel();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop after cancellation")
        .unwrap();
    assert!(result.is_ok());
}
