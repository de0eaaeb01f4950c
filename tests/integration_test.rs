//! End-to-end tests against a real listener
//!
//! Each test binds an ephemeral port, drives the server with reqwest the way
//! the investigation UI's backend would, and shuts it down gracefully.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use mock_inference_server::config::{Config, LoggingConfig, ServerConfig};
use mock_inference_server::error::AppResult;
use mock_inference_server::inference::InferenceResponse;
use mock_inference_server::server::{bind, serve_with_shutdown, AppState};

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<AppResult<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".parse().unwrap(),
                port: 0,
            },
            logging: LoggingConfig::default(),
        };
        let listener = bind(config.server.socket_addr()).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::new(config));

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve_with_shutdown(listener, state, async move {
            let _ = rx.await;
        }));

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn post(&self, body: &str) -> (reqwest::StatusCode, InferenceResponse) {
        let res = reqwest::Client::new()
            .post(self.url("/"))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

fn nested(envelope: &InferenceResponse) -> Value {
    serde_json::from_str(&envelope.response).unwrap()
}

#[tokio::test]
async fn test_opening_plan_end_to_end() {
    let server = TestServer::start().await;

    let started = Instant::now();
    let (status, envelope) = server
        .post(r#"{"prompt": "\"AVAILABLE TOOLS\" PPLTool, SearchIndexTool"}"#)
        .await;
    let elapsed = started.elapsed();

    assert_eq!(status, reqwest::StatusCode::OK);
    let plan = nested(&envelope);
    assert_eq!(plan["steps"].as_array().unwrap().len(), 3);
    assert_eq!(plan["result"], "");
    assert!(elapsed >= Duration::from_millis(500), "responded after {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "responded after {:?}", elapsed);

    server.stop().await;
}

#[tokio::test]
async fn test_executor_session_cycle_end_to_end() {
    let server = TestServer::start().await;
    let body = r#"{"parameters": {"prompt": "respond with \"action_input\"", "memory_id":"s1"}}"#;

    let (_, first) = server.post(body).await;
    let first = nested(&first);
    assert!(first["action"].is_string());
    assert!(first["action_input"].is_string());
    assert!(first.get("final_answer").is_none());

    let (_, second) = server.post(body).await;
    let second = nested(&second);
    assert!(second["final_answer"].is_string());
    assert!(second.get("action").is_none());

    let (_, third) = server.post(body).await;
    assert!(nested(&third).get("action").is_some());

    server.stop().await;
}

#[tokio::test]
async fn test_planner_progression_end_to_end() {
    let server = TestServer::start().await;

    let (_, after_one) = server.post("AVAILABLE TOOLS <step-1>counted errors</step-1>").await;
    assert_eq!(nested(&after_one)["steps"].as_array().unwrap().len(), 2);

    let (_, done) = server
        .post("AVAILABLE TOOLS <step-1>a</step-1> <step-2>b</step-2> <step-3>c</step-3>")
        .await;
    let plan = nested(&done);
    assert!(plan["steps"].as_array().unwrap().is_empty());
    let result: Value = serde_json::from_str(plan["result"].as_str().unwrap()).unwrap();
    assert_eq!(result["findings"].as_array().unwrap().len(), 3);
    assert_eq!(result["hypotheses"].as_array().unwrap().len(), 2);
    assert_eq!(result["investigationName"], "HTTP Error Rate Investigation");

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_sessions_are_isolated() {
    let server = TestServer::start().await;

    let (a, b) = tokio::join!(
        server.post(r#"{"action_input": "", "memory_id": "alpha"}"#),
        server.post(r#"{"action_input": "", "memory_id": "beta"}"#),
    );
    assert!(nested(&a.1).get("action").is_some());
    assert!(nested(&b.1).get("action").is_some());

    server.stop().await;
}

#[tokio::test]
async fn test_preflight_end_to_end() {
    let server = TestServer::start().await;

    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, server.url("/any/path"))
        .header("Origin", "http://localhost:5601")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(res.headers()["access-control-allow-headers"], "Content-Type");
    assert!(res.text().await.unwrap().is_empty());

    server.stop().await;
}
