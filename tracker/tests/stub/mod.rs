//! Stand-in for the remote search API, served by axum on an ephemeral port.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::Value;
use tokio::net::TcpListener;

/// Decides the reply for one request body: status, raw body, delay.
pub type Responder = Arc<dyn Fn(&Value) -> (StatusCode, String, Duration) + Send + Sync>;

pub struct StubServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl StubServer {
    pub async fn start(responder: Responder) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let bodies = Arc::new(Mutex::new(Vec::new()));

        let app = {
            let hits = hits.clone();
            let bodies = bodies.clone();
            Router::new().route(
                "/api/search",
                post(move |Json(body): Json<Value>| {
                    let hits = hits.clone();
                    let bodies = bodies.clone();
                    let responder = responder.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        bodies.lock().unwrap().push(body.clone());
                        let (status, reply, delay) = responder(&body);
                        tokio::time::sleep(delay).await;
                        (status, [("content-type", "application/json")], reply)
                    }
                }),
            )
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
            bodies,
        }
    }

    /// Always answers with the same status and body.
    pub async fn fixed(status: StatusCode, body: &str) -> Self {
        let body = body.to_string();
        Self::start(Arc::new(move |_: &Value| (status, body.clone(), Duration::ZERO))).await
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

/// An address nothing is listening on.
pub async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub const ENGINEER_REMOTE: &str = r#"{
    "jobs": [{"title": "Backend Engineer", "company": "Acme", "location": "Remote"}],
    "analysis": {"top_companies": [["Acme", 1]]}
}"#;
