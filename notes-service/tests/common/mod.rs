#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use notes_service::config::{MongoConfig, NotesConfig};
use notes_service::services::{InMemoryNoteStore, MongoDb, NoteStore};
use notes_service::startup::{build_router, AppState, Application};
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

/// Router wired to an in-memory store, plus a handle on that store.
pub struct TestRouter {
    pub store: Arc<InMemoryNoteStore>,
    router: Router,
}

impl TestRouter {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryNoteStore::new()))
    }

    pub fn with_store(store: Arc<InMemoryNoteStore>) -> Self {
        let dyn_store: Arc<dyn NoteStore> = store.clone();
        let router = build_router(AppState::new(dyn_store));
        Self { store, router }
    }

    pub async fn raw(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.raw(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Creates a note through the API and returns its id.
    pub async fn create(&self, content: &str) -> String {
        let body = serde_json::json!({ "content": content }).to_string();
        let (status, json) = self.send_json(Method::POST, "/note", &body).await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", json);
        json["note"]["id"].as_str().unwrap().to_string()
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("notes_test_{}", Uuid::new_v4().simple());
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let config = NotesConfig {
            common: CoreConfig {
                port: 0, // Random port for testing
                log_level: "error".to_string(),
                otlp_endpoint: None,
            },
            mongodb: MongoConfig {
                uri: Secret::new(uri),
                database: Some(db_name.clone()),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
