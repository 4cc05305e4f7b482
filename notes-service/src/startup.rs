//! Application startup and lifecycle management.

use crate::config::NotesConfig;
use crate::handlers;
use crate::services::{MongoDb, MongoNoteStore, NoteStore};
use axum::{
    middleware::from_fn,
    routing::get,
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{http_request_span, metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/notes", get(handlers::list_notes))
        .route("/note", axum::routing::post(handlers::create_note))
        .route(
            "/note/:id",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(http_request_span)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    db: MongoDb,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Only a malformed connection string or an unbindable port is fatal. The
    /// database ping runs in the background and its outcome is only logged.
    pub async fn build(config: NotesConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(
            config.mongodb.uri.expose_secret(),
            config.mongodb.database.as_deref(),
        )
        .await?;

        let store = MongoNoteStore::new(db.clone());
        spawn_connectivity_check(store.clone());

        let router = build_router(AppState::new(Arc::new(store)));

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            db,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &MongoDb {
        &self.db
    }

    /// Serve until SIGINT/SIGTERM, letting in-flight requests finish.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

fn spawn_connectivity_check(store: MongoNoteStore) {
    tokio::spawn(async move {
        match store.health_check().await {
            Ok(()) => tracing::info!(
                database = %store.db().database().name(),
                "Connected to MongoDB"
            ),
            Err(e) => tracing::error!(
                "Failed to connect to MongoDB, requests will fail until it is reachable: {}",
                e
            ),
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
