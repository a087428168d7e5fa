//! Application object: explicit composition and start/stop lifecycle.
//!
//! Everything the page needs is wired here once: the layout, the callback
//! table, and the router. Nothing is registered globally.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use country_data::Dataset;
use country_info::CountryInfoSource;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::Settings;
use crate::controller::{default_bindings, Controller};
use crate::layout;
use crate::panel::PanelComposer;
use crate::routes;

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub controller: Arc<Controller>,
    pub page: Arc<String>,
    pub started_at: DateTime<Utc>,
}

pub struct App {
    settings: Settings,
    state: AppState,
}

impl App {
    pub fn new(settings: Settings, dataset: Arc<Dataset>, source: Arc<dyn CountryInfoSource>) -> Self {
        let composer = PanelComposer::new(dataset.clone(), source);
        let controller = Controller::new(default_bindings(), dataset.clone(), composer);

        let state = AppState {
            dataset,
            controller: Arc::new(controller),
            page: Arc::new(layout::page()),
            started_at: Utc::now(),
        };

        Self { settings, state }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind the listener and serve in the background
    pub async fn start(self) -> Result<AppHandle> {
        let addr = self.settings.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        let local_addr = listener.local_addr()?;

        let router = self.router();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        info!(%local_addr, debug = self.settings.debug, "dashboard listening");

        Ok(AppHandle {
            local_addr,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/figure", get(routes::get_figure))
        .route("/countries/:iso_code", get(routes::get_country))
        .route("/events", post(routes::post_event));

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .nest("/api/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Running server. Dropping the handle without `stop` leaves the task running.
pub struct AppHandle {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl AppHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.task.await.context("server task panicked")??;
        info!(local_addr = %self.local_addr, "dashboard stopped");
        Ok(())
    }
}
