use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

use crate::dashboard::Dashboard;

pub struct AppState {
    pub dashboard: Dashboard,
}

pub struct DashboardServer {
    state: Arc<AppState>,
}

impl DashboardServer {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            state: Arc::new(AppState { dashboard }),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/api/records", get(records_handler))
            .route("/api/figures", get(figures_handler))
            .route("/api/summary", get(summary_handler))
            .route("/health", get(health_handler))
            .with_state(self.state.clone())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }
}

async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Serving dashboard page");
    Html(state.dashboard.page())
}

async fn records_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard.records().to_vec())
}

async fn figures_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard.figures().clone())
}

async fn summary_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.dashboard.summary().clone())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "records": state.dashboard.records().len(),
    }))
}
