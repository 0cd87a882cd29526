use crate::config::Config;
use crate::omdb::{self, OmdbApi, OmdbClient};
use crate::view::{self, MovieCard};
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

#[derive(Clone)]
pub struct AppState {
    pub omdb: Arc<dyn OmdbApi>,
    pub initial_query: String,
    /// Clock used for release classification.
    pub now: fn() -> DateTime<Utc>,
}

impl AppState {
    pub fn new(omdb: Arc<dyn OmdbApi>, initial_query: impl Into<String>) -> Self {
        Self {
            omdb,
            initial_query: initial_query.into(),
            now: Utc::now,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    s: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub query: String,
    pub heading: String,
    pub results: Vec<MovieCard>,
}

pub async fn run_server(config: Config) -> Result<()> {
    let omdb: Arc<dyn OmdbApi> = Arc::new(OmdbClient::from_config(&config)?);
    info!("Using OMDb at {}", config.base_url);
    let state = AppState::new(omdb, config.initial_query.clone());

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", get(search))
        .route("/api/movies/:id", get(movie_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchPage> {
    let explicit = params
        .s
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let query = explicit
        .clone()
        .unwrap_or_else(|| state.initial_query.clone());

    let results = omdb::search_or_empty(state.omdb.as_ref(), &query).await;
    debug!("Search '{}' returned {} results", query, results.len());

    Json(SearchPage {
        heading: view::results_heading(explicit.as_deref()),
        results: results.iter().map(MovieCard::from).collect(),
        query,
    })
}

async fn movie_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(detail) = omdb::detail_or_none(state.omdb.as_ref(), &id).await else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match view::detail_view(&detail, (state.now)()) {
        Some(view) => Json(view).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
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
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
