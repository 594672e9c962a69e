//! Web form server.
//!
//! Serves the single research page and a small JSON API for integration
//! with other systems.

use crate::cli::page::{self, PageState};
use crate::cli::{preflight, Output};
use crate::config::{ServerSettings, Settings};
use crate::research::{ResearchEngine, ResearchResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared application state.
pub(crate) struct AppState {
    engine: ResearchEngine,
    server: ServerSettings,
}

/// Run the web form server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(&settings) {
        Output::warning(&format!("{}", e));
    }

    let engine = ResearchEngine::from_settings(&settings, None)?;
    let state = Arc::new(AppState {
        engine,
        server: settings.server.clone(),
    });

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Research Assistant");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Form", "GET  /");
    Output::kv("Research (JSON)", "POST /api/research");
    Output::kv("Health", "GET  /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/research", post(research_json))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
pub(crate) struct ResearchForm {
    #[serde(default)]
    query: String,
}

#[derive(Deserialize)]
pub(crate) struct ResearchRequest {
    query: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::render(&state.server, "", PageState::Idle))
}

pub(crate) async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ResearchForm>,
) -> Html<String> {
    let query = match preflight::check_query(&form.query) {
        Ok(q) => q,
        Err(_) => return Html(page::render(&state.server, &form.query, PageState::Idle)),
    };

    info!("Form research request: {}", query);

    match state.engine.research(query).await {
        Ok(response) => Html(page::render(
            &state.server,
            &form.query,
            PageState::Success(&response),
        )),
        Err(e) => {
            error!("Research failed: {}", e);
            let message = e.to_string();
            Html(page::render(
                &state.server,
                &form.query,
                PageState::Error(&message),
            ))
        }
    }
}

pub(crate) async fn research_json(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let query = preflight::check_query(&req.query).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    state.engine.research(query).await.map(Json).map_err(|e| {
        error!("Research failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })
}
