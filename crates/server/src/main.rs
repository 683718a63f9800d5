use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::AnalyzeResponse,
};
use tracing::info;

mod config;
mod scorer;

use config::load_settings;
use scorer::AnxietyScorer;

#[derive(Clone)]
struct AppState {
    scorer: Arc<AnxietyScorer>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let state = AppState {
        scorer: Arc::new(AnxietyScorer::new()),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "scoring server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn predict(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<ApiError>)> {
    // The body is inspected by hand so that a present-but-wrong-type or
    // absent "text" yields the JSON error envelope rather than a bare 4xx.
    let Some(text) = body.get("text").and_then(|v| v.as_str()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                ErrorCode::Validation,
                "missing 'text' in request body",
            )),
        ));
    };

    let anxiety_score = state.scorer.score(text);
    info!(
        chars = text.chars().count(),
        score = anxiety_score,
        "scored analyze request"
    );
    Ok(Json(AnalyzeResponse { anxiety_score }))
}
