use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use server_api::{add_risk, list_risks, parse_stage, root, stage_status, ApiContext, RiskRegister};
use shared::{
    error::{ApiError, ApiException, ErrorCode},
    protocol::{RiskRecord, RootResponse, StageStatusResponse, API_PREFIX},
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let api = ApiContext {
        board: settings.board,
        register: RiskRegister::default(),
    };
    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "rmf backend listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/rmf/:stage", get(http_stage_status))
        .route("/risks/", get(http_list_risks).post(http_add_risk))
        .route("/risks", get(http_list_risks).post(http_add_risk));

    Router::new()
        .route("/", get(http_root))
        .route("/healthz", get(healthz))
        .nest(API_PREFIX, api)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn reject(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err.into()))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_root() -> Json<RootResponse> {
    Json(root())
}

async fn http_stage_status(
    State(state): State<Arc<AppState>>,
    Path(stage): Path<String>,
) -> ApiResult<StageStatusResponse> {
    let stage = parse_stage(&stage).map_err(reject)?;
    stage_status(&state.api, stage).map(Json).map_err(reject)
}

async fn http_list_risks(State(state): State<Arc<AppState>>) -> Json<Vec<RiskRecord>> {
    Json(list_risks(&state.api).await)
}

async fn http_add_risk(
    State(state): State<Arc<AppState>>,
    Json(record): Json<RiskRecord>,
) -> ApiResult<RiskRecord> {
    add_risk(&state.api, record).await.map(Json).map_err(reject)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
