use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use server_api::{check_health, healthz_route, list_terms, terms_route, ApiContext};
use shared::{
    domain::TermEntry,
    error::{ApiError, ErrorCode, ErrorResponse},
};
use storage::Storage;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, normalize_database_url};

type HttpError = (StatusCode, Json<ErrorResponse>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; check directory permissions"
        );
        error
    })?;

    let state = AppState {
        api: ApiContext { storage },
    };
    let app = build_router(Arc::new(state), &settings.api_prefix);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, api_prefix = %settings.api_prefix, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, api_prefix: &str) -> Router {
    let api = Router::new().route(terms_route(), get(http_list_terms));

    let router = Router::new().route(healthz_route(), get(healthz));
    let router = if api_prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(api_prefix, api)
    };

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        )
        .with_state(state)
}

fn http_error(err: ApiError) -> HttpError {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err.into()))
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, HttpError> {
    check_health(&state.api).await.map_err(http_error)?;
    Ok("ok")
}

async fn http_list_terms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TermEntry>>, HttpError> {
    let terms = list_terms(&state.api).await.map_err(http_error)?;
    Ok(Json(terms))
}

async fn not_found(uri: Uri) -> HttpError {
    http_error(ApiError::new(
        ErrorCode::NotFound,
        format!("no route for {}", uri.path()),
    ))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
