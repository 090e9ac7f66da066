use shared::{
    domain::TermEntry,
    error::{ApiError, ErrorCode},
};
use storage::Storage;
use tracing::error;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub fn terms_route() -> &'static str {
    "/terms"
}

pub fn healthz_route() -> &'static str {
    "/healthz"
}

/// All active terms in display order. Takes no filter or paging input.
pub async fn list_terms(ctx: &ApiContext) -> Result<Vec<TermEntry>, ApiError> {
    ctx.storage.list_active_terms().await.map_err(|err| {
        error!(error = %format!("{err:#}"), "error fetching terms");
        internal(err)
    })
}

pub async fn check_health(ctx: &ApiContext) -> Result<(), ApiError> {
    ctx.storage.health_check().await.map_err(|err| {
        error!(error = %format!("{err:#}"), "storage health check failed");
        ApiError::new(ErrorCode::Unavailable, err.to_string())
    })
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}
