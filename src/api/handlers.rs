use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::PosterResponse,
    services::clean_title,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct PosterQuery {
    pub title: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Poster lookup on behalf of the client, keeping the metadata API key server side
pub async fn poster(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<PosterQuery>,
) -> AppResult<Json<PosterResponse>> {
    let title = clean_title(params.title.as_deref().unwrap_or_default());
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        title = %title,
        provider = state.posters.name(),
        "Processing poster lookup"
    );

    let poster = state.posters.poster_url(&title).await?;

    Ok(Json(PosterResponse { title, poster }))
}
