use axum::{Json, extract::State};
use tracing::info;

use crate::{
    error::AppError,
    message::{RecommendRequest, RecommendationRecord},
    state::SharedState,
};

pub async fn recommend_handler(
    State(state): State<SharedState>,
    Json(payload): Json<RecommendRequest>,
) -> Result<Json<RecommendationRecord>, AppError> {
    let movies = state.recommender.recommend(&payload.preference).await?;
    let record = state.store.insert(&payload.preference, &movies).await?;

    info!(id = record.id, count = record.recommendations.len(), "recommendation saved");
    Ok(Json(record))
}

// Newest first, no paging.
pub async fn history_handler(
    State(state): State<SharedState>,
) -> Result<Json<Vec<RecommendationRecord>>, AppError> {
    Ok(Json(state.store.list_recent().await?))
}
