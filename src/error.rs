// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::{recommender::RecommendError, store::StoreError};

/// Every failure a handler can hit. All of them surface as a 500 carrying the error text.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        tracing::error!(error = %detail, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": detail })),
        )
            .into_response()
    }
}
