// src/routes/mod.rs
pub mod recommend;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use recommend::{history_handler, recommend_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// API routes, plus a built frontend for every other path when `static_dir` is set.
pub fn create_router(static_dir: Option<&str>) -> Router<SharedState> {
    let mut router = Router::new()
        .route("/recommend", post(recommend_handler))
        .route("/history", get(history_handler))
        .route("/health", get(|| async { "OK" }));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http())
}
