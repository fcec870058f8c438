// src/state.rs
use std::sync::Arc;

use crate::services::recommender::Recommender;
use crate::services::store::RecommendationStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: RecommendationStore,
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(store: RecommendationStore, recommender: Recommender) -> Self {
        Self { store, recommender }
    }
}
