// src/message.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub preference: String,
}

/// A single suggested movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub description: String,
    pub reason: String,
}

impl Movie {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            reason: reason.into(),
        }
    }
}

/// One persisted submission and the movies returned for it.
/// Serves as both the `/recommend` response and a `/history` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub id: i64,
    pub user_input: String,
    pub recommendations: Vec<Movie>,
    pub timestamp: DateTime<Utc>,
}
