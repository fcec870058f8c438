use std::sync::Arc;

use tracing::info;

use super::completion::{CompletionError, CompletionService};
use super::normalizer::{NormalizeError, normalize};
use crate::message::Movie;

pub const SYSTEM_PROMPT: &str = "You are a movie recommendation assistant. Return 3-5 movies as a JSON list of objects with 'title', 'description', and 'reason' keys based on the user's preference.";

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

pub fn user_prompt(preference: &str) -> String {
    format!("I like: {}", preference)
}

/// Fixed suggestions served when no completion service is configured.
pub fn mock_recommendations() -> Vec<Movie> {
    vec![
        Movie::new(
            "The Dark Knight",
            "Batman faces the Joker.",
            "Classic action with a strong lead.",
        ),
        Movie::new("Inception", "Dreams within dreams.", "Mind-bending sci-fi."),
        Movie::new(
            "Parasite",
            "A family cons their way into a rich house.",
            "Thrilling social commentary.",
        ),
    ]
}

#[derive(Clone)]
pub struct Recommender {
    completion: Option<Arc<dyn CompletionService>>,
}

impl Recommender {
    pub fn mock() -> Self {
        Self { completion: None }
    }

    pub fn with_completion(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion: Some(completion),
        }
    }

    pub async fn recommend(&self, preference: &str) -> Result<Vec<Movie>, RecommendError> {
        let Some(completion) = &self.completion else {
            return Ok(mock_recommendations());
        };

        let raw = completion
            .complete(SYSTEM_PROMPT, &user_prompt(preference))
            .await?;
        let movies = normalize(&raw)?;
        info!(count = movies.len(), "completion produced recommendations");
        Ok(movies)
    }
}
