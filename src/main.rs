use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_recommender::config::Config;
use movie_recommender::routes;
use movie_recommender::services::{
    completion::AzureCompletionClient, recommender::Recommender, store::RecommendationStore,
};
use movie_recommender::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recommender=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = RecommendationStore::connect(&config.database_url)
        .await
        .with_context(|| format!("opening database {}", config.database_url))?;

    let recommender = match config.azure.clone() {
        Some(settings) => {
            info!(deployment = %settings.deployment, endpoint = %settings.endpoint, "using Azure OpenAI completions");
            Recommender::with_completion(Arc::new(AzureCompletionClient::new(settings)))
        }
        None => {
            warn!("no completion service configured, serving mock recommendations");
            Recommender::mock()
        }
    };

    let state = Arc::new(AppState::new(store, recommender));

    if let Some(dir) = &config.static_dir {
        info!("serving frontend from {}", dir);
    }

    let app = routes::create_router(config.static_dir.as_deref())
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!("movie recommender running at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
