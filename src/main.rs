use std::sync::Arc;

use movie_rec_client::{
    api::{create_router, AppState},
    config::Config,
    services::OmdbProvider,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_rec_client=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let posters = OmdbProvider::new(
        config.require_poster_api_key()?,
        config.poster_api_url.clone(),
    );
    let state = AppState::new(Arc::new(posters));

    // Create the router with all routes
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Poster proxy listening");
    axum::serve(listener, app).await?;

    Ok(())
}
