use anyhow::{Context, Result};
use feed_api::{AppState, app, config::Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let addr = config.bind_addr.clone();

    let state = AppState::new(config);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Server running on http://{}", addr);
    info!("API Endpoints:");
    info!("  GET    /health                        - Health check");
    info!("  GET    /users/me                      - Current user (auth)");
    info!("  POST   /posts                         - Create post (auth)");
    info!("  GET    /posts                         - List posts (paginated)");
    info!("  GET    /posts/{{id}}                    - Get specific post");
    info!("  DELETE /posts/{{id}}                    - Delete post (auth, author only)");
    info!("  GET    /profile/{{username}}/           - Author profile");
    info!("  GET    /profile/{{username}}/follow     - Follow author (auth)");
    info!("  GET    /profile/{{username}}/unfollow   - Unfollow author (auth)");
    info!("  POST   /groups                        - Create group (auth)");
    info!("  GET    /group/{{slug}}/                 - Posts in a group (paginated)");
    info!("  GET    /follow/                       - Feed of followed authors (auth)");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
