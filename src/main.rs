use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_mood::config::Config;
use movie_mood::handlers::{router, AppState};
use movie_mood::tmdb::TmdbClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    if config.tmdb_api_key.is_none() {
        tracing::warn!("TMDB_API_KEY is not set; genre filters will be unavailable");
    }
    let tmdb = TmdbClient::new(&config)?;

    let app = router()
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(tmdb));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
