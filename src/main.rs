use movie_recs_api::{
    api::{create_router, AppState},
    config::Config,
    services::sources::{load_or_sample, source_from_config},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Load the catalog once; any source failure falls back to sample data
    let source = source_from_config(&config);
    let loaded = load_or_sample(source.as_ref()).await;
    tracing::info!(
        origin = %loaded.origin,
        total_movies = loaded.catalog.len(),
        using_sample_data = loaded.origin.is_sample(),
        "Catalog ready"
    );

    let state = AppState::new(loaded, &config);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Movie recommendation API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
