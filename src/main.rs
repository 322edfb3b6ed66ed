use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use log::{LevelFilter, info};
use team_games::{ScrapingContext, config::ScrapingConfig, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let scraping_config = ScrapingConfig::new()?;
    let bind_address = scraping_config.bind_address.clone();
    info!(
        "Serving {} configured seasons",
        scraping_config.seasons.len()
    );
    let context = Arc::new(ScrapingContext::new(scraping_config)?);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!("Listening on {bind_address}");
    axum::serve(listener, server::router(context))
        .await
        .context("server stopped unexpectedly")?;
    Ok(())
}
