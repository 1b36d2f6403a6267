use accessible_translator::{config::Config, server};
use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("accessible_translator=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting accessible translator UI server");

    server::serve(&config).await
}
