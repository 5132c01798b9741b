use vaultlink_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaultlink=info,tower_http=info".into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage, services, routes)
    let (_state, router) = vaultlink_api::initialize_app(config.clone())?;

    // Start the server
    vaultlink_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
