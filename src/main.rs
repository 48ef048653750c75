mod config;
mod routes;

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Leptos(String),
    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env()?;
    let app = routes::app().map_err(ServerError::Leptos)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        contract = %contract::CONTRACT_ADDRESS,
        chain_id = contract::REQUIRED_CHAIN_ID,
        "whitelist-dapp listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
