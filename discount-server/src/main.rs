mod api;
mod config;
mod discount;
mod state;

use std::sync::Arc;

use config::Config;
use state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "discount_server=info".into()),
        )
        .init();

    dotenv::dotenv().ok();

    let config = Config::from_env();

    let state = Arc::new(AppState::new(&config));

    let app = api::router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Discount server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
