// src/main.rs
use std::time::Duration;

use axum_server::Handle;
use polls_forms::{config::Config, logging, routes, state::AppState};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok(); // Load environment variables from .env file
    logging::init();

    let config = Config::load()?;
    let state = AppState::from_config(&config)?;
    let app = routes::create_routes(state, &config);

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    let address = config.address();
    info!("Server running on {address}");
    axum_server::bind(address)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
