use std::path::Path;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{initialize_app_state, Settings};
use crate::router::create_router;

pub async fn serve(config_path: Option<&Path>, bind_address: Option<String>) -> Result<()> {
    trace!("Entering serve function");
    info!("Octo Billing server starting up");

    // Load configuration
    let mut settings = match Settings::load(config_path) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };
    if let Some(bind_address) = bind_address {
        debug!("Bind address overridden from command line: {}", bind_address);
        settings.bind_address = bind_address;
    }
    let bind_address = settings.bind_address.clone();
    debug!("Static directory: {}", settings.static_dir.display());

    // Initialize application state
    trace!("Initializing application state");
    let state = initialize_app_state(settings);

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Octo Billing server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
