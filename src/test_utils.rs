#[cfg(test)]
pub mod test_utils {
    use crate::config::{initialize_app_state, Settings};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use axum_test::TestServer;
    use billing::ValidationMode;
    use std::path::PathBuf;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Settings for tests: a static directory that does not exist, so every
    /// unknown path reaches the JSON 404.
    pub fn test_settings(validation: ValidationMode) -> Settings {
        Settings {
            bind_address: "127.0.0.1:0".to_string(),
            static_dir: PathBuf::from("target/octo-billing-test-static-missing"),
            request_timeout_secs: 30,
            validation,
        }
    }

    /// Create AppState for testing
    pub fn setup_test_app_state(validation: ValidationMode) -> AppState {
        initialize_app_state(test_settings(validation))
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app_with(state: AppState) -> Router {
        let _ = init_test_tracing();
        create_router(state)
    }

    /// Test server over a fresh, empty store.
    pub fn setup_test_server() -> TestServer {
        setup_test_server_with(ValidationMode::Truthy)
    }

    pub fn setup_test_server_with(validation: ValidationMode) -> TestServer {
        setup_test_server_with_settings(test_settings(validation))
    }

    pub fn setup_test_server_with_settings(settings: Settings) -> TestServer {
        let app = setup_test_app_with(initialize_app_state(settings));
        TestServer::new(app).unwrap()
    }
}
