use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use billing::{BillingStore, ValidationMode};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Base name of the optional configuration file in the working directory.
const DEFAULT_CONFIG_NAME: &str = "octo-billing";
const DEFAULT_PORT: u16 = 3000;

/// Service settings.
///
/// Sources, later ones winning: built-in defaults, the configuration file,
/// `BILLING_*` environment variables, then CLI flags.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    /// Socket address the HTTP server binds to
    pub bind_address: String,
    /// Directory served for paths that match no API route
    pub static_dir: PathBuf,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// How required request fields are checked
    pub validation: ValidationMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            static_dir: PathBuf::from("public"),
            request_timeout_secs: 30,
            validation: ValidationMode::Truthy,
        }
    }
}

impl Settings {
    /// Load settings from the optional file at `path` (or the default file
    /// name) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("static_dir", defaults.static_dir.to_string_lossy().into_owned())?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("validation", "truthy")?
            .add_source(file)
            .add_source(Environment::with_prefix("BILLING"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        debug!(?settings, "Configuration loaded");
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `0.0.0.0:$PORT`, falling back to port 3000 when `PORT` is unset or invalid.
fn default_bind_address() -> String {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    format!("0.0.0.0:{}", port)
}

/// Initialize application state from settings
pub fn initialize_app_state(settings: Settings) -> AppState {
    info!(
        "Initializing in-memory billing store with {:?} validation",
        settings.validation
    );
    let store = BillingStore::new(settings.validation);

    AppState {
        store: Arc::new(store),
        settings: Arc::new(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert!(settings.bind_address.starts_with("0.0.0.0:"));
        assert_eq!(settings.static_dir, PathBuf::from("public"));
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.validation, ValidationMode::Truthy);
    }

    #[test]
    fn load_reads_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "octo-billing-settings-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "bind_address = \"127.0.0.1:8081\"\nvalidation = \"presence\"\nrequest_timeout_secs = 5"
        )
        .unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.bind_address, "127.0.0.1:8081");
        assert_eq!(settings.validation, ValidationMode::Presence);
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("octo-billing-does-not-exist.toml");
        assert!(Settings::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn app_state_uses_configured_validation() {
        let settings = Settings {
            validation: ValidationMode::Presence,
            ..Settings::default()
        };
        let state = initialize_app_state(settings);
        assert_eq!(state.store.validation_mode(), ValidationMode::Presence);
    }
}
