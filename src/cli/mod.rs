use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

pub mod commands;

use commands::{print_openapi, serve};

#[derive(Parser)]
#[command(name = "octo-billing")]
#[command(about = "Octo Billing demo service: users, bills and payments over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080).
        /// Overrides the configuration file and BILLING_BIND_ADDRESS.
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind_address: Option<String>,

        /// Path to a configuration file (toml, yaml or json)
        ///
        /// Defaults to ./octo-billing.{toml,yaml,json} when present.
        #[arg(short, long, env = "BILLING_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the OpenAPI document to stdout
    Openapi {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OpenApiFormat::Json)]
        format: OpenApiFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OpenApiFormat {
    Json,
    Yaml,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address, config } => {
                serve(config.as_deref(), bind_address).await?;
            }
            Commands::Openapi { format } => {
                print_openapi(format)?;
            }
        }
        Ok(())
    }
}
