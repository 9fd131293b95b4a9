//! Command-line interface for variant-matrix.
//!
//! The CLI renders a product's variant matrix outside of a web request, which
//! is useful for previewing template overrides and inspecting the bootstrap
//! script a page would receive.
//!
//! # Commands
//!
//! - `render` - Render the matrix for a product definition file
//! - `templates` - List the registered templates
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all logging
//! - `--config <PATH>` - Use a specific configuration file
//!
//! # Examples
//!
//! ```bash
//! # Render a product as an HTML fragment
//! variant-matrix render products/tee.toml
//!
//! # Render inside a form namespace, as JSON
//! variant-matrix render products/tee.toml --namespace fields --format json
//!
//! # Preview template overrides
//! variant-matrix templates --templates ./templates
//! ```

mod render;
mod templates;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::MatrixConfig;

/// Runtime configuration derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter to install (`None` disables logging).
    pub log_level: Option<String>,

    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the tracing subscriber for this run.
    ///
    /// `RUST_LOG` wins over the default level but not over `--verbose`.
    /// Logging goes to stderr so stdout only carries rendered output.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = if level == "warn" {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
        } else {
            EnvFilter::new(level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Render commerce variant matrix widgets.
#[derive(Parser)]
#[command(
    name = "variant-matrix",
    about = "Render commerce variant matrix widgets",
    version,
    long_about = "Renders the variant matrix editing widget for a product: the HTML shell listing every variant and the script that bootstraps the client-side controller."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to `RUST_LOG=debug`).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file.
    ///
    /// Overrides `VARIANT_MATRIX_CONFIG` and `~/.variant-matrix/config.toml`.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the variant matrix for a product definition.
    ///
    /// See [`render::RenderCommand`] for options.
    Render(render::RenderCommand),

    /// List the templates the renderer can use.
    ///
    /// See [`templates::TemplatesCommand`] for options.
    Templates(templates::TemplatesCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns any error from configuration loading or the command itself.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns any error from configuration loading or the command itself.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let matrix_config = MatrixConfig::load_with_optional(config.config_path.clone()).await?;
        matrix_config.validate()?;

        match self.command {
            Commands::Render(cmd) => cmd.execute(&matrix_config).await,
            Commands::Templates(cmd) => cmd.execute(&matrix_config),
        }
    }
}
