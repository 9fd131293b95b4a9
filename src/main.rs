//! variant-matrix CLI entry point
//!
//! Parses arguments, runs the command and reports failures with context and
//! suggestions:
//! - `render` - Render the variant matrix for a product definition
//! - `templates` - List the registered templates

use anyhow::Result;
use clap::Parser;
use variant_matrix::cli;
use variant_matrix::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
