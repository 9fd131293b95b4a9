//! Render the variant matrix for a product definition file.
//!
//! The output mirrors what a page would receive: the head (controller
//! resource), the matrix shell, and the foot (bootstrap statement and any
//! field scripts). With `--format json` the parts are emitted separately,
//! together with the translation strings registered for the client.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::config::MatrixConfig;
use crate::fields::FieldTypeRegistry;
use crate::matrix::MatrixRenderer;
use crate::models::Product;
use crate::view::{PageContext, View};

/// Output format for `render`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Head, shell and foot concatenated into one HTML fragment.
    #[default]
    Html,
    /// A JSON object with `html`, `head`, `foot` and `translations`.
    Json,
}

/// Command to render a product's variant matrix.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Product definition (`.toml` or `.json`)
    product: PathBuf,

    /// Matrix input name, without namespace
    ///
    /// Defaults to `input_name` from the configuration file (`variants`).
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Namespace of the enclosing form
    ///
    /// # Examples
    ///
    /// ```bash
    /// variant-matrix render tee.toml --namespace fields   # id="fields-variants"
    /// ```
    #[arg(long)]
    namespace: Option<String>,

    /// Directory of template overrides
    #[arg(short = 't', long)]
    templates: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,
}

impl RenderCommand {
    /// Render and print to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the product cannot be loaded or rendering fails.
    pub async fn execute(self, config: &MatrixConfig) -> Result<()> {
        let output = self.render(config).await?;
        println!("{output}");
        Ok(())
    }

    async fn render(&self, config: &MatrixConfig) -> Result<String> {
        let product = Product::load_from(&self.product).await?;

        let namespace = self.namespace.clone().or_else(|| config.namespace.clone());
        let templates_dir = self.templates.as_deref().or(config.templates_dir.as_deref());
        let name = self.name.as_deref().unwrap_or(&config.input_name);

        let view = View::with_templates_dir(namespace, templates_dir)?;
        let registry = FieldTypeRegistry::with_builtin_types();
        let settings = config.settings();

        let mut page = PageContext::new();
        let html = MatrixRenderer::new(&view, &registry, &settings)
            .render_matrix_named(&product, name, &mut page)
            .with_context(|| format!("Failed to render variant matrix for {}", self.product.display()))?;

        match self.format {
            OutputFormat::Html => Ok([page.head_html(), html, page.foot_html()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "html": html,
                    "head": page.head_html(),
                    "foot": page.foot_html(),
                    "translations": page.translations(),
                });
                Ok(serde_json::to_string_pretty(&output)?)
            }
        }
    }
}
