//! variant-matrix - Commerce variant matrix rendering
//!
//! Renders the editing widget for a product's variants: an HTML shell with one
//! block per existing variant, plus the script that constructs the client-side
//! controller. The controller is handed a pre-rendered template of a new
//! variant row (rendered once against a placeholder variant under the
//! `__VARIANT__` namespace) so rows can be added without a server round trip.
//!
//! # Architecture Overview
//!
//! Rendering is a pure function of its inputs:
//! - The [`view::View`] wraps the template engine and the enclosing form's namespace
//! - The [`fields::FieldTypeRegistry`] resolves each custom field to a renderer
//! - Everything written to the page (scripts, resources, translations) goes to
//!   an explicit [`view::PageContext`] owned by the caller
//! - Whether a field renders its default value is an explicit argument, never
//!   shared state
//!
//! # Core Modules
//!
//! - [`matrix`] - [`matrix::MatrixRenderer`] and [`matrix::FieldHtmlBuilder`]
//! - [`view`] - Templates, namespacing, script-safe encoding, page output
//! - [`fields`] - Field type trait, registry and built-in field types
//! - [`models`] - Products, variants and field layouts
//! - [`config`] - Configuration file loading
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `variant-matrix` command
//!
//! # Example
//!
//! ```rust,no_run
//! use variant_matrix::fields::FieldTypeRegistry;
//! use variant_matrix::matrix::{MatrixRenderer, MatrixSettings};
//! use variant_matrix::models::Product;
//! use variant_matrix::view::{PageContext, View};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let product = Product::load_from("tee.toml".as_ref()).await?;
//! let view = View::new(None)?;
//! let registry = FieldTypeRegistry::with_builtin_types();
//! let settings = MatrixSettings::default();
//!
//! let mut page = PageContext::new();
//! let html = MatrixRenderer::new(&view, &registry, &settings).render_matrix(&product, &mut page)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// Rendering
pub mod fields;
pub mod matrix;
pub mod models;
pub mod view;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
