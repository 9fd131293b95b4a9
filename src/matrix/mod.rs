//! Variant matrix rendering.
//!
//! The matrix widget is rendered in two phases:
//!
//! 1. The **shell**: a container listing every existing variant of the
//!    product, each block holding that variant's inputs. This is returned to
//!    the caller as HTML.
//! 2. The **bootstrap**: the reusable inputs of one new row (rendered once
//!    against a placeholder variant, see [`FieldHtmlBuilder`]) handed to the
//!    client controller in a single script statement, together with the
//!    resource that defines the controller and the UI strings it needs
//!    translated. These are written to the caller's [`PageContext`].
//!
//! # Example
//!
//! ```rust,no_run
//! use variant_matrix::fields::FieldTypeRegistry;
//! use variant_matrix::matrix::{MatrixRenderer, MatrixSettings};
//! use variant_matrix::models::Product;
//! use variant_matrix::view::{PageContext, View};
//!
//! # fn example(product: &Product) -> Result<(), variant_matrix::core::MatrixError> {
//! let view = View::new(Some("fields".to_string()))?;
//! let registry = FieldTypeRegistry::with_builtin_types();
//! let settings = MatrixSettings::default();
//!
//! let mut page = PageContext::new();
//! let html = MatrixRenderer::new(&view, &registry, &settings).render_matrix(product, &mut page)?;
//!
//! println!("{}\n{html}\n{}", page.head_html(), page.foot_html());
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod field_html;

pub use bootstrap::ClientBootstrap;
pub use field_html::{FieldHtml, FieldHtmlBuilder};

use serde::Serialize;
use tera::Context as TeraContext;

use crate::constants::{
    DEFAULT_INPUT_NAME, DEFAULT_JS_CLASS, DEFAULT_JS_RESOURCE, DEFAULT_TRANSLATION_CATEGORY,
    MATRIX_TEMPLATE, MATRIX_TRANSLATIONS,
};
use crate::core::MatrixError;
use crate::fields::FieldTypeRegistry;
use crate::models::{ElementRef, Product};
use crate::view::{PageContext, ScriptBuffer, View, format_input_id, validate_input_name};

use field_html::render_variant_fields;

/// Client-side names the renderer emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixSettings {
    /// Constructor invoked by the bootstrap statement.
    pub js_class: String,
    /// Script resource defining `js_class`.
    pub js_resource: String,
    /// Category the UI strings are registered under.
    pub translation_category: String,
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            js_class: DEFAULT_JS_CLASS.to_string(),
            js_resource: DEFAULT_JS_RESOURCE.to_string(),
            translation_category: DEFAULT_TRANSLATION_CATEGORY.to_string(),
        }
    }
}

/// One existing variant as seen by the shell template.
#[derive(Debug, Serialize)]
struct MatrixRow<'a> {
    key: String,
    title: &'a str,
    sku: &'a str,
    is_default: bool,
    enabled: bool,
    fields_html: String,
}

/// Renders the variant matrix widget for a product.
#[derive(Debug, Clone, Copy)]
pub struct MatrixRenderer<'a> {
    view: &'a View,
    registry: &'a FieldTypeRegistry,
    settings: &'a MatrixSettings,
}

impl<'a> MatrixRenderer<'a> {
    #[must_use]
    pub const fn new(
        view: &'a View,
        registry: &'a FieldTypeRegistry,
        settings: &'a MatrixSettings,
    ) -> Self {
        Self {
            view,
            registry,
            settings,
        }
    }

    /// Render the matrix under the default input name `variants`.
    ///
    /// # Errors
    ///
    /// See [`render_matrix_named`](Self::render_matrix_named).
    pub fn render_matrix(&self, product: &Product, page: &mut PageContext) -> Result<String, MatrixError> {
        self.render_matrix_named(product, DEFAULT_INPUT_NAME, page)
    }

    /// Render the matrix for `product` under input name `name` (sans namespace).
    ///
    /// Returns the shell HTML. The bootstrap statement, the controller
    /// resource, the translation strings and any scripts registered by the
    /// existing rows' fields are written to `page`, and only once everything
    /// has rendered: on error `page` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidInputName`] for a blank or bracketed
    /// `name`; otherwise propagates template, field and encoding errors
    /// unchanged.
    pub fn render_matrix_named(
        &self,
        product: &Product,
        name: &str,
        page: &mut PageContext,
    ) -> Result<String, MatrixError> {
        validate_input_name(name)?;
        let id = format_input_id(name);

        let mut row_scripts = ScriptBuffer::new();
        let rows = self.render_rows(product, name, &mut row_scripts)?;

        let mut context = TeraContext::new();
        context.insert("id", &id);
        context.insert("name", name);
        context.insert("variants", &rows);
        context.insert("product", product);
        let html = self.view.render(MATRIX_TEMPLATE, &context)?;

        let namespaced_name = self.view.namespace_input_name(name);
        let namespaced_id = self.view.namespace_input_id(&id);

        let FieldHtml {
            body_html,
            foot_html,
        } = FieldHtmlBuilder::new(self.view, self.registry).build_field_html(product, &namespaced_name)?;

        let bootstrap = ClientBootstrap {
            id: namespaced_id,
            body_html,
            foot_html,
            name: namespaced_name,
        }
        .to_js(&self.settings.js_class)?;

        page.scripts_mut().append(&mut row_scripts);
        page.include_js_resource(self.settings.js_resource.as_str());
        page.include_js(bootstrap);
        page.register_translations(&self.settings.translation_category, MATRIX_TRANSLATIONS);

        tracing::debug!(
            "Rendered variant matrix for '{}' with {} row(s)",
            product.title,
            rows.len()
        );

        Ok(html)
    }

    /// Render the inputs of every existing variant, in order.
    fn render_rows<'p>(
        &self,
        product: &'p Product,
        name: &str,
        scripts: &mut ScriptBuffer,
    ) -> Result<Vec<MatrixRow<'p>>, MatrixError> {
        product
            .variants
            .iter()
            .enumerate()
            .map(|(index, variant)| {
                let key = variant.row_key(index);
                let namespace = self.view.namespace_input_name(&format!("{name}[{key}]"));
                let fields_html = render_variant_fields(
                    self.view,
                    self.registry,
                    ElementRef::new(variant, product),
                    &namespace,
                    false,
                    scripts,
                )?;

                Ok(MatrixRow {
                    key,
                    title: &variant.title,
                    sku: &variant.sku,
                    is_default: variant.is_default,
                    enabled: variant.enabled,
                    fields_html,
                })
            })
            .collect()
    }
}
