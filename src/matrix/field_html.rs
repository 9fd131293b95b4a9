//! Reusable per-variant field HTML.
//!
//! [`FieldHtmlBuilder`] renders the inputs of one conceptual variant row once,
//! against a placeholder variant and the namespace `{name}[__VARIANT__]`, so
//! client script can clone it for every new row without asking the server.
//!
//! Scripts that field types register during this pass belong to a row that is
//! not in the DOM yet. They are written to a buffer private to the call and
//! returned as `foot_html`, for the client to inject when it stamps out a row.

use serde::Serialize;
use tera::Context as TeraContext;

use crate::constants::{MATRIX_FIELDS_TEMPLATE, VARIANT_PLACEHOLDER};
use crate::core::MatrixError;
use crate::fields::{FieldRenderContext, FieldTypeRegistry};
use crate::models::{ElementRef, Product, Variant};
use crate::view::{ScriptBuffer, View, format_input_id};

/// Body and foot HTML for one variant row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHtml {
    /// Rendered field inputs.
    pub body_html: String,
    /// Script block captured while rendering the body, or empty.
    pub foot_html: String,
}

/// A rendered custom field as seen by the fields template.
#[derive(Debug, Serialize)]
struct RenderedField<'a> {
    handle: &'a str,
    label: &'a str,
    instructions: Option<&'a str>,
    field_type: &'a str,
    required: bool,
    id: String,
    input_html: String,
}

/// Render the fields template for one variant row.
///
/// Walks the product's variant field layout in order. Entries whose field
/// type cannot be resolved are skipped. Scripts registered by field types go
/// to `scripts`.
pub(crate) fn render_variant_fields(
    view: &View,
    registry: &FieldTypeRegistry,
    element: ElementRef<'_>,
    namespace: &str,
    is_fresh: bool,
    scripts: &mut ScriptBuffer,
) -> Result<String, MatrixError> {
    let layout = element.product.variant_field_layout();
    let mut fields = Vec::with_capacity(layout.len());

    for entry in layout.iter() {
        let field = &entry.field;
        let Some(field_type) = registry.resolve(field) else {
            tracing::debug!(
                "Skipping field '{}': field type '{}' is not available",
                field.handle,
                field.field_type
            );
            continue;
        };

        let mut ctx = FieldRenderContext {
            element,
            namespace,
            is_fresh,
            scripts: &mut *scripts,
        };
        let id = ctx.input_id(field);
        let input_html = field_type.input_html(field, element.variant.field_value(&field.handle), &mut ctx)?;

        fields.push(RenderedField {
            handle: &field.handle,
            label: &field.name,
            instructions: field.instructions.as_deref(),
            field_type: &field.field_type,
            required: entry.required,
            id,
            input_html,
        });
    }

    tracing::debug!(
        "Rendering {} of {} field(s) under '{}' (placeholder: {})",
        fields.len(),
        layout.len(),
        namespace,
        element.is_placeholder()
    );

    let mut context = TeraContext::new();
    context.insert("namespace", namespace);
    context.insert("id", &format_input_id(namespace));
    context.insert("variant", element.variant);
    context.insert("product", element.product);
    context.insert("fields", &fields);

    view.render(MATRIX_FIELDS_TEMPLATE, &context)
}

/// Builds the reusable body/foot HTML pair for new variant rows.
#[derive(Debug, Clone, Copy)]
pub struct FieldHtmlBuilder<'a> {
    view: &'a View,
    registry: &'a FieldTypeRegistry,
}

impl<'a> FieldHtmlBuilder<'a> {
    #[must_use]
    pub const fn new(view: &'a View, registry: &'a FieldTypeRegistry) -> Self {
        Self {
            view,
            registry,
        }
    }

    /// Render one placeholder variant row for `product` under `name`.
    ///
    /// `name` is the (already namespaced) matrix input name; the row renders
    /// under `{name}[__VARIANT__]`. Every resolvable field renders as fresh.
    ///
    /// # Errors
    ///
    /// Propagates any field or template error unchanged.
    pub fn build_field_html(&self, product: &Product, name: &str) -> Result<FieldHtml, MatrixError> {
        let variant = Variant::placeholder();
        let element = ElementRef::new(&variant, product);
        let namespace = format!("{name}[{VARIANT_PLACEHOLDER}]");

        let mut capture = ScriptBuffer::new();
        let body_html =
            render_variant_fields(self.view, self.registry, element, &namespace, true, &mut capture)?;

        tracing::debug!(
            "Built variant field HTML for '{}': {} bytes, {} captured script(s)",
            product.title,
            body_html.len(),
            capture.len()
        );

        Ok(FieldHtml {
            body_html,
            foot_html: capture.to_html(),
        })
    }
}
