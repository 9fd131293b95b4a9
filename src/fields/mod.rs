//! Field types that render custom field inputs for a variant.
//!
//! A [`FieldType`] turns one [`Field`] and its current value into input HTML.
//! Everything a field type may depend on during a render is passed in through
//! [`FieldRenderContext`]:
//!
//! - `element` - the owning variant and its product, so types can make
//!   contextual decisions (for example based on the product type)
//! - `namespace` - the input namespace the field's inputs must live under
//! - `is_fresh` - whether the value is brand-new, allowing types to seed
//!   defaults from their settings
//! - `scripts` - the buffer any initialization script must be written to
//!
//! Field type objects are shared across every render of a process and hold no
//! per-render state. Freshness is never stored on them, so one render cannot
//! leak it into the next.
//!
//! # Resolution
//!
//! [`FieldTypeRegistry`] maps type handles to implementations. A field whose
//! type handle is not registered (for example a plugin-provided type that is
//! disabled) resolves to `None` and is skipped by the renderer; this is not
//! an error.

mod builtin;

pub use builtin::{DateField, DropdownField, LightswitchField, NumberField, PlainTextField};

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::MatrixError;
use crate::models::{ElementRef, Field};
use crate::view::{ScriptBuffer, format_input_id};

/// Render-time inputs for a single field.
pub struct FieldRenderContext<'a> {
    /// Variant (real or placeholder) that owns the field, with its product.
    pub element: ElementRef<'a>,
    /// Namespace of the variant row, e.g. `variants[__VARIANT__]`.
    pub namespace: &'a str,
    /// Whether the value is brand-new and defaults may be applied.
    pub is_fresh: bool,
    /// Destination for scripts the field needs on the client.
    pub scripts: &'a mut ScriptBuffer,
}

impl FieldRenderContext<'_> {
    /// Full input name for `field`: `{namespace}[fields][{handle}]`.
    #[must_use]
    pub fn input_name(&self, field: &Field) -> String {
        format!("{}[fields][{}]", self.namespace, field.handle)
    }

    /// DOM id for `field`, derived from its input name.
    #[must_use]
    pub fn input_id(&self, field: &Field) -> String {
        format_input_id(&self.input_name(field))
    }
}

/// A renderer for one kind of custom field.
pub trait FieldType: Send + Sync {
    /// Handle fields refer to in their `field_type`.
    fn handle(&self) -> &str;

    /// Render the input HTML for `field` holding `value`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::FieldRender`] when the field's settings or value
    /// cannot be rendered.
    fn input_html(
        &self,
        field: &Field,
        value: Option<&Value>,
        ctx: &mut FieldRenderContext<'_>,
    ) -> Result<String, MatrixError>;
}

/// Registry of available field types keyed by handle.
#[derive(Clone, Default)]
pub struct FieldTypeRegistry {
    types: HashMap<String, Arc<dyn FieldType>>,
}

impl std::fmt::Debug for FieldTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut handles: Vec<&String> = self.types.keys().collect();
        handles.sort();
        f.debug_struct("FieldTypeRegistry").field("types", &handles).finish()
    }
}

impl FieldTypeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in field types registered.
    #[must_use]
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PlainTextField));
        registry.register(Arc::new(NumberField));
        registry.register(Arc::new(LightswitchField));
        registry.register(Arc::new(DropdownField));
        registry.register(Arc::new(DateField));
        registry
    }

    /// Register a field type, replacing any type with the same handle.
    pub fn register(&mut self, field_type: Arc<dyn FieldType>) {
        self.types.insert(field_type.handle().to_string(), field_type);
    }

    /// Remove a field type, e.g. when its providing plugin is disabled.
    pub fn unregister(&mut self, handle: &str) -> Option<Arc<dyn FieldType>> {
        self.types.remove(handle)
    }

    /// Resolve the type for `field`, or `None` if it is not available.
    #[must_use]
    pub fn resolve(&self, field: &Field) -> Option<&Arc<dyn FieldType>> {
        self.types.get(&field.field_type)
    }

    #[must_use]
    pub fn contains(&self, handle: &str) -> bool {
        self.types.contains_key(handle)
    }
}
