//! Product and variant models consumed by the matrix renderer.
//!
//! These types mirror the commerce entities the widget edits. They are
//! read-only here: rendering never mutates a [`Product`] or its variants.
//!
//! # Product files
//!
//! The CLI loads products from TOML or JSON:
//!
//! ```toml
//! id = 12
//! title = "Tee"
//!
//! [product_type]
//! name = "Clothing"
//! handle = "clothing"
//!
//! [[product_type.variant_field_layout.entries]]
//! required = true
//! field = { handle = "color", name = "Color", field_type = "plain_text" }
//!
//! [[variants]]
//! id = 101
//! sku = "TEE-S"
//! is_default = true
//! field_values = { color = "red" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::MatrixError;

/// A product and its ordered variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    pub product_type: ProductType,
    /// Variants in display order.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// The product type owns the field layout shared by all of its variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductType {
    pub name: String,
    pub handle: String,
    #[serde(default)]
    pub variant_field_layout: FieldLayout,
}

/// One purchasable SKU of a product.
///
/// Pricing and stock are carried for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<u64>,
    #[serde(default)]
    pub unlimited_stock: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Custom field values keyed by field handle.
    #[serde(default)]
    pub field_values: BTreeMap<String, Value>,
}

const fn default_enabled() -> bool {
    true
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            sku: String::new(),
            price: None,
            stock: None,
            unlimited_stock: false,
            is_default: false,
            enabled: default_enabled(),
            field_values: BTreeMap::new(),
        }
    }
}

impl Variant {
    /// Build the throwaway variant used to render the reusable row template.
    ///
    /// The placeholder has no id and no values. It only exists so field types
    /// have an owning element to inspect; see [`ElementRef`].
    #[must_use]
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Key used in input names for this row: the id, or `new{n}` for unsaved rows.
    #[must_use]
    pub fn row_key(&self, index: usize) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => format!("new{}", index + 1),
        }
    }

    /// Value stored for a custom field, if any.
    #[must_use]
    pub fn field_value(&self, handle: &str) -> Option<&Value> {
        self.field_values.get(handle)
    }
}

/// Ordered set of custom fields. Order is the visual order of inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldLayout {
    #[serde(default)]
    pub entries: Vec<FieldLayoutEntry>,
}

impl FieldLayout {
    pub fn iter(&self) -> impl Iterator<Item = &FieldLayoutEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldLayoutEntry {
    pub field: Field,
    #[serde(default)]
    pub required: bool,
}

/// A custom field definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub instructions: Option<String>,
    /// Handle of the field type that renders this field.
    pub field_type: String,
    /// Type-specific settings (e.g. `default`, `options`).
    #[serde(default)]
    pub settings: Value,
}

impl Field {
    /// Look up a single setting by key.
    #[must_use]
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }
}

/// Borrowed "owning element" handed to field types while they render.
///
/// Pairs a variant (real or placeholder) with the product it belongs to for
/// the duration of one render call. Field types that need contextual lookups
/// (for example conditional behaviour based on the product type) go through
/// this reference rather than a stored back-pointer.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    pub variant: &'a Variant,
    pub product: &'a Product,
}

impl<'a> ElementRef<'a> {
    #[must_use]
    pub const fn new(variant: &'a Variant, product: &'a Product) -> Self {
        Self {
            variant,
            product,
        }
    }

    /// Whether the element is the placeholder used for new rows.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.variant.id.is_none() && !self.product.variants.iter().any(|v| std::ptr::eq(v, self.variant))
    }
}

impl Product {
    /// Field layout shared by every variant of this product.
    #[must_use]
    pub fn variant_field_layout(&self) -> &FieldLayout {
        &self.product_type.variant_field_layout
    }

    /// Load a product definition, choosing TOML or JSON by file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub async fn load_from(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read product from {}", path.display()))?;

        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let product = if is_json {
            Self::from_json_str(&content, path)?
        } else {
            Self::from_toml_str(&content, path)?
        };

        tracing::debug!(
            "Loaded product '{}' with {} variant(s) from {}",
            product.title,
            product.variants.len(),
            path.display()
        );
        Ok(product)
    }

    /// Parse a product from TOML.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, MatrixError> {
        toml::from_str(content).map_err(|e| MatrixError::ProductParse {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        })
    }

    /// Parse a product from JSON.
    pub fn from_json_str(content: &str, path: &Path) -> Result<Self, MatrixError> {
        serde_json::from_str(content).map_err(|e| MatrixError::ProductParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
