//! Product fixtures.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{Field, FieldLayout, FieldLayoutEntry, Product, ProductType, Variant};

/// Builder for test products.
#[derive(Debug, Clone)]
pub struct ProductFixture {
    product: Product,
}

impl ProductFixture {
    /// A product of type "Clothing" with no fields and no variants.
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            product: Product {
                id: Some(1),
                title: title.to_string(),
                product_type: ProductType {
                    name: "Clothing".to_string(),
                    handle: "clothing".to_string(),
                    variant_field_layout: FieldLayout::default(),
                },
                variants: Vec::new(),
            },
        }
    }

    /// Append a field with no settings to the variant field layout.
    #[must_use]
    pub fn field(self, handle: &str, field_type: &str) -> Self {
        self.field_with_settings(handle, field_type, Value::Null)
    }

    /// Append a field with the given settings to the variant field layout.
    #[must_use]
    pub fn field_with_settings(mut self, handle: &str, field_type: &str, settings: Value) -> Self {
        self.push_field(handle, field_type, settings, false);
        self
    }

    /// Append a required field with no settings.
    #[must_use]
    pub fn required_field(mut self, handle: &str, field_type: &str) -> Self {
        self.push_field(handle, field_type, Value::Null, true);
        self
    }

    /// Append a variant.
    #[must_use]
    pub fn variant(self, id: Option<u64>, sku: &str) -> Self {
        self.variant_with_values(id, sku, BTreeMap::new())
    }

    /// Append a variant holding the given custom field values.
    #[must_use]
    pub fn variant_with_values(mut self, id: Option<u64>, sku: &str, values: BTreeMap<String, Value>) -> Self {
        self.product.variants.push(Variant {
            id,
            title: format!("{} {sku}", self.product.title),
            sku: sku.to_string(),
            is_default: self.product.variants.is_empty(),
            field_values: values,
            ..Variant::default()
        });
        self
    }

    /// Append `count` saved variants with ids `101..` and skus `SKU-1..`.
    #[must_use]
    pub fn variants(mut self, count: usize) -> Self {
        for n in 1..=count {
            self = self.variant(Some(100 + n as u64), &format!("SKU-{n}"));
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Product {
        self.product
    }

    /// The product as JSON, for writing product files.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.product).expect("product serializes to JSON")
    }

    fn push_field(&mut self, handle: &str, field_type: &str, settings: Value, required: bool) {
        let mut name = handle.to_string();
        if let Some(first) = name.get_mut(0..1) {
            first.make_ascii_uppercase();
        }

        self.product.product_type.variant_field_layout.entries.push(FieldLayoutEntry {
            field: Field {
                handle: handle.to_string(),
                name,
                instructions: None,
                field_type: field_type.to_string(),
                settings,
            },
            required,
        });
    }
}

/// A product with `variants` saved variants and a layout of, in order:
///
/// - `color` (`plain_text`, required, default "black")
/// - `legacy` (`disabled_plugin`, not registered anywhere)
/// - `release` (`date`, registers a datepicker script)
/// - `weight` (`number`)
#[must_use]
pub fn sample_product(variants: usize) -> Product {
    let mut fixture = ProductFixture::new("Tee").required_field("color", "plain_text");
    if let Some(color) = fixture.product.product_type.variant_field_layout.entries.last_mut() {
        color.field.settings = serde_json::json!({ "default": "black" });
    }

    fixture
        .field("legacy", "disabled_plugin")
        .field("release", "date")
        .field_with_settings("weight", "number", serde_json::json!({ "min": 0 }))
        .variants(variants)
        .build()
}
