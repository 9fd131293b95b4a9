//! Shared helpers for the integration suite.

use variant_matrix::fields::{FieldType, FieldTypeRegistry};
use variant_matrix::matrix::MatrixSettings;
use variant_matrix::view::View;

use std::sync::Arc;

/// View, registry and settings a renderer borrows.
pub struct Harness {
    pub view: View,
    pub registry: FieldTypeRegistry,
    pub settings: MatrixSettings,
}

impl Harness {
    /// Built-in field types, default settings, optional form namespace.
    pub fn new(namespace: Option<&str>) -> Self {
        variant_matrix::test_utils::init_test_logging(None);
        Self {
            view: View::new(namespace.map(str::to_string)).unwrap(),
            registry: FieldTypeRegistry::with_builtin_types(),
            settings: MatrixSettings::default(),
        }
    }

    pub fn with_type(mut self, field_type: impl FieldType + 'static) -> Self {
        self.registry.register(Arc::new(field_type));
        self
    }
}

/// Decode the four arguments of a `new Class(a, b, c, d);` bootstrap statement.
pub fn bootstrap_args(statement: &str) -> Vec<String> {
    let open = statement.find('(').unwrap();
    let args = statement[open + 1..].strip_suffix(");").unwrap();
    serde_json::from_str(&format!("[{args}]")).unwrap()
}

/// Number of variant blocks in the shell HTML.
pub fn row_count(html: &str) -> usize {
    html.matches("class=\"variant-matrixblock").count()
}

/// Row ids in document order.
pub fn row_ids(html: &str) -> Vec<String> {
    html.match_indices("\" data-id=\"")
        .map(|(at, m)| {
            let rest = &html[at + m.len()..];
            rest[..rest.find('"').unwrap()].to_string()
        })
        .collect()
}
