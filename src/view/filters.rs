//! Custom Tera filters for matrix templates.
//!
//! - `input_id`: format an input name as a DOM id
//!   (`{{ namespace | input_id }}`)
//! - `namespace_input_name`: nest a name inside the view's form namespace
//!   (`{{ name | namespace_input_name }}`)
//! - `namespace_input_id`: prefix an id with the view's form namespace
//!   (`{{ id | namespace_input_id }}`)
//!
//! The namespacing filters capture the namespace of the [`View`](super::View)
//! they are registered on.

use std::collections::HashMap;

use super::namespace::{format_input_id, namespace_input_id, namespace_input_name};

fn string_arg<'a>(filter: &str, value: &'a tera::Value) -> tera::Result<&'a str> {
    value.as_str().ok_or_else(|| tera::Error::msg(format!("{filter} filter requires a string")))
}

/// Create the `input_id` filter.
pub fn create_input_id_filter() -> impl tera::Filter + 'static {
    |value: &tera::Value, _args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let name = string_arg("input_id", value)?;
        Ok(tera::Value::String(format_input_id(name)))
    }
}

/// Create the `namespace_input_name` filter bound to `namespace`.
pub fn create_namespace_name_filter(namespace: Option<String>) -> impl tera::Filter + 'static {
    move |value: &tera::Value, _args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let name = string_arg("namespace_input_name", value)?;
        Ok(tera::Value::String(namespace_input_name(name, namespace.as_deref())))
    }
}

/// Create the `namespace_input_id` filter bound to `namespace`.
pub fn create_namespace_id_filter(namespace: Option<String>) -> impl tera::Filter + 'static {
    move |value: &tera::Value, _args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
        let id = string_arg("namespace_input_id", value)?;
        Ok(tera::Value::String(namespace_input_id(id, namespace.as_deref())))
    }
}
