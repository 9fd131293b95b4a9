//! Input id formatting and form namespacing.
//!
//! The matrix may be embedded in a form that prefixes every input with its own
//! namespace. Names nest the original name inside the namespace
//! (`variants` → `fields[variants]`) and ids are prefixed with the formatted
//! namespace (`variants` → `fields-variants`).

use regex::Regex;
use std::sync::LazyLock;

use crate::core::MatrixError;

static ID_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\]\\]+").expect("static regex is valid"));

static NAME_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\[\]]+)(.*)$").expect("static regex is valid"));

/// Turn an input name into a DOM-safe id.
///
/// Every run of `[`, `]` or `\` becomes a single `-` and trailing dashes are
/// trimmed.
///
/// ```
/// use variant_matrix::view::format_input_id;
///
/// assert_eq!(format_input_id("variants"), "variants");
/// assert_eq!(format_input_id("variants[__VARIANT__]"), "variants-__VARIANT__");
/// assert_eq!(format_input_id("variants[12][fields][color]"), "variants-12-fields-color");
/// ```
#[must_use]
pub fn format_input_id(name: &str) -> String {
    ID_UNSAFE.replace_all(name, "-").trim_end_matches('-').to_string()
}

/// Check that `name` can serve as a matrix input name.
///
/// The name must be non-blank and bare: nesting belongs in the namespace, and
/// a bracketed name would yield ids and row names that do not line up.
///
/// # Errors
///
/// Returns [`MatrixError::InvalidInputName`] for a blank name or one
/// containing `[`, `]` or `\`.
///
/// ```
/// use variant_matrix::view::validate_input_name;
///
/// assert!(validate_input_name("variants").is_ok());
/// assert!(validate_input_name("").is_err());
/// assert!(validate_input_name("variants[0]").is_err());
/// ```
pub fn validate_input_name(name: &str) -> Result<(), MatrixError> {
    let reason = if name.trim().is_empty() {
        "must not be empty"
    } else if name.contains(['[', ']', '\\']) {
        "must be a bare name without brackets"
    } else {
        return Ok(());
    };

    Err(MatrixError::InvalidInputName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}

/// Nest `name` inside `namespace`.
///
/// ```
/// use variant_matrix::view::namespace_input_name;
///
/// assert_eq!(namespace_input_name("variants", Some("fields")), "fields[variants]");
/// assert_eq!(namespace_input_name("variants[new1]", Some("fields")), "fields[variants][new1]");
/// assert_eq!(namespace_input_name("variants", None), "variants");
/// ```
#[must_use]
pub fn namespace_input_name(name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => match NAME_HEAD.captures(name) {
            Some(caps) => format!("{ns}[{}]{}", &caps[1], &caps[2]),
            None => name.to_string(),
        },
        _ => name.to_string(),
    }
}

/// Prefix an input id with the formatted namespace.
///
/// ```
/// use variant_matrix::view::namespace_input_id;
///
/// assert_eq!(namespace_input_id("variants", Some("fields")), "fields-variants");
/// assert_eq!(namespace_input_id("variants", None), "variants");
/// ```
#[must_use]
pub fn namespace_input_id(id: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{}-{}", format_input_id(ns), id),
        _ => id.to_string(),
    }
}
