//! Global constants used throughout the variant-matrix codebase.
//!
//! This module contains the default input name, template paths, client-side
//! class names and the UI strings registered for translation. Defining them
//! centrally keeps the renderer, the configuration layer and the CLI in sync.

/// Default input name (sans namespace) for the variant matrix.
pub const DEFAULT_INPUT_NAME: &str = "variants";

/// Placeholder token that stands in for a row key in the reusable field HTML.
///
/// Client script replaces this token when it stamps out a new row. It is never
/// expanded on the server.
pub const VARIANT_PLACEHOLDER: &str = "__VARIANT__";

/// Template for the outer matrix shell (one block per existing variant).
pub const MATRIX_TEMPLATE: &str = "commerce/products/_variant_matrix";

/// Template for a single variant's field inputs.
pub const MATRIX_FIELDS_TEMPLATE: &str = "commerce/products/_variant_matrix_fields";

/// File suffix tried when a template path is given without one.
pub const TEMPLATE_SUFFIX: &str = ".html";

/// Client-side controller constructed by the bootstrap statement.
pub const DEFAULT_JS_CLASS: &str = "Craft.Commerce.VariantMatrix";

/// Script resource that defines [`DEFAULT_JS_CLASS`].
pub const DEFAULT_JS_RESOURCE: &str = "commerce/js/VariantMatrix.js";

/// Translation category the matrix UI strings are registered under.
pub const DEFAULT_TRANSLATION_CATEGORY: &str = "commerce";

/// Static UI strings used by the client-side matrix controller.
pub const MATRIX_TRANSLATIONS: &[&str] = &[
    "Actions",
    "Add a variant",
    "Add variant above",
    "Are you sure you want to delete the selected variants?",
    "Collapse",
    "Default",
    "Disable",
    "Disabled",
    "Enable",
    "Expand",
    "Set as the default variant",
];

/// Name of the per-user configuration directory under the home directory.
pub const CONFIG_DIR_NAME: &str = ".variant-matrix";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "VARIANT_MATRIX_CONFIG";

/// Maximum number of "did you mean" suggestions for unknown templates.
pub const MAX_TEMPLATE_SUGGESTIONS: usize = 3;
