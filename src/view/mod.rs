//! Tera-backed view layer for the variant matrix.
//!
//! This module provides the templating contract the matrix renderer consumes:
//! template rendering, input id formatting, form namespacing, script-safe
//! encoding and the explicit [`PageContext`] that collects script and
//! translation output.
//!
//! # Templates
//!
//! Two templates are compiled into the crate and registered on every
//! [`View`]:
//!
//! - `commerce/products/_variant_matrix.html` - the matrix shell with one
//!   block per existing variant
//! - `commerce/products/_variant_matrix_fields.html` - one variant's inputs
//!
//! Templates are addressed without their suffix
//! (`commerce/products/_variant_matrix`); [`View::render`] tries the path as
//! given and then with `.html` appended. Because every registered name ends
//! in `.html`, Tera auto-escapes all output; pre-rendered HTML is passed
//! through with `| safe`.
//!
//! A templates directory can override or extend the built-ins. Every `*.html`
//! file below it is registered under its path relative to the directory.
//!
//! # Namespacing
//!
//! A view may carry the namespace of an enclosing form. The
//! `namespace_input_name` and `namespace_input_id` filters and the
//! corresponding methods apply it; without a namespace they are identity.

pub mod encode;
pub mod filters;
pub mod namespace;
pub mod page;

pub use encode::encode_for_script;
pub use namespace::{format_input_id, namespace_input_id, namespace_input_name, validate_input_name};
pub use page::{PageContext, ScriptBuffer};

use std::path::Path;

use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};
use walkdir::WalkDir;

use crate::constants::{MATRIX_FIELDS_TEMPLATE, MATRIX_TEMPLATE, MAX_TEMPLATE_SUGGESTIONS, TEMPLATE_SUFFIX};
use crate::core::MatrixError;

/// Maximum allowed Levenshtein distance as a percentage of the requested name length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        MATRIX_TEMPLATE,
        include_str!("../../templates/commerce/products/_variant_matrix.html"),
    ),
    (
        MATRIX_FIELDS_TEMPLATE,
        include_str!("../../templates/commerce/products/_variant_matrix_fields.html"),
    ),
];

/// Template engine plus the form namespace it renders into.
pub struct View {
    tera: Tera,
    namespace: Option<String>,
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("namespace", &self.namespace)
            .field("templates", &self.template_names())
            .finish()
    }
}

impl View {
    /// Create a view with the built-in templates only.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::TemplateRender`] if a built-in template fails to parse.
    pub fn new(namespace: Option<String>) -> Result<Self, MatrixError> {
        Self::with_templates_dir(namespace, None)
    }

    /// Create a view whose templates may be overridden from `templates_dir`.
    ///
    /// Files that cannot be read are skipped with a warning. Files that do
    /// not parse are an error.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::TemplateRender`] if any template fails to parse.
    pub fn with_templates_dir(
        namespace: Option<String>,
        templates_dir: Option<&Path>,
    ) -> Result<Self, MatrixError> {
        let namespace = namespace.filter(|ns| !ns.is_empty());
        let mut tera = Tera::default();

        tera.register_filter("input_id", filters::create_input_id_filter());
        tera.register_filter(
            "namespace_input_name",
            filters::create_namespace_name_filter(namespace.clone()),
        );
        tera.register_filter(
            "namespace_input_id",
            filters::create_namespace_id_filter(namespace.clone()),
        );

        let mut templates: Vec<(String, String)> = BUILTIN_TEMPLATES
            .iter()
            .map(|(name, content)| (format!("{name}{TEMPLATE_SUFFIX}"), (*content).to_string()))
            .collect();

        if let Some(dir) = templates_dir {
            for (name, content) in load_template_dir(dir) {
                templates.retain(|(existing, _)| existing != &name);
                tracing::debug!("Registering template override '{}'", name);
                templates.push((name, content));
            }
        }

        tera.add_raw_templates(templates).map_err(|e| MatrixError::TemplateRender {
            template: templates_dir
                .map_or_else(|| "built-in templates".to_string(), |d| d.display().to_string()),
            message: format_tera_error(&e),
        })?;

        Ok(Self {
            tera,
            namespace,
        })
    }

    /// Namespace of the enclosing form, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Nest `name` in this view's namespace.
    #[must_use]
    pub fn namespace_input_name(&self, name: &str) -> String {
        namespace_input_name(name, self.namespace())
    }

    /// Prefix `id` with this view's namespace.
    #[must_use]
    pub fn namespace_input_id(&self, id: &str) -> String {
        namespace_input_id(id, self.namespace())
    }

    /// Registered template names, sorted.
    #[must_use]
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(str::to_string).collect();
        names.sort();
        names
    }

    /// Whether `name` is one of the templates compiled into the crate.
    #[must_use]
    pub fn is_builtin(name: &str) -> bool {
        let bare = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(name);
        BUILTIN_TEMPLATES.iter().any(|(builtin, _)| *builtin == bare)
    }

    /// Resolve a template path to a registered name.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::TemplateNotFound`] with close matches when
    /// neither `path` nor `path.html` is registered.
    pub fn resolve_template(&self, path: &str) -> Result<String, MatrixError> {
        let suffixed = format!("{path}{TEMPLATE_SUFFIX}");
        for candidate in [path, suffixed.as_str()] {
            if self.tera.get_template_names().any(|name| name == candidate) {
                return Ok(candidate.to_string());
            }
        }

        Err(MatrixError::TemplateNotFound {
            template: path.to_string(),
            suggestions: self.similar_templates(path),
        })
    }

    /// Render the template at `path` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::TemplateNotFound`] for unknown templates and
    /// [`MatrixError::TemplateRender`] when Tera fails.
    pub fn render(&self, path: &str, context: &TeraContext) -> Result<String, MatrixError> {
        let name = self.resolve_template(path)?;
        tracing::debug!("Rendering template '{}'", name);

        self.tera.render(&name, context).map_err(|e| match &e.kind {
            tera::ErrorKind::TemplateNotFound(missing) => MatrixError::TemplateNotFound {
                template: missing.clone(),
                suggestions: self.similar_templates(missing),
            },
            _ => MatrixError::TemplateRender {
                template: name.clone(),
                message: format_tera_error(&e),
            },
        })
    }

    fn similar_templates(&self, target: &str) -> Vec<String> {
        let mut scored: Vec<(String, usize)> = self
            .tera
            .get_template_names()
            .map(|name| {
                let bare = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(name);
                (name.to_string(), levenshtein(target, bare))
            })
            .collect();

        scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(MAX_TEMPLATE_SUGGESTIONS)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Collect `*.html` files below `dir` as `(relative name, content)` pairs.
fn load_template_dir(dir: &Path) -> Vec<(String, String)> {
    let mut templates = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name().into_iter().filter_map(|e| match e {
        Ok(entry) => Some(entry),
        Err(err) => {
            tracing::warn!("Skipping unreadable template entry: {}", err);
            None
        }
    }) {
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some("html")
        {
            continue;
        }

        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        match std::fs::read_to_string(path) {
            Ok(content) => templates.push((name, content)),
            Err(err) => tracing::warn!("Skipping template {}: {}", path.display(), err),
        }
    }

    tracing::debug!("Loaded {} template(s) from {}", templates.len(), dir.display());
    templates
}

/// Flatten a Tera error chain into one readable message.
///
/// Tera nests the useful cause (missing variable, bad filter argument) below
/// generic "Failed to render" wrappers; those wrappers are dropped.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }

    let useful: Vec<String> = messages
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty() && !m.starts_with("Failed to render '"))
        .collect();

    if useful.is_empty() {
        error.to_string()
    } else {
        useful.join("\n  → ")
    }
}
