//! Error handling for variant-matrix
//!
//! This module provides the error type returned by the rendering pipeline and
//! the user-friendly error reporting used by the CLI. The error system follows
//! two principles:
//! 1. **Strongly-typed errors** so callers can tell a missing template from a
//!    failing field type or an encoding failure
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`MatrixError`] - Enumerated error types for every failure of a render
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Library APIs return `Result<T, MatrixError>` and never recover locally: a
//! template or field failure aborts the whole render and surfaces unchanged.
//! The CLI converts any [`anyhow::Error`] into an [`ErrorContext`] through
//! [`user_friendly_error`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use variant_matrix::core::{MatrixError, ErrorContext};
//!
//! let context = ErrorContext::new(MatrixError::TemplateNotFound {
//!     template: "commerce/products/_matrix".to_string(),
//!     suggestions: vec!["commerce/products/_variant_matrix.html".to_string()],
//! })
//! .with_suggestion("Check the template name or the --templates directory");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for variant matrix rendering.
///
/// # Error Categories
///
/// ## Templating
/// - [`TemplateNotFound`] - The requested template is not registered
/// - [`TemplateRender`] - Tera failed to parse or render a template
///
/// ## Fields
/// - [`FieldRender`] - A field type failed to produce its input HTML
///
/// ## Output
/// - [`Encoding`] - A value could not be encoded for embedding in a script
///
/// ## Inputs
/// - [`InvalidInputName`] - The matrix input name cannot form a usable id or name
/// - [`ProductParse`] - A product definition file is malformed
/// - [`ConfigError`] - Configuration is invalid
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
///
/// [`TemplateNotFound`]: MatrixError::TemplateNotFound
/// [`TemplateRender`]: MatrixError::TemplateRender
/// [`FieldRender`]: MatrixError::FieldRender
/// [`Encoding`]: MatrixError::Encoding
/// [`InvalidInputName`]: MatrixError::InvalidInputName
/// [`ProductParse`]: MatrixError::ProductParse
/// [`ConfigError`]: MatrixError::ConfigError
/// [`IoError`]: MatrixError::IoError
#[derive(Error, Debug)]
pub enum MatrixError {
    /// The template path resolved to nothing in the engine.
    #[error("Template not found: {template}")]
    TemplateNotFound {
        /// Template path as requested by the caller
        template: String,
        /// Registered template names close to the requested one
        suggestions: Vec<String>,
    },

    /// Tera reported a parse or render failure.
    #[error("Failed to render template '{template}': {message}")]
    TemplateRender {
        /// Template being rendered
        template: String,
        /// Cleaned message chain from Tera
        message: String,
    },

    /// A field type could not render its input.
    #[error("Field '{field}' failed to render: {reason}")]
    FieldRender {
        /// Handle of the field that failed
        field: String,
        /// Reason reported by the field type
        reason: String,
    },

    /// A value could not be safely encoded for a script block.
    #[error("Failed to encode value for script output: {reason}")]
    Encoding {
        /// Underlying serializer message
        reason: String,
    },

    /// The matrix input name is empty or already nested.
    #[error("Invalid input name '{name}': {reason}")]
    InvalidInputName {
        /// Name as given by the caller
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// A product definition could not be parsed.
    #[error("Invalid product definition in {path}: {reason}")]
    ProductParse {
        /// File the product was read from
        path: String,
        /// Parser message
        reason: String,
    },

    /// Configuration problem.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Error context wrapper that provides user-friendly error information
///
/// Holds the underlying [`MatrixError`] plus an optional suggestion and
/// details. [`display`](ErrorContext::display) prints the error in red, the
/// details in yellow and the suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: MatrixError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`MatrixError`]
    #[must_use]
    pub const fn new(error: MatrixError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions for the CLI.
///
/// Walks the error chain looking for a [`MatrixError`], then falls back to
/// I/O and TOML errors, and finally to a generic message that keeps the
/// whole chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(matrix_error) = cause.downcast_ref::<MatrixError>() {
            return create_error_context(matrix_error);
        }

        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            if io_error.kind() == std::io::ErrorKind::NotFound {
                return ErrorContext::new(MatrixError::IoError(std::io::Error::new(
                    io_error.kind(),
                    error.to_string(),
                )))
                .with_suggestion("Check that the file exists and the path is correct");
            }
        }

        if let Some(toml_error) = cause.downcast_ref::<toml::de::Error>() {
            return ErrorContext::new(MatrixError::ConfigError {
                message: toml_error.message().to_string(),
            })
            .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and table headers")
            .with_details(error.to_string());
        }
    }

    let details = error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>().join("\n  → ");
    let context = ErrorContext::new(MatrixError::ConfigError {
        message: error.to_string(),
    });
    if details.is_empty() {
        context
    } else {
        context.with_details(details)
    }
}

fn create_error_context(error: &MatrixError) -> ErrorContext {
    match error {
        MatrixError::TemplateNotFound {
            template,
            suggestions,
        } => {
            let context = ErrorContext::new(MatrixError::TemplateNotFound {
                template: template.clone(),
                suggestions: suggestions.clone(),
            });
            if suggestions.is_empty() {
                context.with_suggestion(
                    "Run 'variant-matrix templates' to list the registered templates",
                )
            } else {
                context.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }
        MatrixError::TemplateRender {
            template,
            message,
        } => ErrorContext::new(MatrixError::TemplateRender {
            template: template.clone(),
            message: message.clone(),
        })
        .with_suggestion("Check the template syntax and the variables it references"),
        MatrixError::FieldRender {
            field,
            reason,
        } => ErrorContext::new(MatrixError::FieldRender {
            field: field.clone(),
            reason: reason.clone(),
        })
        .with_suggestion(format!("Check the settings of field '{field}' in the product type")),
        MatrixError::Encoding {
            reason,
        } => ErrorContext::new(MatrixError::Encoding {
            reason: reason.clone(),
        })
        .with_details("Output is refused rather than embedded unescaped in a script block"),
        MatrixError::InvalidInputName {
            name,
            reason,
        } => ErrorContext::new(MatrixError::InvalidInputName {
            name: name.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Pass a bare name such as 'variants'; use --namespace for nesting"),
        MatrixError::ProductParse {
            path,
            reason,
        } => ErrorContext::new(MatrixError::ProductParse {
            path: path.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Product files must be TOML (.toml) or JSON (.json)"),
        MatrixError::ConfigError {
            message,
        } => ErrorContext::new(MatrixError::ConfigError {
            message: message.clone(),
        }),
        MatrixError::IoError(e) => {
            ErrorContext::new(MatrixError::IoError(std::io::Error::new(e.kind(), e.to_string())))
        }
    }
}
