//! Field types that record how the renderer drives them.

use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::core::MatrixError;
use crate::fields::{FieldRenderContext, FieldType};
use crate::models::Field;

/// One `input_html` call as seen by a [`RecordingFieldType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub field: String,
    pub namespace: String,
    pub is_fresh: bool,
    pub placeholder: bool,
    pub has_value: bool,
}

/// Renders a marker input and records every call it receives.
///
/// Clones share the same call log, so a test can keep one handle while the
/// registry owns another.
#[derive(Debug, Clone)]
pub struct RecordingFieldType {
    handle: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingFieldType {
    #[must_use]
    pub fn new(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
            calls: Arc::default(),
        }
    }

    /// Calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl FieldType for RecordingFieldType {
    fn handle(&self) -> &str {
        &self.handle
    }

    fn input_html(
        &self,
        field: &Field,
        value: Option<&Value>,
        ctx: &mut FieldRenderContext<'_>,
    ) -> Result<String, MatrixError> {
        self.calls.lock().unwrap().push(RecordedCall {
            field: field.handle.clone(),
            namespace: ctx.namespace.to_string(),
            is_fresh: ctx.is_fresh,
            placeholder: ctx.element.is_placeholder(),
            has_value: value.is_some(),
        });

        Ok(format!(
            "<input type=\"hidden\" id=\"{}\" name=\"{}\" data-fresh=\"{}\">",
            ctx.input_id(field),
            ctx.input_name(field),
            ctx.is_fresh
        ))
    }
}

/// Writes a fixed statement to the script buffer on every render.
#[derive(Debug, Clone)]
pub struct MarkerScriptFieldType {
    handle: String,
    marker: String,
}

impl MarkerScriptFieldType {
    /// `marker` is pushed verbatim as a script statement.
    #[must_use]
    pub fn new(handle: &str, marker: &str) -> Self {
        Self {
            handle: handle.to_string(),
            marker: marker.to_string(),
        }
    }
}

impl FieldType for MarkerScriptFieldType {
    fn handle(&self) -> &str {
        &self.handle
    }

    fn input_html(
        &self,
        field: &Field,
        _value: Option<&Value>,
        ctx: &mut FieldRenderContext<'_>,
    ) -> Result<String, MatrixError> {
        ctx.scripts.push(self.marker.clone());
        Ok(format!("<span id=\"{}\"></span>", ctx.input_id(field)))
    }
}

/// Always fails to render.
#[derive(Debug, Clone)]
pub struct FailingFieldType {
    handle: String,
}

impl FailingFieldType {
    #[must_use]
    pub fn new(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
        }
    }
}

impl FieldType for FailingFieldType {
    fn handle(&self) -> &str {
        &self.handle
    }

    fn input_html(
        &self,
        field: &Field,
        _value: Option<&Value>,
        ctx: &mut FieldRenderContext<'_>,
    ) -> Result<String, MatrixError> {
        ctx.scripts.push("partialInit();");
        Err(MatrixError::FieldRender {
            field: field.handle.clone(),
            reason: "simulated failure".to_string(),
        })
    }
}
