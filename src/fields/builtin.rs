//! Built-in field types.
//!
//! Each type seeds its input from `settings.default` when the value is fresh
//! and no value is stored. All attribute values are HTML-escaped.

use serde_json::Value;
use tera::escape_html;

use super::{FieldRenderContext, FieldType};
use crate::core::MatrixError;
use crate::models::Field;
use crate::view::encode_for_script;

/// Value to show in the input, falling back to the default for fresh values.
fn effective_value<'v>(field: &'v Field, value: Option<&'v Value>, is_fresh: bool) -> Option<&'v Value> {
    match value {
        Some(Value::Null) | None if is_fresh => field.setting("default"),
        Some(Value::Null) | None => None,
        Some(v) => Some(v),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "" }.to_string()),
        _ => None,
    }
}

fn invalid(field: &Field, reason: impl Into<String>) -> MatrixError {
    MatrixError::FieldRender {
        field: field.handle.clone(),
        reason: reason.into(),
    }
}

/// Single-line or multi-line text.
pub struct PlainTextField;

impl FieldType for PlainTextField {
    fn handle(&self) -> &str {
        "plain_text"
    }

    fn input_html(
        &self,
        field: &Field,
        value: Option<&Value>,
        ctx: &mut FieldRenderContext<'_>,
    ) -> Result<String, MatrixError> {
        let text = match effective_value(field, value, ctx.is_fresh) {
            Some(v) => scalar_to_string(v).ok_or_else(|| invalid(field, "expected a text value"))?,
            None => String::new(),
        };
        let placeholder = field
            .setting("placeholder")
            .and_then(Value::as_str)
            .map(|p| format!(" placeholder=\"{}\"", escape_html(p)))
            .unwrap_or_default();
        let id = escape_html(&ctx.input_id(field));
        let name = escape_html(&ctx.input_name(field));

        if field.setting("multiline").and_then(Value::as_bool).unwrap_or(false) {
            Ok(format!(
                "<textarea class=\"text fullwidth\" id=\"{id}\" name=\"{name}\" rows=\"4\"{placeholder}>{}</textarea>",
                escape_html(&text)
            ))
        } else {
            Ok(format!(
                "<input class=\"text fullwidth\" type=\"text\" id=\"{id}\" name=\"{name}\" value=\"{}\"{placeholder}>",
                escape_html(&text)
            ))
        }
    }
}

/// Numeric input with optional bounds.
pub struct NumberField;

impl FieldType for NumberField {
    fn handle(&self) -> &str {
        "number"
    }

    fn input_html(
        &self,
        field: &Field,
        value: Option<&Value>,
        ctx: &mut FieldRenderContext<'_>,
    ) -> Result<String, MatrixError> {
        let number = match effective_value(field, value, ctx.is_fresh) {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if s.trim().parse::<f64>().is_ok() => s.trim().to_string(),
            Some(Value::String(s)) if s.trim().is_empty() => String::new(),
            Some(other) => return Err(invalid(field, format!("expected a number, got {other}"))),
            None => String::new(),
        };

        let mut bounds = String::new();
        for key in ["min", "max"] {
            if let Some(bound) = field.setting(key).and_then(Value::as_f64) {
                bounds.push_str(&format!(" {key}=\"{bound}\""));
            }
        }

        Ok(format!(
            "<input class=\"text\" type=\"number\" size=\"5\" id=\"{}\" name=\"{}\" value=\"{}\"{bounds}>",
            escape_html(&ctx.input_id(field)),
            escape_html(&ctx.input_name(field)),
            escape_html(&number)
        ))
    }
}

/// On/off toggle.
pub struct LightswitchField;

impl FieldType for LightswitchField {
    fn handle(&self) -> &str {
        "lightswitch"
    }

    fn input_html(
        &self,
        field: &Field,
        value: Option<&Value>,
        ctx: &mut FieldRenderContext<'_>,
    ) -> Result<String, MatrixError> {
        let on = match effective_value(field, value, ctx.is_fresh) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.as_str(), "1" | "true" | "on"),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(other) => return Err(invalid(field, format!("expected a boolean, got {other}"))),
            None => false,
        };

        Ok(format!(
            "<div class=\"lightswitch{}\" id=\"{}\" tabindex=\"0\" role=\"checkbox\" aria-checked=\"{on}\"><input type=\"hidden\" name=\"{}\" value=\"{}\"></div>",
            if on { " on" } else { "" },
            escape_html(&ctx.input_id(field)),
            escape_html(&ctx.input_name(field)),
            if on { "1" } else { "" }
        ))
    }
}

/// Select from a fixed list of options.
///
/// `settings.options` is a list of strings or `{ label, value }` objects.
pub struct DropdownField;

impl FieldType for DropdownField {
    fn handle(&self) -> &str {
        "dropdown"
    }

    fn input_html(
        &self,
        field: &Field,
        value: Option<&Value>,
        ctx: &mut FieldRenderContext<'_>,
    ) -> Result<String, MatrixError> {
        let options = match field.setting("options") {
            Some(Value::Array(options)) => options
                .iter()
                .map(|option| match option {
                    Value::String(s) => Ok((s.clone(), s.clone())),
                    Value::Object(map) => {
                        let value = map.get("value").and_then(scalar_to_string);
                        let label = map.get("label").and_then(Value::as_str).map(str::to_string);
                        match (label, value) {
                            (Some(label), Some(value)) => Ok((label, value)),
                            (None, Some(value)) => Ok((value.clone(), value)),
                            _ => Err(invalid(field, "option is missing a value")),
                        }
                    }
                    other => Err(invalid(field, format!("unsupported option {other}"))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
            Some(other) => return Err(invalid(field, format!("options must be a list, got {other}"))),
        };

        let selected = effective_value(field, value, ctx.is_fresh).and_then(scalar_to_string);

        let mut html = format!(
            "<div class=\"select\"><select id=\"{}\" name=\"{}\">",
            escape_html(&ctx.input_id(field)),
            escape_html(&ctx.input_name(field))
        );
        for (label, option_value) in &options {
            let is_selected = selected.as_deref() == Some(option_value.as_str());
            html.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>",
                escape_html(option_value),
                if is_selected { " selected" } else { "" },
                escape_html(label)
            ));
        }
        html.push_str("</select></div>");
        Ok(html)
    }
}

/// Date picker. Registers its initialization script with the render's buffer.
pub struct DateField;

impl FieldType for DateField {
    fn handle(&self) -> &str {
        "date"
    }

    fn input_html(
        &self,
        field: &Field,
        value: Option<&Value>,
        ctx: &mut FieldRenderContext<'_>,
    ) -> Result<String, MatrixError> {
        let date = match effective_value(field, value, ctx.is_fresh) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => return Err(invalid(field, format!("expected a date string, got {other}"))),
            None => String::new(),
        };
        let input_id = ctx.input_id(field);

        ctx.scripts.push(format!(
            "$({}).datepicker($.extend({{defaultDate: new Date()}}, Craft.datepickerOptions));",
            encode_for_script(&format!("#{input_id}"))?
        ));

        Ok(format!(
            "<div class=\"datewrapper\"><input class=\"text\" type=\"text\" size=\"10\" autocomplete=\"off\" id=\"{}\" name=\"{}[date]\" value=\"{}\"></div>",
            escape_html(&input_id),
            escape_html(&ctx.input_name(field)),
            escape_html(&date)
        ))
    }
}
