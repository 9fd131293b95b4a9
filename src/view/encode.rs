//! JSON encoding that is safe to embed inside a `<script>` block.
//!
//! Plain JSON is not enough: a string containing `</script>` would close the
//! surrounding block and let the rest of the value run as markup. After
//! serializing with serde_json, every character that could end the block,
//! open an HTML comment, or break an attribute is replaced with its `\uXXXX`
//! escape. `/` is written as `\/` and the line/paragraph separators U+2028
//! and U+2029 are escaped as well.
//!
//! The result is still valid JSON and decodes to the original value.

use serde::Serialize;

use crate::core::MatrixError;

/// Serialize `value` as JSON safe for inclusion in a script block.
///
/// # Errors
///
/// Returns [`MatrixError::Encoding`] if the value cannot be serialized. No
/// partial or unescaped output is ever produced.
///
/// # Examples
///
/// ```
/// use variant_matrix::view::encode_for_script;
///
/// let encoded = encode_for_script("</script><script>alert(1)</script>").unwrap();
/// assert!(!encoded.contains("</script"));
/// assert_eq!(
///     serde_json::from_str::<String>(&encoded).unwrap(),
///     "</script><script>alert(1)</script>"
/// );
/// ```
pub fn encode_for_script<T: Serialize + ?Sized>(value: &T) -> Result<String, MatrixError> {
    let json = serde_json::to_string(value).map_err(|e| MatrixError::Encoding {
        reason: e.to_string(),
    })?;

    let mut out = String::with_capacity(json.len() + json.len() / 8);
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\'' => out.push_str("\\u0027"),
            '/' => out.push_str("\\/"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    Ok(out)
}
