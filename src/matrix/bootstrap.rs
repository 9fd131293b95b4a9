//! Client-side bootstrap statement for the matrix controller.

use crate::core::MatrixError;
use crate::view::encode_for_script;

/// Everything the client controller is constructed with.
///
/// Every argument is passed through [`encode_for_script`], so neither the
/// HTML payloads nor the id and name can terminate the surrounding script
/// block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientBootstrap {
    /// Namespaced id of the matrix container.
    pub id: String,
    /// Field HTML for a new row.
    pub body_html: String,
    /// Script HTML to inject alongside a new row.
    pub foot_html: String,
    /// Namespaced input name of the matrix.
    pub name: String,
}

impl ClientBootstrap {
    /// Build the `new {js_class}(id, bodyHtml, footHtml, name);` statement.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Encoding`] if any argument cannot be encoded.
    pub fn to_js(&self, js_class: &str) -> Result<String, MatrixError> {
        let args = [&self.id, &self.body_html, &self.foot_html, &self.name]
            .into_iter()
            .map(|arg| encode_for_script(arg.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(format!("new {js_class}({});", args.join(", ")))
    }
}
