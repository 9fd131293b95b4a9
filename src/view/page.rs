//! Explicit per-page rendering state.
//!
//! Instead of a global script buffer that is toggled into and out of capture
//! mode, every render receives the buffer it should write to. A page keeps one
//! [`PageContext`]; a nested render that must not leak scripts into the page
//! is simply handed a fresh [`ScriptBuffer`] and reads it back afterwards.

use std::collections::BTreeMap;

/// Ordered list of JavaScript statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuffer {
    statements: Vec<String>,
}

impl ScriptBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement.
    pub fn push(&mut self, js: impl Into<String>) {
        self.statements.push(js.into());
    }

    /// Move every statement of `other` to the end of this buffer.
    pub fn append(&mut self, other: &mut ScriptBuffer) {
        self.statements.append(&mut other.statements);
    }

    #[must_use]
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Render the statements as one script block, or an empty string if there are none.
    #[must_use]
    pub fn to_html(&self) -> String {
        if self.statements.is_empty() {
            return String::new();
        }
        format!("<script type=\"text/javascript\">\n{}\n</script>", self.statements.join("\n"))
    }
}

/// Script and translation output collected while rendering one page.
#[derive(Debug, Default)]
pub struct PageContext {
    js: ScriptBuffer,
    js_resources: Vec<String>,
    translations: BTreeMap<String, Vec<String>>,
}

impl PageContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a statement for the page's foot script block.
    pub fn include_js(&mut self, js: impl Into<String>) {
        self.js.push(js);
    }

    /// Queue a script resource; each resource is included once.
    pub fn include_js_resource(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.js_resources.contains(&path) {
            self.js_resources.push(path);
        }
    }

    /// Register messages the client needs translated, keeping first-seen order.
    pub fn register_translations(&mut self, category: &str, messages: &[&str]) {
        let registered = self.translations.entry(category.to_string()).or_default();
        for message in messages {
            if !registered.iter().any(|m| m == message) {
                registered.push((*message).to_string());
            }
        }
    }

    #[must_use]
    pub fn scripts(&self) -> &ScriptBuffer {
        &self.js
    }

    /// Mutable access for renders that write straight into the page stream.
    pub fn scripts_mut(&mut self) -> &mut ScriptBuffer {
        &mut self.js
    }

    #[must_use]
    pub fn js_resources(&self) -> &[String] {
        &self.js_resources
    }

    #[must_use]
    pub fn translations(&self) -> &BTreeMap<String, Vec<String>> {
        &self.translations
    }

    /// `<script src>` tags for the queued resources.
    #[must_use]
    pub fn head_html(&self) -> String {
        self.js_resources
            .iter()
            .map(|path| format!("<script type=\"text/javascript\" src=\"{}\"></script>", tera::escape_html(path)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The buffered statements as a script block.
    #[must_use]
    pub fn foot_html(&self) -> String {
        self.js.to_html()
    }
}
