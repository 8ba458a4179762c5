//! Simple variable substitution renderer.

use serde_json::Value;
use tracing::instrument;

use putlog_core::{
    application::ports::{TemplateRenderer, TemplateStore},
    domain::{Options, TemplateRef},
    error::PutlogResult,
};

use crate::template_store::InMemoryStore;

/// Renderer replacing `{{key}}` placeholders with option values.
///
/// - strings are inserted verbatim
/// - lists of strings are joined with newlines
/// - any other value is inserted as its JSON text
/// - `{{unknown}}` stays as literal `{{unknown}}` (no error)
pub struct SimpleRenderer {
    store: Box<dyn TemplateStore>,
}

impl SimpleRenderer {
    /// Create a renderer reading template sources from `store`.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Renderer over the built-in templates (plus any override directory).
    pub fn with_builtin() -> PutlogResult<Self> {
        Ok(Self::new(Box::new(InMemoryStore::with_builtin()?)))
    }

    /// Substitute placeholders in `source` in one left-to-right pass.
    ///
    /// Inserted values are never scanned again, so option text that itself
    /// contains `{{...}}` comes out as written.
    pub fn render_str(source: &str, options: &Options) -> String {
        let mut result = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(open) = rest.find("{{") {
            let Some(close) = rest[open + 2..].find("}}") else {
                break;
            };
            let end = open + 2 + close + 2;
            let key = &rest[open + 2..end - 2];

            result.push_str(&rest[..open]);
            match options.get(key) {
                Some(value) => result.push_str(&value_text(value)),
                None => result.push_str(&rest[open..end]),
            }
            rest = &rest[end..];
        }

        result.push_str(rest);
        result
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip(self, options), fields(template = %template))]
    fn render(&self, template: &TemplateRef, options: &Options) -> PutlogResult<String> {
        let source = self.store.get(template)?;
        Ok(Self::render_str(&source, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use putlog_core::{application::ApplicationError, error::PutlogError};

    #[test]
    fn substitutes_known_and_keeps_unknown() {
        let opts = Options::new().with("package", "shop").with("port", 8000);
        assert_eq!(
            SimpleRenderer::render_str("{{package}}:{{port}} {{missing}}", &opts),
            "shop:8000 {{missing}}"
        );
    }

    #[test]
    fn inserted_values_are_not_expanded_again() {
        let opts = Options::new()
            .with("description", "Template var {{package}} literal")
            .with("package", "shop");
        assert_eq!(
            SimpleRenderer::render_str("{{description}} / {{package}}", &opts),
            "Template var {{package}} literal / shop"
        );
    }

    #[test]
    fn unclosed_placeholder_is_kept() {
        let opts = Options::new().with("package", "shop");
        assert_eq!(
            SimpleRenderer::render_str("{{package}} {{package", &opts),
            "shop {{package"
        );
    }

    #[test]
    fn lists_render_one_per_line() {
        let opts = Options::new().with("requirements", vec!["fastapi", "pydantic"]);
        assert_eq!(
            SimpleRenderer::render_str("{{requirements}}", &opts),
            "fastapi\npydantic"
        );
    }

    #[test]
    fn renders_from_store() {
        let store = InMemoryStore::new();
        store
            .insert(TemplateRef::new("core", "fastapi"), "import {{package}}".into())
            .unwrap();
        let renderer = SimpleRenderer::new(Box::new(store));

        let out = renderer
            .render(
                &TemplateRef::new("core", "fastapi"),
                &Options::new().with("package", "shop"),
            )
            .unwrap();
        assert_eq!(out, "import shop");
    }

    #[test]
    fn unknown_template_propagates_not_found() {
        let renderer = SimpleRenderer::new(Box::new(InMemoryStore::new()));
        let err = renderer
            .render(&TemplateRef::new("nope", "x"), &Options::new())
            .unwrap_err();
        assert!(matches!(
            err,
            PutlogError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }
}
