// datacheck-core/src/application/ports/renderer.rs

use crate::error::DataCheckError;

/// Renders a named template against a JSON context.
pub trait TemplateEngine: Send + Sync {
    fn render(
        &self,
        template_name: &str,
        context: &serde_json::Value,
    ) -> Result<String, DataCheckError>;
}
