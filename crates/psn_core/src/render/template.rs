//! Placeholder-substitution renderer.

use std::fs;
use std::path::Path;

use super::{ModelRenderer, RenderError, RenderRequest, RenderResult};

/// Fills `{{NAME}}` placeholders in a model template.
///
/// Recognised placeholders: `SIZE`, `PROPERTY`, `THRESHOLD`, `CLK_LOW`,
/// `CLK_HIGH`, `STRIDE` and `FLITS` (empty when no flit generation pattern is
/// set). Any other placeholder left in the output is an error.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template: String,
}

impl TemplateRenderer {
    /// Renderer over template text.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Renderer over a template file.
    pub fn from_file(path: &Path) -> RenderResult<Self> {
        let template = fs::read_to_string(path).map_err(|e| RenderError::TemplateRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(template))
    }
}

impl ModelRenderer for TemplateRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> RenderResult<String> {
        let substitutions = [
            ("{{SIZE}}", request.size.to_string()),
            ("{{PROPERTY}}", request.property.file_token().to_string()),
            ("{{THRESHOLD}}", request.threshold.to_string()),
            ("{{CLK_LOW}}", request.window.lower.to_string()),
            ("{{CLK_HIGH}}", request.window.upper.to_string()),
            ("{{STRIDE}}", request.stride.to_string()),
            (
                "{{FLITS}}",
                request.flit_generation.unwrap_or_default().to_string(),
            ),
        ];

        let mut text = self.template.clone();
        for (placeholder, value) in &substitutions {
            text = text.replace(placeholder, value);
        }

        if let Some(start) = text.find("{{") {
            let rest = &text[start..];
            let placeholder = match rest.find("}}") {
                Some(end) => &rest[..end + 2],
                None => rest.lines().next().unwrap_or(rest),
            };
            return Err(RenderError::UnresolvedPlaceholder {
                placeholder: placeholder.to_string(),
            });
        }

        Ok(text)
    }
}
