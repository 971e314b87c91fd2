//! Model rendering for one window.
//!
//! Interconnect model generation is out of scope for this crate. The driver
//! only needs "model text for this window", which [`ModelRenderer`]
//! provides. [`TemplateRenderer`] fills a pre-generated model template.

mod template;

pub use template::TemplateRenderer;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{PropertyType, RunConfig, Window};

/// Errors raised while rendering a model.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The template file could not be read.
    #[error("Failed to read model template '{path}': {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `{{...}}` placeholder was left without a value.
    #[error("Unresolved placeholder '{placeholder}' in model template")]
    UnresolvedPlaceholder { placeholder: String },
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Everything a renderer needs to build one window's model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest<'a> {
    pub size: u32,
    pub property: PropertyType,
    pub threshold: u32,
    pub window: Window,
    pub stride: u64,
    pub flit_generation: Option<&'a str>,
}

impl<'a> RenderRequest<'a> {
    /// Request for `window` under `config`.
    pub fn for_window(config: &'a RunConfig, window: Window) -> Self {
        Self {
            size: config.size(),
            property: config.property(),
            threshold: config.threshold(),
            window,
            stride: config.stride(),
            flit_generation: config.flit_generation(),
        }
    }

    /// Label used to name the model handoff file.
    pub fn label(&self) -> String {
        format!(
            "noc_{}x{}_{}_{}_{}",
            self.size,
            self.size,
            self.property.file_token(),
            self.window.lower,
            self.window.upper
        )
    }
}

/// Produces model text for a window.
pub trait ModelRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> RenderResult<String>;
}
