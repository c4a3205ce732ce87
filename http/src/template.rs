//! Template engine seam for the web dispatcher.
//!
//! The engine itself is an external collaborator; the dispatcher only
//! needs "render this template path with these values". Request-derived
//! ambient values travel in an explicit per-request [`TemplateGlobals`]
//! passed into every render call, never through engine-level globals, so
//! concurrent requests cannot observe each other's values.

use serde::Serialize;
use serde_json::{Map, Value};
use switchboard_core::HandlerError;

/// Request-derived values every template can read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateGlobals {
    /// Lowercased controller token.
    pub controller: String,
    /// Lowercased resource chain.
    pub action: String,
    /// Whether the request came in via `XMLHttpRequest`.
    pub ajax_request: bool,
}

pub trait TemplateEngine: Send + Sync {
    /// Render the template at `template` (e.g. `"users/edit.twig"`) with
    /// the action's values and the per-request globals.
    fn render(
        &self,
        template: &str,
        values: &Map<String, Value>,
        globals: &TemplateGlobals,
    ) -> Result<String, HandlerError>;
}
