//! Template rendering backends

use crate::errors::{HttpError, HttpResult};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tinytemplate::TinyTemplate;
use tracing::debug;

/// Renders a named template against a JSON context.
///
/// Values reaching the renderer have already been escaped (or deliberately
/// left raw) by the view, so implementations must not escape again.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> HttpResult<String>;
}

/// [`TemplateRenderer`] backed by `tinytemplate`.
///
/// Templates are registered in memory or read from a template directory on
/// first use and cached.
#[derive(Debug, Default)]
pub struct TinyTemplateRenderer {
    directory: Option<PathBuf>,
    templates: RwLock<HashMap<String, String>>,
}

impl TinyTemplateRenderer {
    /// Renderer with in-memory templates only
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer loading `<directory>/<template name>` on demand
    pub fn from_dir(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Register a template, builder style
    pub fn with_template(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.add_template(name, source);
        self
    }

    /// Register or replace a template
    pub fn add_template(&self, name: impl Into<String>, source: impl Into<String>) {
        self.templates
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.into(), source.into());
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    fn source(&self, name: &str) -> HttpResult<String> {
        if let Some(source) = self
            .templates
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
        {
            return Ok(source.clone());
        }

        let directory = self
            .directory
            .as_ref()
            .ok_or_else(|| HttpError::template(format!("Unknown template '{}'", name)))?;
        let path = directory.join(name);
        let source = fs::read_to_string(&path).map_err(|err| {
            HttpError::template(format!("Cannot read template {}: {}", path.display(), err))
        })?;

        debug!("Loaded template '{}' from {}", name, path.display());
        self.add_template(name, source.clone());
        Ok(source)
    }
}

impl TemplateRenderer for TinyTemplateRenderer {
    fn render(&self, template: &str, context: &Value) -> HttpResult<String> {
        let source = self.source(template)?;

        let mut engine = TinyTemplate::new();
        engine.set_default_formatter(&tinytemplate::format_unescaped);
        engine.add_template(template, &source)?;
        Ok(engine.render(template, context)?)
    }
}
