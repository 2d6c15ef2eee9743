//! Page-level assets collected while rendering a view tree
//!
//! Script and stylesheet includes, inline head blocks and free-form
//! placeholders. One [`PageAssets`] is shared by a root view and all of its
//! subviews, so anything a nested template adds is visible to the layout.

use serde_json::{json, Value};
use std::collections::HashMap;

fn escape(value: &str) -> String {
    html_escape::encode_quoted_attribute(value).into_owned()
}

fn media_attribute(media: Option<&str>) -> String {
    media
        .map(|media| format!(" media=\"{}\"", escape(media)))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAssets {
    // (dedup key, markup) in insertion order
    scripts: Vec<(String, String)>,
    stylesheets: Vec<(String, String)>,
    head_js: Vec<String>,
    head_js_once: Vec<(String, String)>,
    head_css: Vec<String>,
    head_css_once: Vec<(String, String)>,
    placeholders: HashMap<String, String>,
}

impl PageAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include a script file once
    pub fn include_js(&mut self, path: &str) {
        let markup = format!(
            "<script type=\"text/javascript\" src=\"{}\"></script>",
            escape(path)
        );
        push_once(&mut self.scripts, path, markup);
    }

    /// Include a stylesheet once, optionally for a media type
    pub fn include_css(&mut self, path: &str, media: Option<&str>) {
        let markup = format!(
            "<link rel=\"stylesheet\" type=\"text/css\"{} href=\"{}\">",
            media_attribute(media),
            escape(path)
        );
        push_once(&mut self.stylesheets, path, markup);
    }

    /// Append an inline script block to the head, even if repeated
    pub fn add_head_js(&mut self, code: &str) {
        self.head_js.push(script_block(code));
    }

    /// Append an inline script block unless the same code was added before
    pub fn add_head_js_once(&mut self, code: &str) {
        push_once(&mut self.head_js_once, code, script_block(code));
    }

    /// Append an inline style block to the head, even if repeated
    pub fn add_head_css(&mut self, code: &str, media: Option<&str>) {
        self.head_css.push(style_block(code, media));
    }

    /// Append an inline style block unless the same code was added before
    pub fn add_head_css_once(&mut self, code: &str, media: Option<&str>) {
        push_once(&mut self.head_css_once, code, style_block(code, media));
    }

    pub fn scripts(&self) -> String {
        join_markup(&self.scripts)
    }

    pub fn stylesheets(&self) -> String {
        join_markup(&self.stylesheets)
    }

    pub fn head_js(&self) -> String {
        self.head_js.join("\n")
    }

    pub fn head_js_once(&self) -> String {
        join_markup(&self.head_js_once)
    }

    pub fn head_css(&self) -> String {
        self.head_css.join("\n")
    }

    pub fn head_css_once(&self) -> String {
        join_markup(&self.head_css_once)
    }

    pub fn set_placeholder(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.placeholders.insert(name.into(), value.into());
    }

    pub fn placeholder(&self, name: &str) -> Option<&str> {
        self.placeholders.get(name).map(String::as_str)
    }

    /// Everything above as a template context object
    pub fn to_context(&self) -> Value {
        json!({
            "scripts": self.scripts(),
            "stylesheets": self.stylesheets(),
            "head_js": self.head_js(),
            "head_js_once": self.head_js_once(),
            "head_css": self.head_css(),
            "head_css_once": self.head_css_once(),
            "placeholders": self.placeholders,
        })
    }
}

fn script_block(code: &str) -> String {
    format!("<script type=\"text/javascript\">{}</script>", code)
}

fn style_block(code: &str, media: Option<&str>) -> String {
    format!("<style type=\"text/css\"{}>{}</style>", media_attribute(media), code)
}

fn push_once(entries: &mut Vec<(String, String)>, key: &str, markup: String) {
    if !entries.iter().any(|(existing, _)| existing == key) {
        entries.push((key.to_string(), markup));
    }
}

fn join_markup(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .map(|(_, markup)| markup.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
