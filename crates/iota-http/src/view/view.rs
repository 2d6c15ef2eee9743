//! HTML views
//!
//! A view pairs a template with the data assigned to it. Data assigned with
//! [`View::assign`] is HTML-escaped at assignment time; [`View::assign_raw`]
//! stores trusted markup as-is. Views nest: a subview shares its parent's
//! renderer, router and [`PageAssets`], and its rendered output can be
//! assigned to the parent as trusted markup.

use super::assets::PageAssets;
use super::renderer::TemplateRenderer;
use crate::errors::{HttpError, HttpResult};
use crate::request::RequestContext;
use crate::routing::Router;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard};

/// Escape a value for HTML output. Strings are escaped (both quote styles),
/// arrays and objects recursively; numbers, booleans and null pass through.
pub fn escape_value(value: Value) -> Value {
    match value {
        Value::String(text) => {
            Value::String(html_escape::encode_quoted_attribute(&text).into_owned())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(escape_value).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key, escape_value(value)))
                .collect(),
        ),
        other => other,
    }
}

pub struct View {
    template: String,
    renderer: Arc<dyn TemplateRenderer>,
    router: Option<Arc<Router>>,
    assets: Arc<Mutex<PageAssets>>,
    data: Map<String, Value>,
    raw: Map<String, Value>,
}

impl View {
    pub fn new(template: impl Into<String>, renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self {
            template: template.into(),
            renderer,
            router: None,
            assets: Arc::new(Mutex::new(PageAssets::new())),
            data: Map::new(),
            raw: Map::new(),
        }
    }

    /// Attach the router used by [`View::url`] and [`View::abs_url`]
    pub fn with_router(mut self, router: Arc<Router>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Assign an escaped value
    pub fn assign<T: Serialize>(&mut self, name: impl Into<String>, value: T) -> HttpResult<()> {
        let value = serde_json::to_value(value)?;
        self.data.insert(name.into(), escape_value(value));
        Ok(())
    }

    /// Assign a value without escaping it. Escaped data with the same name
    /// takes precedence when rendering.
    pub fn assign_raw<T: Serialize>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> HttpResult<()> {
        self.raw.insert(name.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Assign many escaped values
    pub fn import<I, K, T>(&mut self, data: I) -> HttpResult<()>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Serialize,
    {
        for (name, value) in data {
            self.assign(name, value)?;
        }
        Ok(())
    }

    /// Escaped value assigned under `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Raw value assigned under `name`
    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.raw.get(name)
    }

    /// Create a nested view sharing this view's renderer, router and assets
    pub fn subview(&self, template: impl Into<String>) -> View {
        View {
            template: template.into(),
            renderer: Arc::clone(&self.renderer),
            router: self.router.clone(),
            assets: Arc::clone(&self.assets),
            data: Map::new(),
            raw: Map::new(),
        }
    }

    /// [`View::subview`] with escaped initial data, as [`View::import`]
    pub fn subview_with<I, K, T>(&self, template: impl Into<String>, data: I) -> HttpResult<View>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Serialize,
    {
        let mut view = self.subview(template);
        view.import(data)?;
        Ok(view)
    }

    /// Render `child` now and assign its output as trusted markup
    pub fn assign_view(&mut self, name: impl Into<String>, child: &View) -> HttpResult<()> {
        let markup = child.render()?;
        self.data.insert(name.into(), Value::String(markup));
        Ok(())
    }

    /// Render the template.
    ///
    /// The context holds the page assets under `page`, then raw data, then
    /// escaped data, each overriding earlier entries of the same name.
    pub fn render(&self) -> HttpResult<String> {
        let mut context = Map::new();
        context.insert("page".to_string(), self.assets().to_context());
        context.extend(self.raw.clone());
        context.extend(self.data.clone());

        self.renderer.render(&self.template, &Value::Object(context))
    }

    /// Lock the page assets shared by this view tree
    pub fn assets(&self) -> MutexGuard<'_, PageAssets> {
        self.assets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn include_js(&self, path: &str) {
        self.assets().include_js(path);
    }

    pub fn include_css(&self, path: &str, media: Option<&str>) {
        self.assets().include_css(path, media);
    }

    pub fn add_head_js(&self, code: &str) {
        self.assets().add_head_js(code);
    }

    pub fn add_head_js_once(&self, code: &str) {
        self.assets().add_head_js_once(code);
    }

    pub fn add_head_css(&self, code: &str, media: Option<&str>) {
        self.assets().add_head_css(code, media);
    }

    pub fn add_head_css_once(&self, code: &str, media: Option<&str>) {
        self.assets().add_head_css_once(code, media);
    }

    /// Set a placeholder visible to every view of the tree
    pub fn set_placeholder(&self, name: impl Into<String>, value: impl Into<String>) {
        self.assets().set_placeholder(name, value);
    }

    pub fn placeholder(&self, name: &str) -> Option<String> {
        self.assets().placeholder(name).map(str::to_string)
    }

    /// See [`Router::url`]
    pub fn url<I, K, V>(&self, target: &str, params: I) -> HttpResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.router()?.url(target, params)
    }

    /// See [`Router::abs_url`]
    pub fn abs_url<I, K, V>(
        &self,
        request: &RequestContext,
        target: &str,
        params: I,
        https: Option<bool>,
    ) -> HttpResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.router()?.abs_url(request, target, params, https)
    }

    fn router(&self) -> HttpResult<&Router> {
        self.router
            .as_deref()
            .ok_or_else(|| HttpError::config("View has no router attached"))
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("template", &self.template)
            .field("data", &self.data)
            .field("raw", &self.raw)
            .field("has_router", &self.router.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteTable;
    use crate::view::TinyTemplateRenderer;
    use serde_json::json;

    fn renderer() -> Arc<dyn TemplateRenderer> {
        Arc::new(
            TinyTemplateRenderer::new()
                .with_template("layout", "{page.stylesheets}|{content}|{title}")
                .with_template("body", "<p>{text}</p>")
                .with_template("plain", "{value}"),
        )
    }

    #[test]
    fn test_assign_escapes_recursively() {
        let mut view = View::new("plain", renderer());
        view.assign("name", "<b>Tom & \"Jerry\"</b>").unwrap();
        view.assign("list", json!(["<i>", 3, null, { "k": "<a>" }]))
            .unwrap();

        assert_eq!(
            view.get("name").unwrap(),
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"
        );
        let list = view.get("list").unwrap();
        assert_eq!(list[0], "&lt;i&gt;");
        assert_eq!(list[1], 3);
        assert!(list[2].is_null());
        assert_eq!(list[3]["k"], "&lt;a&gt;");
    }

    #[test]
    fn test_escaped_wins_over_raw() {
        let mut view = View::new("plain", renderer());
        view.assign_raw("value", "<em>raw</em>").unwrap();
        assert_eq!(view.render().unwrap(), "<em>raw</em>");

        view.assign("value", "<em>escaped</em>").unwrap();
        assert_eq!(view.render().unwrap(), "&lt;em&gt;escaped&lt;/em&gt;");
        assert_eq!(view.get_raw("value").unwrap(), "<em>raw</em>");
    }

    #[test]
    fn test_import() {
        let mut view = View::new("plain", renderer());
        view.import([("a", "<1>"), ("b", "2")]).unwrap();
        assert_eq!(view.get("a").unwrap(), "&lt;1&gt;");
        assert_eq!(view.get("b").unwrap(), "2");
    }

    #[test]
    fn test_subview_shares_assets_and_renders_as_markup() {
        let mut layout = View::new("layout", renderer());
        let mut body = layout.subview("body");
        body.assign("text", "a < b").unwrap();
        body.include_css("/site.css", None);
        body.set_placeholder("title", "Nested");

        layout.assign_view("content", &body).unwrap();
        let title = layout.placeholder("title").unwrap();
        layout.assign("title", title).unwrap();

        assert_eq!(
            layout.render().unwrap(),
            "<link rel=\"stylesheet\" type=\"text/css\" href=\"/site.css\">|<p>a &lt; b</p>|Nested"
        );
    }

    #[test]
    fn test_subview_with_initial_data() {
        let layout = View::new("layout", renderer());
        let body = layout
            .subview_with("body", [("text", "<hi>")])
            .unwrap();

        assert_eq!(body.get("text").unwrap(), "&lt;hi&gt;");
        assert_eq!(body.render().unwrap(), "<p>&lt;hi&gt;</p>");

        body.include_js("/app.js");
        assert!(layout.assets().scripts().contains("/app.js"));
    }

    #[test]
    fn test_url_proxies_require_router() {
        let view = View::new("plain", renderer());
        let none: [(&str, &str); 0] = [];
        assert!(matches!(
            view.url("home", none),
            Err(HttpError::ConfigError { .. })
        ));

        let router = Arc::new(Router::new(
            RouteTable::new().route("user", "/users/:id", "UserController"),
        ));
        let view = View::new("plain", renderer()).with_router(router);
        let child = view.subview("plain");
        let request = RequestContext::get("/").with_host("example.com");

        assert_eq!(child.url("user", [("id", "9")]).unwrap(), "/users/9");
        assert_eq!(
            child
                .abs_url(&request, "user", [("id", "9")], Some(true))
                .unwrap(),
            "https://example.com/users/9"
        );
    }
}
