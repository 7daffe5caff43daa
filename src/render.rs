//! Page rendering through a fixed set of `minijinja` templates.
//!
//! Templates are registered once when the [`Renderer`] is built and are only
//! looked up by the names in [`TEMPLATE_NAMES`]; nothing derived from a request
//! ever reaches the loader. Registration uses the `.html` suffix so minijinja's
//! HTML auto-escaping applies to `title` and `body`.

use std::fs;
use std::path::Path;

use minijinja::Environment;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::WikiError;
use crate::page::Page;

/// Names of the templates every renderer must provide.
pub const TEMPLATE_NAMES: [&str; 2] = ["view", "edit"];

const BUILTIN_VIEW: &str = include_str!("../templates/view.html");
const BUILTIN_EDIT: &str = include_str!("../templates/edit.html");

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    body: String,
}

/// Renders pages into HTML using the preloaded `view` and `edit` templates.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Renderer backed by the templates shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Template`] if a built-in template fails to parse.
    pub fn builtin() -> Result<Self, WikiError> {
        Self::from_sources([
            ("view", BUILTIN_VIEW.to_string()),
            ("edit", BUILTIN_EDIT.to_string()),
        ])
    }

    /// Templates from `dir` when given, the built-in set otherwise.
    ///
    /// # Errors
    ///
    /// See [`Renderer::from_dir`] and [`Renderer::builtin`].
    pub fn load(dir: Option<&Path>) -> Result<Self, WikiError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    /// Load `view.html` and `edit.html` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Io`] if a template file cannot be read and
    /// [`WikiError::Template`] if one fails to parse.
    pub fn from_dir(dir: &Path) -> Result<Self, WikiError> {
        let mut sources = Vec::with_capacity(TEMPLATE_NAMES.len());
        for name in TEMPLATE_NAMES {
            let path = dir.join(file_name(name));
            let source = fs::read_to_string(&path).map_err(|e| WikiError::io(&path, e))?;
            sources.push((name, source));
        }
        info!(dir = %dir.display(), "Templates loaded");
        Self::from_sources(sources)
    }

    fn from_sources<I>(sources: I) -> Result<Self, WikiError>
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        let mut env = Environment::new();
        for (name, source) in sources {
            env.add_template_owned(file_name(name), source)
                .map_err(|e| WikiError::template(name, e))?;
        }
        Ok(Self { env })
    }

    /// Substitute `page` into template `name` (`view` or `edit`).
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Template`] if `name` is not registered or if
    /// rendering fails.
    pub fn render(&self, name: &str, page: &Page) -> Result<Vec<u8>, WikiError> {
        let template = self
            .env
            .get_template(&file_name(name))
            .map_err(|e| WikiError::template(name, e))?;
        let ctx = PageContext {
            title: &page.title,
            body: page.body_text(),
        };
        let rendered = template
            .render(ctx)
            .map_err(|e| WikiError::template(name, e))?;
        debug!(template = %name, title = %page.title, bytes = rendered.len(), "Page rendered");
        Ok(rendered.into_bytes())
    }
}

fn file_name(name: &str) -> String {
    format!("{name}.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_str(renderer: &Renderer, name: &str, page: &Page) -> String {
        String::from_utf8(renderer.render(name, page).unwrap()).unwrap()
    }

    #[test]
    fn test_builtin_view() {
        let renderer = Renderer::builtin().unwrap();
        let html = render_str(&renderer, "view", &Page::new("Home", "Hello wiki"));
        assert!(html.contains("<h1>Home</h1>"));
        assert!(html.contains("Hello wiki"));
        assert!(html.contains(r#"href="/edit/Home""#));
    }

    #[test]
    fn test_builtin_edit_empty_page() {
        let renderer = Renderer::builtin().unwrap();
        let html = render_str(&renderer, "edit", &Page::empty("NewPage"));
        assert!(html.contains("Editing NewPage"));
        assert!(html.contains(r#"action="/save/NewPage""#));
        assert!(html.contains(r#"cols="80"></textarea>"#));
    }

    #[test]
    fn test_body_is_escaped() {
        let renderer = Renderer::builtin().unwrap();
        let html = render_str(&renderer, "view", &Page::new("Xss", "<script>alert(1)</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_template_fails() {
        let renderer = Renderer::builtin().unwrap();
        let err = renderer.render("save", &Page::empty("Home")).unwrap_err();
        assert!(matches!(err, WikiError::Template { ref name, .. } if name == "save"));
    }

    #[test]
    fn test_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("view.html"), "V:{{ title }}={{ body }}").unwrap();
        fs::write(dir.path().join("edit.html"), "E:{{ title }}").unwrap();
        let renderer = Renderer::from_dir(dir.path()).unwrap();
        assert_eq!(render_str(&renderer, "view", &Page::new("A", "b")), "V:A=b");
        assert_eq!(render_str(&renderer, "edit", &Page::new("A", "b")), "E:A");
    }

    #[test]
    fn test_from_dir_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("view.html"), "{{ title }}").unwrap();
        assert!(matches!(
            Renderer::from_dir(dir.path()),
            Err(WikiError::Io { .. })
        ));
    }

    #[test]
    fn test_from_dir_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("view.html"), "{{ title").unwrap();
        fs::write(dir.path().join("edit.html"), "ok").unwrap();
        assert!(matches!(
            Renderer::from_dir(dir.path()),
            Err(WikiError::Template { .. })
        ));
    }
}
