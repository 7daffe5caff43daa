use std::sync::Arc;

use tracing::{error, info};

use super::types::{WikiRequest, WikiResponse};
use crate::page::{Page, PageStore};
use crate::render::Renderer;
use crate::router::Operation;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct WikiContext {
    pub store: PageStore,
    pub renderer: Arc<Renderer>,
}

impl WikiContext {
    pub fn new(store: PageStore, renderer: Renderer) -> Self {
        Self {
            store,
            renderer: Arc::new(renderer),
        }
    }
}

/// Run the handler for `req.operation`.
pub fn dispatch(ctx: &WikiContext, req: &WikiRequest) -> WikiResponse {
    match req.operation {
        Operation::View => view(ctx, &req.title),
        Operation::Edit => edit(ctx, &req.title),
        Operation::Save => save(ctx, &req.title, req.form_body()),
    }
}

/// Show a page, or send the client to its edit form if it has no file.
///
/// A load failure of any kind takes the redirect branch.
pub fn view(ctx: &WikiContext, title: &str) -> WikiResponse {
    match ctx.store.load(title) {
        Ok(page) => render(ctx, Operation::View, &page),
        Err(_) => WikiResponse::Redirect(Operation::Edit.path_for(title)),
    }
}

/// Show the edit form, pre-filled when the page exists and empty otherwise.
pub fn edit(ctx: &WikiContext, title: &str) -> WikiResponse {
    let page = ctx
        .store
        .load(title)
        .unwrap_or_else(|_| Page::empty(title));
    render(ctx, Operation::Edit, &page)
}

/// Persist the submitted body and redirect to the page view.
pub fn save(ctx: &WikiContext, title: &str, body: &[u8]) -> WikiResponse {
    let page = Page::new(title, body);
    match ctx.store.save(&page) {
        Ok(()) => {
            info!(title = %title, bytes = page.body.len(), "Page stored");
            WikiResponse::Redirect(Operation::View.path_for(title))
        }
        Err(e) => {
            error!(title = %title, error = %e, "Save failed");
            e.into()
        }
    }
}

fn render(ctx: &WikiContext, operation: Operation, page: &Page) -> WikiResponse {
    let name = operation.template_name().unwrap_or(operation.as_str());
    match ctx.renderer.render(name, page) {
        Ok(html) => WikiResponse::Html(html),
        Err(e) => {
            error!(template = %name, title = %page.title, error = %e, "Render failed");
            e.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};
    use std::collections::HashMap;

    fn context(dir: &std::path::Path) -> WikiContext {
        WikiContext::new(PageStore::new(dir), Renderer::builtin().unwrap())
    }

    fn html(resp: WikiResponse) -> String {
        match resp {
            WikiResponse::Html(bytes) => String::from_utf8(bytes).unwrap(),
            other => panic!("expected html, got {other:?}"),
        }
    }

    #[test]
    fn test_view_missing_redirects_to_edit() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        assert_eq!(
            view(&ctx, "Missing"),
            WikiResponse::Redirect("/edit/Missing".into())
        );
        assert!(!dir.path().join("Missing.txt").exists());
    }

    #[test]
    fn test_edit_missing_renders_empty_form() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let page = html(edit(&ctx, "Fresh"));
        assert!(page.contains("Editing Fresh"));
        assert!(page.contains(r#"cols="80"></textarea>"#));
        assert!(!dir.path().join("Fresh.txt").exists());
    }

    #[test]
    fn test_edit_existing_is_prefilled() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        ctx.store.save(&Page::new("Home", "old text")).unwrap();
        assert!(html(edit(&ctx, "Home")).contains(">old text</textarea>"));
    }

    #[test]
    fn test_save_then_view() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        assert_eq!(
            save(&ctx, "Home", b"Hello wiki"),
            WikiResponse::Redirect("/view/Home".into())
        );
        let page = html(view(&ctx, "Home"));
        assert!(page.contains("<h1>Home</h1>"));
        assert!(page.contains("Hello wiki"));
    }

    #[test]
    fn test_save_failure_is_500_without_redirect() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir.path().join("gone"));
        match save(&ctx, "Home", b"x") {
            WikiResponse::Error { status, message } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(message.starts_with("Home.txt: "), "{message}");
                assert!(!message.contains("gone"), "{message}");
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_save_keeps_non_utf8_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let body = [0xff, 0xfe, b'r', b'a', b'w'];
        assert_eq!(
            save(&ctx, "Blob", &body),
            WikiResponse::Redirect("/view/Blob".into())
        );
        assert_eq!(std::fs::read(dir.path().join("Blob.txt")).unwrap(), body);
    }

    #[test]
    fn test_dispatch_uses_form_body() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let mut form = HashMap::new();
        form.insert("body".to_string(), b"from form".to_vec());
        let req = WikiRequest {
            method: Method::POST,
            operation: Operation::Save,
            title: "Form".into(),
            form,
        };
        assert_eq!(
            dispatch(&ctx, &req),
            WikiResponse::Redirect("/view/Form".into())
        );
        assert_eq!(ctx.store.load("Form").unwrap().body, b"from form".to_vec());
    }
}
