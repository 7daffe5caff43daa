//! # brrtwiki
//!
//! **brrtwiki** is a minimal personal wiki: an HTTP service for viewing,
//! creating and editing text pages, each persisted as one file on disk. It runs
//! on the `may` coroutine runtime through `may_minihttp`.
//!
//! ## Architecture
//!
//! - **[`page`]** - the [`Page`] entity and the file-backed [`PageStore`]
//! - **[`router`]** - path validation and operation extraction
//! - **[`render`]** - `minijinja` templates compiled once at startup
//! - **[`handlers`]** - `view`, `edit` and `save` orchestration
//! - **[`middleware`]** - hooks around every routed request
//! - **[`server`]** - the `HttpService` and server lifecycle
//! - **[`config`]**, **[`logging`]**, **[`cli`]** - process setup
//!
//! ## Request Flow
//!
//! ```text
//! request ─► Router ──no match──► 404
//!              │
//!              ▼ (operation, title)
//!           handler ─► PageStore ─► Renderer ─► 200 HTML
//!              │
//!              └──► 302 redirect (view miss → /edit/T, save ok → /view/T)
//! ```
//!
//! | Method + Path | Behavior |
//! |---|---|
//! | `GET /view/{title}` | Render the stored page, or redirect to `/edit/{title}` |
//! | `GET /edit/{title}` | Render the edit form, empty if the page has no file |
//! | `POST /save/{title}` | Store form field `body`, redirect to `/view/{title}` |
//! | anything else | `404 Not Found` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brrtwiki::{config::WikiConfig, cli::serve};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = WikiConfig {
//!         addr: "127.0.0.1:8081".into(),
//!         ..WikiConfig::default()
//!     };
//!     serve(&config)
//! }
//! ```
//!
//! ## Consistency
//!
//! Pages are not cached; every request reads or rewrites the backing file.
//! Concurrent saves to the same title are not coordinated and the last writer
//! wins.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod page;
pub mod render;
pub mod router;
pub mod server;

pub use error::WikiError;
pub use page::{Page, PageStore};
pub use render::Renderer;
pub use router::{Operation, RouteMatch, Router};
