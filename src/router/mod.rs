//! # Router Module
//!
//! The router is the wiki's title validator and the only safety boundary between
//! request paths and the page files on disk.
//!
//! ## Overview
//!
//! Every request path is matched against a single anchored pattern:
//!
//! ```text
//! ^/(edit|save|view)/([a-zA-Z0-9]+)$
//! ```
//!
//! A match yields an [`Operation`] and an already validated title. Anything else
//! (empty titles, `..`, `/`, spaces, percent-escapes, trailing segments, unknown
//! operations) yields `None` and the server answers `404` without touching a
//! handler or the filesystem.
//!
//! The pattern is compiled once in [`Router::new`] and the router is cloned
//! into every connection handler.
//!
//! ## Example
//!
//! ```rust
//! use brrtwiki::router::{Operation, Router};
//!
//! let router = Router::new();
//! let m = router.route("/view/Home").unwrap();
//! assert_eq!(m.operation, Operation::View);
//! assert_eq!(m.title, "Home");
//! assert!(router.route("/view/../secret").is_none());
//! ```

mod core;

pub use self::core::{Operation, ParseOperationError, RouteMatch, Router, TITLE_PATTERN};
