//! HTTP surface of the wiki on top of `may_minihttp`.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_form, parse_request, ParsedRequest};
pub use response::{LocationHeaders, NOT_FOUND_BODY};
pub use service::WikiService;
