use std::io;

use dashmap::DashMap;
use http::StatusCode;
use may_minihttp::Response;

use crate::handlers::WikiResponse;
use crate::router::Operation;

const HTML: &str = "Content-Type: text/html; charset=utf-8";
const TEXT: &str = "Content-Type: text/plain; charset=utf-8";

/// Body of every `404` response.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Interned `Location` header lines.
///
/// `may_minihttp` only accepts `&'static str` headers, so each distinct redirect
/// target is leaked once and reused afterwards. Entries are never evicted: the
/// table grows with every distinct title a client gets redirected for.
#[derive(Debug, Default)]
pub struct LocationHeaders {
    lines: DashMap<String, &'static str>,
}

impl LocationHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Location: <target>` for `target`, leaking it on first use.
    pub fn get(&self, target: &str) -> &'static str {
        if let Some(line) = self.lines.get(target) {
            return *line;
        }
        *self
            .lines
            .entry(target.to_string())
            .or_insert_with(|| Box::leak(format!("Location: {target}").into_boxed_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn status_line(res: &mut Response, status: StatusCode) {
    res.status_code(
        status.as_u16() as usize,
        status.canonical_reason().unwrap_or("Unknown"),
    );
}

/// Write a handler outcome.
pub fn write_wiki_response(
    res: &mut Response,
    response: WikiResponse,
    locations: &LocationHeaders,
) {
    let status = response.status();
    status_line(res, status);
    match response {
        WikiResponse::Html(body) => {
            res.header(HTML);
            res.body_vec(body);
        }
        WikiResponse::Redirect(target) => {
            res.header(locations.get(&target));
            res.header(HTML);
            res.body_vec(format!("<a href=\"{target}\">Found</a>.\n\n").into_bytes());
        }
        WikiResponse::Error { message, .. } => {
            res.header(TEXT);
            res.body_vec(format!("{message}\n").into_bytes());
        }
    }
}

pub fn write_not_found(res: &mut Response) {
    status_line(res, StatusCode::NOT_FOUND);
    res.header(TEXT);
    res.body(NOT_FOUND_BODY);
}

/// `400` for a request whose body could not be read in full.
pub fn write_bad_request(res: &mut Response, err: &io::Error) {
    status_line(res, StatusCode::BAD_REQUEST);
    res.header(TEXT);
    res.body_vec(format!("400 bad request: {err}\n").into_bytes());
}

pub fn write_method_not_allowed(res: &mut Response, operation: Operation) {
    status_line(res, StatusCode::METHOD_NOT_ALLOWED);
    res.header(operation.allow_header());
    res.header(TEXT);
    res.body("405 method not allowed\n");
}
