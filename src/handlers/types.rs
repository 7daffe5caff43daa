use std::collections::HashMap;

use http::{Method, StatusCode};

use crate::error::WikiError;
use crate::router::Operation;

/// Form field carrying the page body on `save`.
pub const BODY_FIELD: &str = "body";

/// A request that has passed routing and title validation.
#[derive(Debug, Clone)]
pub struct WikiRequest {
    pub method: Method,
    pub operation: Operation,
    /// Validated title (`[a-zA-Z0-9]+`)
    pub title: String,
    /// Decoded `application/x-www-form-urlencoded` fields, values as raw bytes
    pub form: HashMap<String, Vec<u8>>,
}

impl WikiRequest {
    /// The submitted `body` field, empty when absent.
    #[must_use]
    pub fn form_body(&self) -> &[u8] {
        self.form.get(BODY_FIELD).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Outcome of a handler, written to the wire by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiResponse {
    /// `200 OK` with a rendered HTML page
    Html(Vec<u8>),
    /// `302 Found` to the given path
    Redirect(String),
    /// Failure with the message sent as the response body
    Error { status: StatusCode, message: String },
}

impl WikiResponse {
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        WikiResponse::Error {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            WikiResponse::Html(_) => StatusCode::OK,
            WikiResponse::Redirect(_) => StatusCode::FOUND,
            WikiResponse::Error { status, .. } => *status,
        }
    }
}

impl From<WikiError> for WikiResponse {
    fn from(err: WikiError) -> Self {
        WikiResponse::error(err.status_code(), err.to_string())
    }
}
