//! Request handlers for the three wiki operations.
//!
//! Handlers only ever receive titles that came out of a
//! [`RouteMatch`](crate::router::RouteMatch), so every store call made here is
//! on a validated title.

mod pages;
mod types;

pub use pages::{dispatch, edit, save, view, WikiContext};
pub use types::{WikiRequest, WikiResponse, BODY_FIELD};
