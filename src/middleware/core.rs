use std::time::Duration;

use crate::handlers::{WikiRequest, WikiResponse};

pub trait Middleware: Send + Sync {
    /// Returning `Some` short-circuits the handler.
    fn before(&self, _req: &WikiRequest) -> Option<WikiResponse> {
        None
    }
    fn after(&self, _req: &WikiRequest, _res: &WikiResponse, _latency: Duration) {}
}
