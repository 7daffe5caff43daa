use std::time::Duration;

use tracing::{info, warn};

use super::Middleware;
use crate::handlers::{WikiRequest, WikiResponse};

/// Logs one line per handled request.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn after(&self, req: &WikiRequest, res: &WikiResponse, latency: Duration) {
        let status = res.status().as_u16();
        let latency_us = latency.as_micros() as u64;
        if res.status().is_server_error() {
            warn!(
                method = %req.method,
                operation = %req.operation,
                title = %req.title,
                status,
                latency_us,
                "Request failed"
            );
        } else {
            info!(
                method = %req.method,
                operation = %req.operation,
                title = %req.title,
                status,
                latency_us,
                "Request handled"
            );
        }
    }
}
