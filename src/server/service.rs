use super::request::{parse_request, ParsedRequest};
use super::response::{
    write_bad_request, write_method_not_allowed, write_not_found, write_wiki_response,
    LocationHeaders,
};
use crate::handlers::{dispatch, WikiContext, WikiRequest, WikiResponse};
use crate::middleware::Middleware;
use crate::router::{Operation, Router};
use http::{Method, StatusCode};
use may_minihttp::{HttpService, Request, Response};
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// The wiki's `HttpService`.
///
/// Request flow: parse, route (title validation), method check, middleware
/// `before`, handler, middleware `after`, write. Paths the router rejects are
/// answered with `404` before any handler or page file is touched, and so are
/// unreadable bodies (`400`) and `save` bodies that are not form data (`415`).
#[derive(Clone)]
pub struct WikiService {
    pub router: Router,
    pub context: WikiContext,
    middlewares: Vec<Arc<dyn Middleware>>,
    locations: Arc<LocationHeaders>,
}

impl WikiService {
    pub fn new(router: Router, context: WikiContext) -> Self {
        Self {
            router,
            context,
            middlewares: Vec::new(),
            locations: Arc::new(LocationHeaders::new()),
        }
    }

    pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
        self.middlewares.push(middleware);
    }

    /// Route and run a parsed request, returning `None` when the path is
    /// rejected and `Err(operation)` when the method is not allowed.
    fn handle(&self, parsed: &ParsedRequest) -> Option<Result<WikiResponse, Operation>> {
        let route_match = self.router.route(&parsed.path)?;
        let method = match Method::from_bytes(parsed.method.as_bytes()) {
            Ok(m) if route_match.operation.permits(&m) => m,
            _ => {
                warn!(
                    method = %parsed.method,
                    operation = %route_match.operation,
                    "Method not allowed"
                );
                return Some(Err(route_match.operation));
            }
        };

        let form = if route_match.operation == Operation::Save {
            match parsed.form() {
                Some(form) => form,
                None => {
                    warn!(
                        title = %route_match.title,
                        content_type = ?parsed.headers.get("content-type"),
                        "Save rejected: body is not form data"
                    );
                    return Some(Ok(WikiResponse::error(
                        StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        "save expects application/x-www-form-urlencoded",
                    )));
                }
            }
        } else {
            HashMap::new()
        };
        let req = WikiRequest {
            method,
            operation: route_match.operation,
            title: route_match.title,
            form,
        };

        let start = Instant::now();
        let early = self.middlewares.iter().find_map(|mw| mw.before(&req));
        let response = match early {
            Some(resp) => {
                debug!(operation = %req.operation, title = %req.title, "Middleware short-circuit");
                resp
            }
            None => dispatch(&self.context, &req),
        };
        let latency = start.elapsed();
        for mw in &self.middlewares {
            mw.after(&req, &response, latency);
        }
        Some(Ok(response))
    }
}

impl HttpService for WikiService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = match parse_request(req) {
            Ok(parsed) => parsed,
            Err(e) => {
                write_bad_request(res, &e);
                return Ok(());
            }
        };
        match self.handle(&parsed) {
            Some(Ok(response)) => write_wiki_response(res, response, &self.locations),
            Some(Err(operation)) => write_method_not_allowed(res, operation),
            None => write_not_found(res),
        }
        Ok(())
    }
}
