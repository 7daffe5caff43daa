use std::fmt;
use std::str::FromStr;

use http::Method;
use regex::Regex;
use tracing::{debug, warn};

/// Character class a page title must match in full.
pub const TITLE_PATTERN: &str = "[a-zA-Z0-9]+";

/// Anchored request path pattern. Group 1 is the operation, group 2 the title.
const PATH_PATTERN: &str = r"^/(edit|save|view)/([a-zA-Z0-9]+)$";

/// One of the three wiki operations, chosen solely by the path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::View, Operation::Edit, Operation::Save];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Save => "save",
        }
    }

    /// Template rendered by this operation. `Save` never renders.
    #[must_use]
    pub fn template_name(self) -> Option<&'static str> {
        match self {
            Operation::View => Some("view"),
            Operation::Edit => Some("edit"),
            Operation::Save => None,
        }
    }

    /// Value for the `Allow` header of a `405` response.
    #[must_use]
    pub fn allow_header(self) -> &'static str {
        match self {
            Operation::View | Operation::Edit => "Allow: GET",
            Operation::Save => "Allow: POST",
        }
    }

    /// Whether `method` is accepted for this operation.
    #[must_use]
    pub fn permits(self, method: &Method) -> bool {
        match self {
            Operation::View | Operation::Edit => method == Method::GET,
            Operation::Save => method == Method::POST,
        }
    }

    /// Path of this operation for `title`, e.g. `/edit/Home`.
    #[must_use]
    pub fn path_for(self, title: &str) -> String {
        format!("/{}/{title}", self.as_str())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOperationError(pub String);

impl fmt::Display for ParseOperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation '{}'", self.0)
    }
}

impl std::error::Error for ParseOperationError {}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Operation::View),
            "edit" => Ok(Operation::Edit),
            "save" => Ok(Operation::Save),
            other => Err(ParseOperationError(other.to_string())),
        }
    }
}

/// Result of successfully matching a request path.
///
/// `title` has passed [`TITLE_PATTERN`] and is safe to use as a filename stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub operation: Operation,
    pub title: String,
}

/// Validating router for `/(edit|save|view)/<title>` paths.
#[derive(Debug, Clone)]
pub struct Router {
    pattern: Regex,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Compile the path pattern.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::expect_used)]
        let pattern = Regex::new(PATH_PATTERN).expect("Failed to compile path regex");
        Self { pattern }
    }

    /// Match a request path (without query string).
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - the path names a valid operation and title
    /// * `None` - the path is malformed; the caller must answer `404`
    #[must_use]
    pub fn route(&self, path: &str) -> Option<RouteMatch> {
        let Some(caps) = self.pattern.captures(path) else {
            warn!(path = %path, "No route matched");
            return None;
        };
        let operation = caps.get(1)?.as_str().parse::<Operation>().ok()?;
        let title = caps.get(2)?.as_str().to_string();
        debug!(operation = %operation, title = %title, "Route matched");
        Some(RouteMatch { operation, title })
    }
}
