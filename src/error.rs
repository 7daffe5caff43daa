use std::fmt;
use std::io;
use std::path::PathBuf;

use http::StatusCode;

/// Errors produced by the page store and the renderer.
///
/// Every variant is handled at the boundary of the component that detected it:
/// handlers turn [`WikiError::PageNotFound`] into a redirect or an empty page,
/// everything else becomes a `500` carrying the error message.
#[derive(Debug)]
pub enum WikiError {
    /// The backing file for a page does not exist
    PageNotFound {
        /// Title that was looked up
        title: String,
    },
    /// Reading or writing a page file failed
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// A template could not be loaded, found or rendered
    Template {
        /// Template name (`view`, `edit`, ...)
        name: String,
        /// Message from the template engine
        message: String,
    },
}

impl WikiError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WikiError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn template(name: &str, err: impl fmt::Display) -> Self {
        WikiError::Template {
            name: name.to_string(),
            message: err.to_string(),
        }
    }

    /// HTTP status used when this error reaches the response boundary.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            WikiError::PageNotFound { .. } => StatusCode::NOT_FOUND,
            WikiError::Io { .. } | WikiError::Template { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WikiError::PageNotFound { title } => write!(f, "page '{title}' not found"),
            WikiError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            WikiError::Template { name, message } => {
                write!(f, "template '{name}': {message}")
            }
        }
    }
}

impl std::error::Error for WikiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WikiError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
