use may_minihttp::Request;
use std::collections::HashMap;
use std::io::{self, Read};
use tracing::{debug, warn};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Parsed HTTP request data used by `WikiService`.
#[derive(Debug, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path with the query string removed
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Raw request body
    pub body: Vec<u8>,
}

impl ParsedRequest {
    /// Whether the body is `application/x-www-form-urlencoded`.
    ///
    /// A missing `Content-Type` counts as form data.
    #[must_use]
    pub fn is_form(&self) -> bool {
        self.headers
            .get("content-type")
            .map(|ct| {
                ct.split(';')
                    .next()
                    .unwrap_or("")
                    .trim()
                    .eq_ignore_ascii_case(FORM_CONTENT_TYPE)
            })
            .unwrap_or(true)
    }

    /// Form fields of the body, or `None` when it is declared as anything
    /// other than form data.
    #[must_use]
    pub fn form(&self) -> Option<HashMap<String, Vec<u8>>> {
        if self.is_form() {
            Some(parse_form(&self.body))
        } else {
            debug!(content_type = ?self.headers.get("content-type"), "Non-form body");
            None
        }
    }
}

/// Decode `application/x-www-form-urlencoded` data.
///
/// Values are kept as raw bytes after percent-decoding, so bodies that are not
/// valid UTF-8 survive unchanged. The first occurrence of a field wins.
pub fn parse_form(body: &[u8]) -> HashMap<String, Vec<u8>> {
    let mut form = HashMap::new();
    for pair in body.split(|&b| b == b'&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.iter().position(|&b| b == b'=') {
            Some(i) => (&pair[..i], &pair[i + 1..]),
            None => (pair, &[][..]),
        };
        let key = String::from_utf8_lossy(&decode_component(key)).into_owned();
        form.entry(key).or_insert_with(|| decode_component(value));
    }
    form
}

fn decode_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    urlencoding::decode_binary(&spaced).into_owned()
}

/// Read the whole body, failing when it ends before `Content-Length` bytes.
pub(crate) fn read_body<R: Read>(
    mut reader: R,
    headers: &HashMap<String, String>,
) -> io::Result<Vec<u8>> {
    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;
    let declared = headers
        .get("content-length")
        .and_then(|v| v.trim().parse::<usize>().ok());
    match declared {
        Some(expected) if body.len() < expected => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("request body truncated: {} of {expected} bytes", body.len()),
        )),
        _ => Ok(body),
    }
}

/// Extract method, path, headers and body from a `may_minihttp::Request`.
///
/// # Errors
///
/// Returns the I/O error if the body cannot be read in full.
pub fn parse_request(req: Request) -> io::Result<ParsedRequest> {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let body = read_body(req.body(), &headers).map_err(|e| {
        warn!(method = %method, path = %path, error = %e, "Request body read failed");
        e
    })?;

    debug!(
        method = %method,
        path = %path,
        headers_count = headers.len(),
        body_size_bytes = body.len(),
        "HTTP request parsed"
    );

    Ok(ParsedRequest {
        method,
        path,
        headers,
        body,
    })
}
