#![allow(dead_code)]

pub mod test_server {
    use brrtwiki::config::WikiConfig;
    use brrtwiki::server::{HttpServer, ServerHandle};
    use std::net::{SocketAddr, TcpListener};
    use std::path::{Path, PathBuf};
    use std::sync::Once;
    use tempfile::TempDir;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Wiki server on an ephemeral port with its own page directory.
    ///
    /// Stops the server when dropped; the directory is removed with it.
    pub struct WikiTestServer {
        handle: Option<ServerHandle>,
        addr: SocketAddr,
        data_dir: TempDir,
    }

    impl WikiTestServer {
        pub fn start() -> Self {
            Self::start_with_templates(None)
        }

        pub fn start_with_templates(templates: Option<PathBuf>) -> Self {
            setup_may_runtime();
            let data_dir = tempfile::tempdir().unwrap();
            let config = WikiConfig {
                data_dir: data_dir.path().to_path_buf(),
                template_dir: templates,
                ..WikiConfig::default()
            };
            let service = brrtwiki::cli::build_service(&config).unwrap();

            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            let handle = HttpServer(service).start(addr).unwrap();
            handle.wait_ready().unwrap();

            Self {
                handle: Some(handle),
                addr,
                data_dir,
            }
        }

        pub fn addr(&self) -> SocketAddr {
            self.addr
        }

        pub fn data_dir(&self) -> &Path {
            self.data_dir.path()
        }

        pub fn page_file(&self, title: &str) -> PathBuf {
            self.data_dir().join(format!("{title}.txt"))
        }
    }

    impl Drop for WikiTestServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    #[derive(Debug)]
    pub struct HttpResponse {
        pub status: u16,
        pub headers: Vec<(String, String)>,
        pub body: String,
    }

    impl HttpResponse {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    fn find_header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    /// Send a raw HTTP/1.1 request and read one response, honouring
    /// `Content-Length`.
    pub fn send_request(addr: &SocketAddr, req: &str) -> HttpResponse {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();

        let mut buf = Vec::new();
        let mut tmp = [0u8; 4096];
        let header_end = loop {
            if let Some(pos) = find_header_end(&buf) {
                break pos;
            }
            let n = stream.read(&mut tmp).unwrap();
            assert!(n > 0, "connection closed before headers were read");
            buf.extend_from_slice(&tmp[..n]);
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.lines();
        let status = lines
            .next()
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let headers: Vec<(String, String)> = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();
        let content_length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);

        let body_start = header_end + 4;
        while buf.len() < body_start + content_length {
            let n = stream.read(&mut tmp).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&tmp[..n]);
        }
        let end = buf.len().min(body_start + content_length);
        let body = String::from_utf8_lossy(&buf[body_start..end]).to_string();

        HttpResponse {
            status,
            headers,
            body,
        }
    }

    pub fn get(addr: &SocketAddr, path: &str) -> HttpResponse {
        send_request(addr, &format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n"))
    }

    /// POST an already encoded `body` with the given `Content-Type`.
    pub fn post(addr: &SocketAddr, path: &str, content_type: &str, body: &str) -> HttpResponse {
        send_request(
            addr,
            &format!(
                "POST {path} HTTP/1.1\r\nHost: localhost\r\n\
                 Content-Type: {content_type}\r\n\
                 Content-Length: {}\r\n\r\n{body}",
                body.len()
            ),
        )
    }

    /// POST `fields` as `application/x-www-form-urlencoded`.
    pub fn post_form(addr: &SocketAddr, path: &str, fields: &[(&str, &str)]) -> HttpResponse {
        let body: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter())
            .finish();
        post(addr, path, "application/x-www-form-urlencoded", &body)
    }
}
