//! HTTP/1.1 request framing for the test servers.
//!
//! Std-only so the integration tests can include it by path.

/// Method, target and lower-cased headers of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RequestHead {
    pub fn content_length(&self) -> usize {
        self.headers
            .iter()
            .find(|(key, _)| key == "content-length")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(0)
    }
}

/// Offset just past the blank line ending the head, once it has arrived.
pub fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

pub fn parse_head(head: &[u8]) -> Option<RequestHead> {
    let head = String::from_utf8_lossy(head);
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();
    Some(RequestHead {
        method,
        path,
        headers,
    })
}

/// Body bytes of a buffered request, cut at `Content-Length`.
pub fn body(buf: &[u8], head_end: usize, content_length: usize) -> String {
    let end = buf.len().min(head_end + content_length);
    String::from_utf8_lossy(&buf[head_end.min(end)..end]).to_string()
}

/// A complete `Connection: close` JSON response.
pub fn response(code: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {code} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}
