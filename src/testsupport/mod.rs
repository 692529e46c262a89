//! Shared test fixtures: temp directories and a scripted HTTP server.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub mod wire;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("portal-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// One request as seen by [`FakeServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Lower-cased header names.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Decoded value of one `application/x-www-form-urlencoded` field.
    pub fn form_value(&self, name: &str) -> Option<String> {
        let url = reqwest::Url::parse(&format!("http://form.invalid/?{}", self.body)).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// HTTP/1.1 server answering with canned `(status, body)` replies in order.
///
/// Once the script runs out every further request gets `200 {}`.
pub struct FakeServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl FakeServer {
    pub async fn start(replies: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            let mut replies = replies.into_iter();
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let Some(request) = read_request(&mut stream).await else {
                    continue;
                };
                recorded.lock().expect("requests lock").push(request);
                let (code, body) = replies.next().unwrap_or((200, "{}"));
                let _ = stream.write_all(wire::response(code, body).as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        Self {
            addr,
            requests,
            task,
        }
    }

    /// Base URL with a trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for FakeServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = wire::head_end(&buf) {
            break end;
        }
    };
    let head = wire::parse_head(&buf[..header_end])?;
    let content_length = head.content_length();
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(RecordedRequest {
        body: wire::body(&buf, header_end, content_length),
        method: head.method,
        path: head.path,
        headers: head.headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert!(file.starts_with(fixture.path()));
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[test]
    fn request_head_is_framed_and_parsed() {
        let raw = b"POST /a%23b.html HTTP/1.1\r\nHost: x\r\nContent-Length: 3\r\n\r\nk=vEXTRA";
        let end = wire::head_end(raw).unwrap();
        let head = wire::parse_head(&raw[..end]).unwrap();
        assert_eq!(head.method, "POST");
        assert_eq!(head.path, "/a%23b.html");
        assert_eq!(head.content_length(), 3);
        assert_eq!(wire::body(raw, end, head.content_length()), "k=v");
        assert_eq!(wire::head_end(b"GET / HTTP/1.1\r\n"), None);
    }

    #[test]
    fn form_value_decodes_fields() {
        let request = RecordedRequest {
            method: "POST".into(),
            path: "/".into(),
            headers: Vec::new(),
            body: "%3Aname=alice&title=hello+world".into(),
        };
        assert_eq!(request.form_value(":name").as_deref(), Some("alice"));
        assert_eq!(request.form_value("title").as_deref(), Some("hello world"));
        assert_eq!(request.form_value("missing"), None);
    }
}
