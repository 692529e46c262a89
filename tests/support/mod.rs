//! Shared helpers for portal integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[path = "../../src/testsupport/wire.rs"]
mod wire;

/// `METHOD path` plus the raw form body of one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub line: String,
    pub body: String,
}

/// Minimal Sling stand-in on `127.0.0.1:*`.
///
/// `.json` paths answer `{"jcr:primaryType":"rep:User"}`, everything else `200`.
pub struct MockSlingServer {
    address: String,
    shutdown: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<SeenRequest>>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl MockSlingServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        listener
            .set_nonblocking(true)
            .expect("nonblocking listener");
        let addr = listener.local_addr().expect("mock server addr");

        let shutdown = Arc::new(AtomicBool::new(false));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown_flag = Arc::clone(&shutdown);
        let seen = Arc::clone(&requests);
        let thread = thread::spawn(move || {
            while !shutdown_flag.load(Ordering::Relaxed) {
                match listener.accept() {
                    Ok((mut stream, _)) => {
                        let _ = handle_request(&mut stream, &seen);
                    }
                    Err(_) => thread::sleep(Duration::from_millis(10)),
                }
            }
        });

        Self {
            address: format!("http://{addr}/"),
            shutdown,
            requests,
            thread: Some(thread),
        }
    }

    pub fn url(&self) -> &str {
        &self.address
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.line)
            .collect()
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for MockSlingServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(host) = self
            .address
            .strip_prefix("http://")
            .map(|h| h.trim_end_matches('/'))
        {
            let _ = TcpStream::connect(host).and_then(|s| s.shutdown(Shutdown::Both));
        }
        if let Some(join) = self.thread.take() {
            let _ = join.join();
        }
    }
}

fn handle_request(stream: &mut TcpStream, seen: &Mutex<Vec<SeenRequest>>) -> Option<()> {
    stream.set_nonblocking(false).ok()?;
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .ok()?;

    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
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
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    // Record before replying.
    seen.lock().expect("requests lock").push(SeenRequest {
        line: format!("{} {}", head.method, head.path),
        body: wire::body(&buf, header_end, content_length),
    });
    let payload = if head.path.ends_with(".json") {
        r#"{"jcr:primaryType":"rep:User"}"#
    } else {
        ""
    };
    let _ = stream.write_all(wire::response(200, payload).as_bytes());
    let _ = stream.flush();
    Some(())
}

/// Fresh directory under the system temp dir, removed on drop.
pub struct Scratch {
    root: PathBuf,
}

impl Scratch {
    pub fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let root = std::env::temp_dir().join(format!(
            "portal-it-{label}-{}-{nanos}",
            std::process::id()
        ));
        fs::create_dir_all(&root).expect("create scratch dir");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, content).expect("write scratch file");
        path
    }

    /// A config file pointing the console at `server_url`, history disabled.
    pub fn config(&self, server_url: &str) -> PathBuf {
        self.write(
            "portal.toml",
            &format!(
                "[server]\nurl = \"{server_url}\"\ntimeout_secs = 5\n\n[console]\nhistory_file = \"\"\n"
            ),
        )
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
