//! The console's standard-output stream and scoped silencing.
//!
//! Everything the engine prints for the user (banner, `puts`, result echo)
//! goes through an [`Output`]. [`Output::silence`] swaps the stream for a
//! discard sink until the returned guard is dropped, on every exit path
//! including `?` returns and panics.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

type Target = Box<dyn Write + Send>;

/// Cloneable handle on the console's standard output.
#[derive(Clone)]
pub struct Output {
    target: Arc<Mutex<Target>>,
}

impl Output {
    /// Output bound to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(target: Target) -> Self {
        Self {
            target: Arc::new(Mutex::new(target)),
        }
    }

    /// Output writing into an in-memory buffer, for embedding and tests.
    pub fn buffer() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (Self::new(Box::new(buffer.clone())), buffer)
    }

    /// Redirect output to a discard sink until the guard is dropped.
    pub fn silence(&self) -> SilenceGuard {
        let mut target = self.lock();
        if let Err(e) = target.flush() {
            tracing::debug!(error = %e, "flush before silencing failed");
        }
        let previous = std::mem::replace(&mut *target, Box::new(io::sink()));
        SilenceGuard {
            target: Arc::clone(&self.target),
            previous: Some(previous),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Target> {
        self.target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// Keeps an [`Output`] silenced while alive; restores the stream on drop.
#[must_use = "output is restored as soon as the guard is dropped"]
pub struct SilenceGuard {
    target: Arc<Mutex<Target>>,
    previous: Option<Target>,
}

impl Drop for SilenceGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let mut target = self
                .target
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *target = previous;
        }
    }
}

/// In-memory `Write` target shared between clones.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self
            .bytes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
