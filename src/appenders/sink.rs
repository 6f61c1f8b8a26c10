//! Output destinations for rendered text blocks

use crate::core::{LoggerError, Result};
use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// Shared handle to the writer text blocks go to
///
/// Clones share the same writer and the same lock. Each block is written with
/// a single `write_all` while the lock is held, so blocks from concurrent
/// callers never interleave.
#[derive(Clone)]
pub struct TextSink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    name: &'static str,
}

impl TextSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::named(writer, "writer")
    }

    fn named<W: Write + Send + 'static>(writer: W, name: &'static str) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            name,
        }
    }

    pub fn stderr() -> Self {
        Self::named(io::stderr(), "stderr")
    }

    pub fn stdout() -> Self {
        Self::named(io::stdout(), "stdout")
    }

    /// Append to a file, creating it if needed
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;
        Ok(Self::named(file, "file"))
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Write one complete block and flush it
    pub fn write_block(&self, block: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(block.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Whether two handles share the same writer
    pub fn same_as(&self, other: &TextSink) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl Default for TextSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for TextSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSink")
            .field("name", &self.name)
            .finish()
    }
}

/// In-memory writer whose clones share one buffer
///
/// # Example
///
/// ```
/// use rust_pretty_logger::{SharedBuffer, TextSink};
///
/// let buffer = SharedBuffer::new();
/// let sink = TextSink::new(buffer.clone());
/// sink.write_block("hello\n").unwrap();
/// assert_eq!(buffer.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
