//! Raw configuration sources.
//!
//! Everything the resolver learns about the outside world passes through
//! [`SourceReader`], so tests can swap the process environment and file system
//! for an in-memory fake.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Read access to environment variables and files.
pub trait SourceReader {
    /// Raw value of the environment variable `key`, or `None` when unset.
    ///
    /// Values are returned undecoded; the resolver rejects non-unicode ones.
    fn lookup_env(&self, key: &str) -> Option<OsString>;

    /// Full contents of the file at `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<S: SourceReader + ?Sized> SourceReader for &S {
    fn lookup_env(&self, key: &str) -> Option<OsString> {
        (**self).lookup_env(key)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

/// The real process environment and file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSource;

impl SourceReader for OsSource {
    fn lookup_env(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// In-memory environment and files.
#[derive(Debug, Default)]
pub struct MemorySource {
    env: HashMap<String, OsString>,
    files: HashMap<PathBuf, Vec<u8>>,
    file_reads: AtomicUsize,
}

impl MemorySource {
    /// Empty environment, no files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Number of `read_file` calls so far, including failed ones.
    pub fn file_reads(&self) -> usize {
        self.file_reads.load(Ordering::Relaxed)
    }
}

impl SourceReader for MemorySource {
    fn lookup_env(&self, key: &str) -> Option<OsString> {
        self.env.get(key).cloned()
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.file_reads.fetch_add(1, Ordering::Relaxed);
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such file", path.display()),
            )
        })
    }
}
