use crate::error::Result;
use crate::io;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Destination for rendered files.
pub trait OutputSink {
    fn exists(&self, path: &Path) -> bool;

    /// Write `contents` to `path`, creating parent directories as needed.
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes to the local filesystem with atomic replace.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskSink;

impl OutputSink for DiskSink {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        io::atomic_write(path, contents.as_bytes())
    }
}

/// Keeps files in memory. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, as if it had been written by an earlier run.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Reports existing files from disk but never writes. Backs `--dry-run`.
#[derive(Debug, Clone, Default)]
pub struct PreviewSink {
    planned: BTreeMap<PathBuf, usize>,
}

impl PreviewSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files that would have been written, with their size in bytes.
    pub fn planned(&self) -> &BTreeMap<PathBuf, usize> {
        &self.planned
    }
}

impl OutputSink for PreviewSink {
    fn exists(&self, path: &Path) -> bool {
        self.planned.contains_key(path) || path.exists()
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.planned.insert(path.to_path_buf(), contents.len());
        Ok(())
    }
}
