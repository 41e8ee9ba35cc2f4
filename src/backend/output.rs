//! Output boundary interfaces
//!
//! Generated sources and resources (manifest, services file) leave the generator through [`ResourceStore`].
//! The filesystem implementation backs the CLI; the in-memory one backs `--dry-run` and the tests.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::query_bean::GeneratedFile;

/// Where generated artifacts are read from and written to.
///
/// Resource paths are `/`-separated and relative to the resource root (`META-INF/ebean-generated-info.mf`).
pub trait ResourceStore {
    /// Read a previously written resource.
    fn read_resource(&self, path: &str) -> io::Result<String>;

    /// Create or replace a resource.
    fn write_resource(&mut self, path: &str, contents: &str) -> io::Result<()>;

    /// Create or replace a generated source file.
    fn write_source(&mut self, file: &GeneratedFile) -> io::Result<()>;
}

/// Writes sources under `<source_root>/<package path>/<Type>.java` and resources under `resource_root`.
#[derive(Debug, Clone)]
pub struct FsStore {
    source_root: PathBuf,
    resource_root: PathBuf,
}

impl FsStore {
    pub fn new(source_root: impl AsRef<Path>, resource_root: impl AsRef<Path>) -> Self {
        Self {
            source_root: source_root.as_ref().to_path_buf(),
            resource_root: resource_root.as_ref().to_path_buf(),
        }
    }

    pub fn source_path(&self, file: &GeneratedFile) -> PathBuf {
        self.source_root.join(file.relative_path())
    }

    pub fn resource_path(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|s| !s.is_empty())
            .fold(self.resource_root.clone(), |acc, segment| acc.join(segment))
    }
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

impl ResourceStore for FsStore {
    fn read_resource(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.resource_path(path))
    }

    fn write_resource(&mut self, path: &str, contents: &str) -> io::Result<()> {
        write_file(&self.resource_path(path), contents)
    }

    fn write_source(&mut self, file: &GeneratedFile) -> io::Result<()> {
        write_file(&self.source_path(file), &file.source)
    }
}

/// Keeps every artifact in memory, keyed by qualified type name / resource path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sources: BTreeMap<String, String>,
    resources: BTreeMap<String, String>,
    resource_writes: usize,
    read_only_resources: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a resource, e.g. a manifest left behind by an earlier run.
    pub fn with_resource(mut self, path: &str, contents: &str) -> Self {
        self.resources.insert(path.to_string(), contents.to_string());
        self
    }

    /// Reject every resource write with `PermissionDenied`.
    pub fn with_read_only_resources(mut self) -> Self {
        self.read_only_resources = true;
        self
    }

    /// Source text by qualified type name (`org.example.query.QCustomer`).
    pub fn source(&self, qualified_name: &str) -> Option<&str> {
        self.sources.get(qualified_name).map(String::as_str)
    }

    pub fn resource(&self, path: &str) -> Option<&str> {
        self.resources.get(path).map(String::as_str)
    }

    /// Qualified names of all written sources, sorted.
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn resource_paths(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Number of successful resource writes so far.
    pub fn resource_writes(&self) -> usize {
        self.resource_writes
    }
}

impl ResourceStore for MemoryStore {
    fn read_resource(&self, path: &str) -> io::Result<String> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no resource `{path}`")))
    }

    fn write_resource(&mut self, path: &str, contents: &str) -> io::Result<()> {
        if self.read_only_resources {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("resource `{path}` is read-only"),
            ));
        }
        self.resources.insert(path.to_string(), contents.to_string());
        self.resource_writes += 1;
        Ok(())
    }

    fn write_source(&mut self, file: &GeneratedFile) -> io::Result<()> {
        self.sources.insert(file.qualified_name(), file.source.clone());
        Ok(())
    }
}
