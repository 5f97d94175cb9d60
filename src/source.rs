use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// A file offered for import: a name plus a way to read its bytes.
///
/// Importers only read through the handle; they never keep it past the call.
#[async_trait]
pub trait FileHandle: Send + Sync {
    /// File name used for extension routing
    fn name(&self) -> &str;
    /// Read the full binary content
    async fn read_bytes(&self) -> Result<Vec<u8>>;
}

/// A file on the local filesystem
pub struct LocalFile {
    path: PathBuf,
    name: String,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { path, name }
    }
}

#[async_trait]
impl FileHandle for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read file: {}", self.path.display()))
    }
}

/// A file already held in memory, e.g. from an upload or drag-and-drop
pub struct MemoryFile {
    name: String,
    data: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

#[async_trait]
impl FileHandle for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }
}

/// Lowercased text after the final `.` of a file name.
///
/// A name without a dot yields the whole name, lowercased.
pub fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}
