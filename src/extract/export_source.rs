use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::{stream, Stream};
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// A single exported chat page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub name: String,
    pub content: String,
}

/// Interface for abstracting where export pages come from.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExportSource: Send + Sync {
    /// Reads a whole export page. `None` means there is no such page.
    async fn read_export(&self, name: &str) -> Result<Option<String>>;
}

/// Reads exports from a directory on disk.
pub struct DirectoryExportSource {
    dir: PathBuf,
}

impl DirectoryExportSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

#[async_trait]
impl ExportSource for DirectoryExportSource {
    async fn read_export(&self, name: &str) -> Result<Option<String>> {
        let path = self.dir.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {path:?}")),
        }
    }
}

/// Exports are numbered `messages.html`, `messages2.html`, `messages3.html` and so on.
pub fn export_file_name(index: u32) -> String {
    if index <= 1 {
        "messages.html".to_string()
    } else {
        format!("messages{index}.html")
    }
}

/// Returns a stream of export pages in order. The stream ends at the first missing page, files
/// after a gap are never looked at.
pub fn discover_exports(source: impl ExportSource + 'static) -> impl Stream<Item = Result<ExportFile>> {
    let source = Arc::new(source);
    stream::unfold(Some(1u32), move |next| {
        let source = source.clone();
        async move {
            let Some(index) = next else {
                return None;
            };
            let name = export_file_name(index);
            match source.read_export(&name).await {
                Ok(Some(content)) => Some((Ok(ExportFile { name, content }), Some(index + 1))),
                Ok(None) => {
                    debug!("No {name}, stopping discovery after {} files", index - 1);
                    None
                }
                Err(e) => Some((Err(e), None)),
            }
        }
    })
}
