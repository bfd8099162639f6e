use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::decode::{decode_page, DecodeError};
use crate::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read page file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch page: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Supplies the page as it looks right now. Every call reflects the current
/// content; nothing is cached between calls.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    async fn load(&self) -> Result<String, SourceError>;

    /// Short human readable description for log lines.
    fn describe(&self) -> String;
}

/// In-memory page whose content can be swapped while a session runs.
#[derive(Debug, Default)]
pub struct StaticPageSource {
    html: RwLock<String>,
}

impl StaticPageSource {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: RwLock::new(html.into()),
        }
    }

    pub fn replace(&self, html: impl Into<String>) {
        *self.html.write().unwrap_or_else(PoisonError::into_inner) = html.into();
    }
}

#[async_trait::async_trait]
impl PageSource for StaticPageSource {
    async fn load(&self) -> Result<String, SourceError> {
        Ok(self
            .html
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn describe(&self) -> String {
        "in-memory page".to_string()
    }
}

/// Page saved on disk; re-read on every load so external updates are picked up.
#[derive(Debug, Clone)]
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl PageSource for FilePageSource {
    async fn load(&self) -> Result<String, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(decode_page(&bytes, None)?.html)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
