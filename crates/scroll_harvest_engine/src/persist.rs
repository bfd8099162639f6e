use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use scroll_harvest_core::Item;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

#[derive(Serialize)]
struct ResultsExport<'a> {
    exported_utc: &'a str,
    total: usize,
    items: &'a [Item],
}

/// Write the items as pretty JSON to `{dir}/{filename}`, replacing any previous export.
pub fn export_results(
    dir: &Path,
    filename: &str,
    items: &[Item],
    exported_utc: &str,
) -> Result<PathBuf, PersistError> {
    let export = ResultsExport {
        exported_utc,
        total: items.len(),
        items,
    };
    let content = serde_json::to_string_pretty(&export)?;
    AtomicFileWriter::new(dir.to_path_buf()).write(filename, &content)
}
