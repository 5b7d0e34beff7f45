//! Local File Source
//!
//! ローカルファイルを選択ファイルとして読み込む

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::selected_file::{ByteSource, SelectedFile};

/// Range reads against a file on disk; the file is reopened for every read
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ByteSource for LocalFile {
    fn read_range(&self, range: Range<u64>) -> std::io::Result<Vec<u8>> {
        let expected = range.end.saturating_sub(range.start);
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(range.start))?;

        let mut buffer = Vec::with_capacity(expected as usize);
        file.take(expected).read_to_end(&mut buffer)?;

        if buffer.len() as u64 != expected {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "{} changed while reading: expected {} bytes at offset {}, got {}",
                    self.path.display(),
                    expected,
                    range.start,
                    buffer.len()
                ),
            ));
        }

        Ok(buffer)
    }
}

/// Guess the MIME type a browser would declare for this file name
pub fn guess_mime_type(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => "text/csv",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Build a `SelectedFile` from a path (`~` is expanded). Only metadata is read here.
pub fn select_local_file(path: &str) -> Result<SelectedFile> {
    let expanded = shellexpand::tilde(path);
    let path = Path::new(expanded.as_ref());

    let metadata =
        std::fs::metadata(path).with_context(|| format!("Cannot open {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("{} has no file name", path.display()))?;
    let mime_type = guess_mime_type(&name);

    Ok(SelectedFile::new(
        name,
        mime_type,
        metadata.len(),
        Arc::new(LocalFile::new(path)),
    ))
}
