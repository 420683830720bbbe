//! File I/O for native CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use redline_core::ExportArtifact;

/// Read a workbook file, returning its display name and raw bytes.
pub fn load_file(path: &str) -> Result<(String, Vec<u8>)> {
    let path = Path::new(path);
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    let bytes = fs::read(&canonical)
        .with_context(|| format!("Failed to read file: {}", canonical.display()))?;

    let name = canonical
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "workbook.xlsx".to_string());

    Ok((name, bytes))
}

/// Directory exports land in: the user's download directory, falling
/// back to the current directory.
pub fn download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Write an export artifact under its suggested name.
pub fn save_artifact(artifact: &ExportArtifact) -> Result<PathBuf> {
    let path = download_dir().join(&artifact.file_name);

    fs::write(&path, &artifact.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
