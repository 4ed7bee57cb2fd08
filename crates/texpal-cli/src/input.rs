//! Loading and saving palette and mesh documents.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use texpal_spec::{EditMesh, Palette};

/// Reads a palette document.
pub fn load_palette(path: &Path) -> Result<Palette> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read palette file: {}", path.display()))?;
    Palette::from_json(&json)
        .with_context(|| format!("Failed to parse palette file: {}", path.display()))
}

/// Reads a mesh document.
pub fn load_mesh(path: &Path) -> Result<EditMesh> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mesh file: {}", path.display()))?;
    EditMesh::from_json(&json)
        .with_context(|| format!("Failed to parse mesh file: {}", path.display()))
}

/// Writes `contents` to `path` through a sibling temporary file, so readers
/// never see a half-written document.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));
    fs::write(&tmp, contents).with_context(|| format!("Failed to write: {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace: {}", path.display()))?;
    Ok(())
}

/// Writes a palette document.
pub fn save_palette(path: &Path, palette: &Palette) -> Result<()> {
    let json = palette
        .to_json_pretty()
        .context("Failed to serialize palette")?;
    write_document(path, &json)
}

/// Writes a mesh document.
pub fn save_mesh(path: &Path, mesh: &EditMesh) -> Result<()> {
    let json = mesh.to_json_pretty().context("Failed to serialize mesh")?;
    write_document(path, &json)
}

/// Directory containing `path`, or "." for a bare file name.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
