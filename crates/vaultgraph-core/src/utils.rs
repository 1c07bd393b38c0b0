//! Shared helpers for note paths and rounding.

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Vault-relative POSIX path (`folder/note.md`) for a file under `root`.
///
/// Returns `None` when `path` is not under `root` or contains `..`.
pub fn to_posix_relative(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Strip one trailing `.md`
pub fn strip_md_extension(reference: &str) -> &str {
    reference.strip_suffix(".md").unwrap_or(reference)
}

/// File stem of a POSIX relative path: `a/b/Note.md` -> `Note`
pub fn note_stem(relative_path: &str) -> &str {
    let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    }
}

/// Whether a loose note reference names the file at `relative_path`.
///
/// Matches on the file stem or on the relative path without `.md`, after
/// stripping one trailing `.md` from the reference.
pub fn matches_note_reference(relative_path: &str, reference: &str) -> bool {
    let bare = strip_md_extension(reference.trim());
    if bare.is_empty() {
        return false;
    }
    note_stem(relative_path) == bare || strip_md_extension(relative_path) == bare
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Expand `~` and environment variables, then make the path absolute
pub fn expand_vault_path(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::invalid_path("Path contains invalid UTF-8"))?;

    let expanded = shellexpand::full(path_str)
        .map_err(|e| Error::invalid_path(format!("Failed to expand path: {}", e)))?;
    let expanded_path = PathBuf::from(expanded.as_ref());

    if expanded_path.exists() {
        expanded_path
            .canonicalize()
            .map_err(|e| Error::invalid_path(format!("Failed to resolve path: {}", e)))
    } else if expanded_path.is_absolute() {
        Ok(expanded_path)
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded_path))
            .map_err(|e| Error::invalid_path(format!("Failed to get current directory: {}", e)))
    }
}
