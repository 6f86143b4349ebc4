//! Base-name truncation for exported entries
//!
//! Notion appends a long unique-id token to every exported file and directory
//! name, separated from the title by a space. These helpers compute the
//! truncated path; the walker performs the actual rename.

use std::path::{Path, PathBuf};

/// Cut a base name at its last interior space. Names without one are left
/// alone, which makes truncation idempotent.
fn cut_at_last_space(name: &str) -> Option<&str> {
    match name.rfind(' ') {
        Some(idx) if idx > 0 => Some(&name[..idx]),
        _ => None,
    }
}

/// Compute the truncated path for a file, preserving its extension.
pub fn truncate_file_name(path: &Path) -> PathBuf {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return path.to_path_buf();
    };
    let Some(cut) = cut_at_last_space(name) else {
        return path.to_path_buf();
    };

    let mut base = cut.to_string();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        base.push('.');
        base.push_str(ext);
    }

    match path.parent() {
        Some(parent) => parent.join(base),
        None => PathBuf::from(base),
    }
}

/// Compute the truncated path for a directory.
pub fn truncate_dir_name(path: &Path) -> PathBuf {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return path.to_path_buf();
    };
    let Some(cut) = cut_at_last_space(name) else {
        return path.to_path_buf();
    };

    match path.parent() {
        Some(parent) => parent.join(cut),
        None => PathBuf::from(cut),
    }
}
