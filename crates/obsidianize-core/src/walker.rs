//! Recursive conversion of an export tree
//!
//! Directories are processed depth-first with a fixed per-directory ordering:
//! list entries, rename files, rewrite file content, rename subdirectories,
//! relocate referenced images, then recurse into the (possibly renamed)
//! subdirectories. The tree is mutated in place; the caller is expected to
//! supply a disposable copy of the export.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace};
use ulid::Ulid;

use crate::error::{ConvertError, Result};
use crate::links::{is_image_path, rewrite_links, ImageRelocation};
use crate::table::{csv_to_markdown, fix_csv_links};
use crate::truncate::{truncate_dir_name, truncate_file_name};

/// Counters and path lists accumulated bottom-up through the recursion.
#[derive(Debug, Default, Serialize)]
pub struct ConversionStats {
    /// Every directory visited below the root, post-rename paths
    pub directories: Vec<PathBuf>,
    /// Every file encountered, post-rename paths
    pub files: Vec<PathBuf>,
    /// Links rewritten in Markdown documents
    pub markdown_links: usize,
    /// Link cells converted in CSV documents
    pub csv_links: usize,
    /// Image relocations performed
    pub images: Vec<ImageRelocation>,
}

impl ConversionStats {
    /// Fold a child directory's stats into this one.
    pub fn merge(&mut self, other: ConversionStats) {
        self.directories.extend(other.directories);
        self.files.extend(other.files);
        self.markdown_links += other.markdown_links;
        self.csv_links += other.csv_links;
        self.images.extend(other.images);
    }
}

/// Fix a whole export in place, returning the aggregated stats.
pub fn convert_export(root: &Path) -> Result<ConversionStats> {
    if !root.exists() {
        return Err(ConvertError::ExportNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ConvertError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    convert_directory(root, root)
}

fn convert_directory(root: &Path, dir: &Path) -> Result<ConversionStats> {
    debug!(directory = %dir.display(), "convert_directory");
    let mut stats = ConversionStats::default();

    let (mut files, mut directories) = list_entries(dir)?;

    for file in &mut files {
        process_file(root, dir, file, &mut stats)?;
    }
    stats.files = files;

    rename_directories(&mut directories)?;
    relocate_images(&stats.images, &mut directories)?;

    stats.directories = directories.clone();
    for directory in directories {
        let child = convert_directory(root, &directory)?;
        stats.merge(child);
    }

    Ok(stats)
}

/// Enumerate one directory in readdir order, split into files and
/// subdirectories. Entries that are neither (sockets, broken symlinks) are
/// skipped.
fn list_entries(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut files = Vec::new();
    let mut directories = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            directories.push(entry.path());
        } else if file_type.is_file() {
            files.push(entry.path());
        }
    }
    Ok((files, directories))
}

/// Rename one file to its truncated name, then rewrite its content according
/// to its extension. Images are neither renamed nor rewritten.
fn process_file(root: &Path, dir: &Path, file: &mut PathBuf, stats: &mut ConversionStats) -> Result<()> {
    if !is_image_path(&file.to_string_lossy()) {
        let truncated = truncate_file_name(file);
        if truncated != *file {
            trace!(from = %file.display(), to = %truncated.display(), "rename_file");
            fs::rename(&*file, &truncated)?;
            *file = truncated;
        }
    }

    match file.extension().and_then(|e| e.to_str()) {
        Some("md") => {
            let outcome = rewrite_links(root, dir, &fs::read_to_string(&*file)?);
            // nothing matched: skip the write entirely
            if outcome.links > 0 || !outcome.images.is_empty() {
                fs::write(&*file, &outcome.content)?;
            }
            stats.markdown_links += outcome.links;
            for image in outcome.images {
                if !stats.images.contains(&image) {
                    stats.images.push(image);
                }
            }
        }
        Some("csv") => {
            let (fixed, links) = fix_csv_links(&fs::read_to_string(&*file)?);
            let table = csv_to_markdown(&fixed);
            stats.csv_links += links;
            fs::write(&*file, &fixed)?;
            fs::write(file.with_extension("md"), table)?;
        }
        _ => {}
    }

    Ok(())
}

/// Rename every subdirectory to its truncated name. Truncation can collapse
/// two siblings onto the same name; resolve by appending a random token until
/// the destination is free.
fn rename_directories(directories: &mut [PathBuf]) -> Result<()> {
    for directory in directories.iter_mut() {
        let mut target = truncate_dir_name(directory);
        if target == *directory {
            continue;
        }
        while target.exists() {
            target = collision_target(&target);
        }
        trace!(from = %directory.display(), to = %target.display(), "rename_directory");
        fs::rename(&*directory, &target)?;
        *directory = target;
    }
    Ok(())
}

fn collision_target(path: &Path) -> PathBuf {
    let token = Ulid::new().to_string().to_lowercase();
    let suffix = &token[token.len() - 8..];
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let renamed = format!("{name} - {suffix}");
    match path.parent() {
        Some(parent) => parent.join(renamed),
        None => PathBuf::from(renamed),
    }
}

/// Move every referenced image under the centralized `Images/` directory,
/// then prune the now-empty source directories. Pruned directories are also
/// dropped from the pending recursion list since they no longer exist.
fn relocate_images(images: &[ImageRelocation], directories: &mut Vec<PathBuf>) -> Result<()> {
    for image in images {
        if let Some(parent) = image.new_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        trace!(
            from = %image.original_file_path.display(),
            to = %image.new_file_path.display(),
            "relocate_image"
        );
        fs::rename(&image.original_file_path, &image.new_file_path)?;
    }

    for image in images {
        if let Some(source_dir) = image.original_file_path.parent() {
            if source_dir.exists() {
                fs::remove_dir(source_dir)?;
                directories.retain(|d| d != source_dir);
            }
        }
    }

    Ok(())
}
