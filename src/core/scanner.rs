//! Directory scanner module.
//!
//! Scans a directory recursively for media files matching the configured
//! extension set, returned in natural sort order for stable output.

use crate::Result;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A media file found during scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub basename: String,
}

/// Segment of a natural sort key: digit runs compare numerically, text runs
/// compare case-insensitively. Numbers order before text.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum KeySegment {
    Number(u64),
    Text(String),
}

/// Natural sort key: "ep2" sorts before "ep10".
fn natural_key(s: &str) -> Vec<KeySegment> {
    let mut segments = Vec::new();
    let mut digits = String::new();
    let mut text = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            if !text.is_empty() {
                segments.push(KeySegment::Text(std::mem::take(&mut text).to_lowercase()));
            }
            digits.push(c);
        } else {
            if !digits.is_empty() {
                let value = std::mem::take(&mut digits).parse().unwrap_or(u64::MAX);
                segments.push(KeySegment::Number(value));
            }
            text.push(c);
        }
    }
    if !digits.is_empty() {
        segments.push(KeySegment::Number(digits.parse().unwrap_or(u64::MAX)));
    }
    if !text.is_empty() {
        segments.push(KeySegment::Text(text.to_lowercase()));
    }

    segments
}

fn natural_cmp(a: &MediaFile, b: &MediaFile) -> Ordering {
    natural_key(&a.basename)
        .cmp(&natural_key(&b.basename))
        .then_with(|| a.path.cmp(&b.path))
}

/// Scan a directory recursively for media files.
///
/// `extensions` is the caller-supplied extension set, without leading dots,
/// matched case-insensitively.
pub fn scan_directory(path: &Path, extensions: &[String]) -> Result<Vec<MediaFile>> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let entry_path = entry.path();
        let matches_ext = entry_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|known| known.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if !matches_ext {
            continue;
        }

        let basename = entry_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        files.push(MediaFile {
            path: entry_path.to_path_buf(),
            basename,
        });
    }

    files.sort_by(natural_cmp);

    tracing::info!("Found {} media files under {}", files.len(), path.display());
    Ok(files)
}
