//! Rename plan data model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Current plan file format version.
pub const PLAN_VERSION: &str = "1.0";

/// Plan file structure: the resolved mappings plus everything that stayed
/// unresolved, with reasons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    /// Plan format version.
    pub version: String,
    /// Unique plan ID.
    pub plan_id: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Show name the canonical names were built with.
    pub show_name: String,
    /// Source directory that was scanned.
    pub source_path: PathBuf,
    /// Resolved renames.
    pub mappings: Vec<RenameMapping>,
    /// Names that could not be resolved, with reasons.
    pub unresolved: Vec<Unresolved>,
}

/// A single proposed rename. Only emitted when the new basename differs
/// from the old one; the target directory is the old path's parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameMapping {
    /// Path of the existing file.
    pub old_path: PathBuf,
    /// Proposed new basename, extension included.
    pub new_basename: String,
}

impl RenameMapping {
    /// Full target path: new basename next to the old file.
    pub fn target_path(&self) -> PathBuf {
        match self.old_path.parent() {
            Some(parent) => parent.join(&self.new_basename),
            None => PathBuf::from(&self.new_basename),
        }
    }
}

/// A name the engine could not resolve, locally or via fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unresolved {
    /// Original basename, untouched.
    pub basename: String,
    /// Why it stayed unresolved.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_path_stays_in_parent() {
        let mapping = RenameMapping {
            old_path: PathBuf::from("/media/show/old.mkv"),
            new_basename: "new.mkv".to_string(),
        };
        assert_eq!(mapping.target_path(), PathBuf::from("/media/show/new.mkv"));
    }
}
