//! File system utilities.

use crate::Result;
use std::path::Path;

/// Move a file from one location to another.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    // Try rename first (fast, same filesystem)
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }

    // Fall back to copy + delete (cross filesystem)
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)?;
    Ok(())
}
