//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes content to a file atomically using a temp file and rename.
///
/// The temp file is created in the same directory as the target file so the
/// rename stays on one filesystem. Missing parent directories are created.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.toml");

        atomic_write(&file_path, "[vs]\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "[vs]\n");
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.toml");

        fs::write(&file_path, "old").unwrap();
        atomic_write(&file_path, "new").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("vs").join("config.toml");

        atomic_write(&file_path, "content").unwrap();

        assert!(file_path.exists());
        assert!(!temp_dir.path().join("nested/vs/.config.toml.tmp").exists());
    }
}
