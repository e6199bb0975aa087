//! Output directory management and document writing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::render::{STYLE_FILE, STYLE_SHEET};

/// Create a directory and any missing parents. Existing directories are
/// left untouched.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Recreate a directory from scratch, discarding any previous contents.
pub fn recreate_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }
    fs::create_dir_all(path)?;
    Ok(())
}

/// Write a rendered document, creating intermediate directories as needed.
pub fn write_page(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Write the bundled stylesheet into the edition directory.
pub fn copy_stylesheet(dir: &Path) -> Result<PathBuf> {
    write_page(dir, STYLE_FILE, STYLE_SHEET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_recreate_dir_discards_old_contents() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("edition");

        fs::create_dir_all(target.join("stale")).unwrap();
        fs::write(target.join("stale").join("old.html"), "old").unwrap();

        recreate_dir(&target).unwrap();

        assert!(target.exists());
        assert!(!target.join("stale").exists());
    }

    #[test]
    fn test_write_page_creates_parent_dirs() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("edition").join("leaders");

        let path = write_page(&dir, "article.html", "<html></html>").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_copy_stylesheet_writes_bundled_css() {
        let tmp = tempdir().unwrap();
        let path = copy_stylesheet(tmp.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), "style.css");
        assert!(fs::read_to_string(path).unwrap().contains("body"));
    }
}
