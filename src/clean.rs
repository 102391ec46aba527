//! Pre-deploy cleanup of the destination trees.
//!
//! The jniLibs directories are shared with libraries that other tooling puts
//! there, so only `.so` files outside [`PRESERVE_SO`] are removed. The resource
//! tree belongs entirely to this tool and is removed wholesale.

use crate::config::{LIBRARY_SUFFIX, PRESERVE_SO};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Remove the resource tree. Returns whether anything was removed.
pub fn clean_resource_tree(resource_dir: &Path) -> Result<bool> {
    if !resource_dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(resource_dir).with_context(|| {
        format!(
            "Failed to remove resource directory: {}",
            resource_dir.display()
        )
    })?;
    Ok(true)
}

/// Whether clean mode deletes this library directory entry
pub fn is_managed_library(file_name: &str) -> bool {
    file_name.ends_with(LIBRARY_SUFFIX) && !PRESERVE_SO.contains(&file_name)
}

/// Delete managed `.so` files from one library directory.
///
/// Returns the deleted file names, sorted. Subdirectories and other files are
/// left untouched.
pub fn clean_library_dir(library_dir: &Path) -> Result<Vec<String>> {
    let mut removed = Vec::new();

    if !library_dir.is_dir() {
        return Ok(removed);
    }

    let entries = fs::read_dir(library_dir)
        .with_context(|| format!("Failed to read directory: {}", library_dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if path.is_file() && is_managed_library(&name) {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed.push(name);
        }
    }

    removed.sort();
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_managed_library() {
        assert!(is_managed_library("libMaaCore.so"));
        assert!(!is_managed_library("libjnidispatch.so"));
        assert!(!is_managed_library("libMaaCore.so.1"));
        assert!(!is_managed_library("notes.txt"));
    }

    #[test]
    fn test_clean_library_dir_preserves_foreign_files() {
        let dir = TempDir::new().unwrap();
        let lib = dir.path().join("arm64-v8a");
        fs::create_dir_all(lib.join("nested")).unwrap();
        for name in ["libold.so", "libMaaCore.so", "libjnidispatch.so", "README"] {
            fs::write(lib.join(name), b"x").unwrap();
        }
        fs::write(lib.join("nested/libdeep.so"), b"x").unwrap();

        let removed = clean_library_dir(&lib).unwrap();
        assert_eq!(removed, vec!["libMaaCore.so", "libold.so"]);

        assert!(!lib.join("libold.so").exists());
        assert!(lib.join("libjnidispatch.so").exists());
        assert!(lib.join("README").exists());
        assert!(lib.join("nested/libdeep.so").exists());
    }

    #[test]
    fn test_clean_missing_dirs() {
        let dir = TempDir::new().unwrap();
        assert!(clean_library_dir(&dir.path().join("x86_64")).unwrap().is_empty());
        assert!(!clean_resource_tree(&dir.path().join("MaaResource")).unwrap());
    }

    #[test]
    fn test_clean_resource_tree() {
        let dir = TempDir::new().unwrap();
        let res = dir.path().join("MaaResource");
        fs::create_dir_all(res.join("template")).unwrap();
        fs::write(res.join("template/a.png"), b"png").unwrap();

        assert!(clean_resource_tree(&res).unwrap());
        assert!(!res.exists());
    }
}
