//! File system operations (read, write, rename, directory).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self, contents))]
    pub(crate) fn write_impl(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).context("Failed to write to file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context("Failed to read file to string")
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn rename_impl(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).context("Failed to rename file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn hard_link_impl(&self, original: &Path, link: &Path) -> Result<()> {
        fs::hard_link(original, link).context("Failed to create hard link")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context("Failed to create directory")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).context("Failed to remove file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("packages.db");

        runtime.write(&file_path, b"[]").unwrap();
        assert!(runtime.exists(&file_path));
        assert_eq!(runtime.read_to_string(&file_path).unwrap(), "[]");

        let new_path = dir.path().join("renamed.db");
        runtime.rename(&file_path, &new_path).unwrap();
        assert!(!runtime.exists(&file_path));
        assert!(runtime.exists(&new_path));

        runtime.remove_file(&new_path).unwrap();
        assert!(!runtime.exists(&new_path));
    }

    #[test]
    fn test_real_runtime_rename_replaces_target() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let target = dir.path().join("packages.db");
        let staged = dir.path().join("packages.db.tmp");

        runtime.write(&target, b"old").unwrap();
        runtime.write(&staged, b"new").unwrap();
        runtime.rename(&staged, &target).unwrap();

        assert_eq!(runtime.read_to_string(&target).unwrap(), "new");
        assert!(!runtime.exists(&staged));
    }

    #[test]
    fn test_real_runtime_hard_link_refuses_existing_target() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let original = dir.path().join("staged");
        let link = dir.path().join("packages.db");

        runtime.write(&original, b"[]").unwrap();
        runtime.hard_link(&original, &link).unwrap();
        assert_eq!(runtime.read_to_string(&link).unwrap(), "[]");

        runtime.write(&original, b"other").unwrap();
        assert!(runtime.hard_link(&original, &link).is_err());
    }

    #[test]
    fn test_real_runtime_create_dir_all() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        runtime.create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());

        // Creating an existing directory is not an error
        runtime.create_dir_all(&nested).unwrap();
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        assert!(runtime.read_to_string(&missing).is_err());
        assert!(runtime.remove_file(&missing).is_err());
        assert!(runtime.rename(&missing, &dir.path().join("new")).is_err());
    }
}
