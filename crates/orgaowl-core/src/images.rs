//! Local cache for task images.
//!
//! A picked image is copied into the cache directory under a generated name
//! and only that name is stored on the task (`Task::image_path`). Front ends
//! resolve it back to a path with [`ImageCache::path_for`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use uuid::Uuid;

use crate::{
    error::{OwlError, Result},
    gateway::builder::APP_PREFIX,
};

/// A directory of cached task images.
#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    /// Uses `dir` as the cache directory. It is created on first store.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Opens the cache at `$XDG_DATA_HOME/orgaowl/images`, creating it if
    /// needed.
    pub fn open_default() -> Result<Self> {
        let dir = xdg::BaseDirectories::with_prefix(APP_PREFIX)
            .create_data_directory("images")
            .map_err(|e| OwlError::XdgDirectory(e.to_string()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies `source` into the cache and returns the generated file name.
    ///
    /// The name is a fresh UUID keeping the source's extension, so storing
    /// the same file twice yields two independent entries.
    ///
    /// # Errors
    ///
    /// Returns `OwlError::InvalidInput` if `source` is not a regular file.
    /// Returns `OwlError::FileSystem` if the directory or copy fails.
    pub fn store(&self, source: &Path) -> Result<String> {
        if !source.is_file() {
            return Err(OwlError::invalid_input("image")
                .with_reason(format!("'{}' is not a file", source.display())));
        }

        fs::create_dir_all(&self.dir).map_err(|e| OwlError::FileSystem {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut name = Uuid::new_v4().to_string();
        if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
            name.push('.');
            name.push_str(&ext.to_ascii_lowercase());
        }

        let target = self.dir.join(&name);
        fs::copy(source, &target).map_err(|e| OwlError::FileSystem {
            path: target.clone(),
            source: e,
        })?;
        debug!("Cached image {} as {}", source.display(), name);
        Ok(name)
    }

    /// Resolves a stored name to its path, or `None` if the name is empty or
    /// the file is gone.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return None;
        }
        let path = self.dir.join(name);
        path.is_file().then_some(path)
    }

    /// Removes a cached image. Missing files are not an error.
    pub fn remove(&self, name: &str) -> Result<()> {
        let Some(path) = self.path_for(name) else {
            return Ok(());
        };
        fs::remove_file(&path).map_err(|e| OwlError::FileSystem { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write_source(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"\x89PNG fake").unwrap();
        path
    }

    #[test]
    fn test_store_copies_under_generated_name() {
        let src_dir = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        let cache = ImageCache::new(cache_dir.path().join("images"));

        let source = write_source(&src_dir, "Carrots.PNG");
        let name = cache.store(&source).unwrap();

        assert!(name.ends_with(".png"));
        assert_ne!(name, "Carrots.PNG");
        let cached = cache.path_for(&name).unwrap();
        assert_eq!(fs::read(cached).unwrap(), b"\x89PNG fake");
        assert!(source.exists());
    }

    #[test]
    fn test_store_twice_gives_distinct_names() {
        let src_dir = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        let cache = ImageCache::new(cache_dir.path());

        let source = write_source(&src_dir, "photo.jpg");
        assert_ne!(cache.store(&source).unwrap(), cache.store(&source).unwrap());
    }

    #[test]
    fn test_store_rejects_missing_file() {
        let cache_dir = TempDir::new().unwrap();
        let cache = ImageCache::new(cache_dir.path());

        let err = cache.store(&cache_dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, OwlError::InvalidInput { .. }));
    }

    #[test]
    fn test_remove_and_resolve() {
        let src_dir = TempDir::new().unwrap();
        let cache_dir = TempDir::new().unwrap();
        let cache = ImageCache::new(cache_dir.path());

        let name = cache.store(&write_source(&src_dir, "a.gif")).unwrap();
        cache.remove(&name).unwrap();
        assert!(cache.path_for(&name).is_none());

        cache.remove(&name).unwrap();
        assert!(cache.path_for("").is_none());
        assert!(cache.path_for("../a.gif").is_none());
    }
}
