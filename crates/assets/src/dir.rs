//! Directory-backed asset store: bundled markup files on disk.
//!
//! Asset names are relative paths below a root directory, e.g.
//! `markup/login.json` resolves to `<root>/markup/login.json`. Names that
//! would leave the root (absolute paths, `..` segments) are reported as
//! not found.

use screenset_core::AssetStore;
use screenset_core::error::AssetError;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// An asset store reading UTF-8 files below a root directory.
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an asset name to a path inside the root.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || !contained {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl AssetStore for DirAssetStore {
    fn name(&self) -> &str {
        "dir"
    }

    fn read(&self, name: &str) -> Result<String, AssetError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        trace!(path = %path.display(), "Reading asset file");

        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetError::NotFound(name.to_string()),
            _ => AssetError::Io {
                name: name.to_string(),
                reason: e.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_nested_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("markup")).unwrap();
        std::fs::write(dir.path().join("markup/login.json"), r#"{"routing": {}}"#).unwrap();

        let store = DirAssetStore::new(dir.path());
        assert_eq!(store.read("markup/login.json").unwrap(), r#"{"routing": {}}"#);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirAssetStore::new(dir.path());
        assert!(matches!(
            store.read("nope.json"),
            Err(AssetError::NotFound(name)) if name == "nope.json"
        ));
    }

    #[test]
    fn escaping_names_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirAssetStore::new(dir.path().join("assets"));
        std::fs::write(dir.path().join("secret.json"), "{}").unwrap();

        assert!(matches!(store.read("../secret.json"), Err(AssetError::NotFound(_))));
        assert!(matches!(store.read("/etc/hosts"), Err(AssetError::NotFound(_))));
        assert!(matches!(store.read(""), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("folder.json")).unwrap();
        let store = DirAssetStore::new(dir.path());
        assert!(matches!(store.read("folder.json"), Err(AssetError::Io { .. })));
    }
}
