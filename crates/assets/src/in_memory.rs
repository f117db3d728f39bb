//! In-memory asset store: useful for testing and for assets embedded in the binary.

use screenset_core::AssetStore;
use screenset_core::error::AssetError;
use std::collections::HashMap;

/// An asset store that serves blobs from a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetStore {
    entries: HashMap<String, String>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an asset.
    pub fn with_asset(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.entries.insert(name.into(), content.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for InMemoryAssetStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl AssetStore for InMemoryAssetStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn read(&self, name: &str) -> Result<String, AssetError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_added_assets() {
        let store = InMemoryAssetStore::new()
            .with_asset("markup.json", "{}")
            .with_asset("markup.theme.json", r#"{"theme": {}}"#);
        assert_eq!(store.len(), 2);
        assert_eq!(store.read("markup.json").unwrap(), "{}");
        assert!(matches!(store.read("other.json"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn collects_from_pairs() {
        let store: InMemoryAssetStore = vec![("a.json".to_string(), "{}".to_string())]
            .into_iter()
            .collect();
        assert!(!store.is_empty());
        assert!(store.read("a.json").is_ok());
    }
}
