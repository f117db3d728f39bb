//! Optional-read policy over an [`AssetStore`].
//!
//! A missing blob and an unreadable blob both come back as `None` from
//! [`AssetSource::read_optional`]; the caller decides whether absence is
//! fatal for the document it was after.

use screenset_core::AssetStore;
use screenset_core::error::AssetError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared handle to an asset store.
#[derive(Clone)]
pub struct AssetSource {
    store: Arc<dyn AssetStore>,
}

impl AssetSource {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// Read a blob, or `None` if it is missing or unreadable.
    pub fn read_optional(&self, name: &str) -> Option<String> {
        match self.store.read(name) {
            Ok(text) => {
                debug!(store = self.store.name(), asset = name, bytes = text.len(), "Asset loaded");
                Some(text)
            }
            Err(AssetError::NotFound(_)) => {
                debug!(store = self.store.name(), asset = name, "Asset not present");
                None
            }
            Err(e) => {
                warn!(store = self.store.name(), asset = name, error = %e, "Asset unreadable");
                None
            }
        }
    }

    /// Read a blob the caller cannot do without.
    pub fn read_required(&self, name: &str) -> Result<String, AssetError> {
        self.store.read(name)
    }
}

impl std::fmt::Debug for AssetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetSource")
            .field("store", &self.store.name())
            .finish()
    }
}
