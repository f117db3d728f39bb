//! Capability traits: the external collaborators of the assembler.
//!
//! The engine never touches the filesystem, the network, or the device
//! directly. It is handed one implementation of each trait at construction
//! and shares them across every assembly call, so all three are
//! `Send + Sync` and take `&self`.
//!
//! Implementations: directory and in-memory asset stores (`screenset-assets`),
//! the HTTP business API transport (`screenset-remote`), environment and
//! fixed-value platform probes (`screenset-engine`).

use crate::error::{AssetError, PlatformError, RemoteError};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Read-only access to named text blobs bundled with the application.
pub trait AssetStore: Send + Sync {
    /// A human-readable name for this store (e.g. "dir", "in_memory").
    fn name(&self) -> &str;

    /// Read the whole blob. Missing blobs are `AssetError::NotFound`.
    fn read(&self, name: &str) -> Result<String, AssetError>;
}

/// A request/response channel to the business API.
///
/// One call is one named remote operation. It completes exactly once with
/// either the decoded response object or a [`RemoteError`]; implementations
/// must not retry on their own.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    fn name(&self) -> &str;

    /// Issue `method` (e.g. `accounts.getNativeScreenSet`) with `params`.
    async fn send(
        &self,
        method: &str,
        params: Map<String, Value>,
    ) -> Result<Map<String, Value>, RemoteError>;
}

/// Device/platform detection.
pub trait PlatformProbe: Send + Sync {
    fn name(&self) -> &str;

    /// The ISO 3166 country code of the current network, if known.
    fn network_country(&self) -> Result<Option<String>, PlatformError>;
}
