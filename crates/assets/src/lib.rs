//! Local asset storage for screenset.
//!
//! All stores implement the `screenset_core::AssetStore` trait. The
//! [`AssetSource`] wrapper adds the optional-read policy the engine relies on.

pub mod dir;
pub mod in_memory;
pub mod source;

pub use dir::DirAssetStore;
pub use in_memory::InMemoryAssetStore;
pub use source::AssetSource;
