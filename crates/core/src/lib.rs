//! # Screenset Core
//!
//! Domain types, traits, and error definitions for the screenset markup
//! assembler. This crate has **no I/O of its own**: it defines the markup
//! document model and the capability traits (asset storage, remote API
//! transport, platform detection) that the other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping the asset store or transport via configuration
//! - Easy testing with scripted mock implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod capability;
pub mod document;
pub mod error;
pub mod ignition;

// Re-export key types at crate root for ergonomics
pub use capability::{ApiTransport, AssetStore, PlatformProbe};
pub use document::{MarkupDocument, keys};
pub use error::{
    AssemblyError, AssetError, DocumentKind, ErrorKind, ParseError, PlatformError, RemoteError,
    RemoteErrorKind, ValidationError,
};
pub use ignition::IgnitionRequest;
