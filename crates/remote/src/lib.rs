//! Remote screen-set and theme loading for screenset.
//!
//! [`HttpApiTransport`] implements `screenset_core::ApiTransport` over the
//! business REST API. [`RemoteSource`] issues the two named operations the
//! assembler needs on top of any transport.

pub mod http;
pub mod source;

pub use http::HttpApiTransport;
pub use source::{DEFAULT_THEME_ID, RemoteSource, SCREEN_SET_METHOD, THEME_METHOD};
