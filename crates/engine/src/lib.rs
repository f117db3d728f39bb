//! Markup assembly engine for screenset.
//!
//! Turns an [`IgnitionRequest`](screenset_core::IgnitionRequest) into a
//! single validated markup document:
//!
//! - [`loader`]: source selection and the assembly stages
//! - [`merger`]: overlay precedence
//! - [`validator`]: the routability invariant
//! - [`platform`]: best-effort device data

pub mod loader;
pub mod merger;
pub mod platform;
pub mod validator;

pub use loader::{AssemblyStage, AssetNames, MarkupLoader};
pub use merger::{LocalizationOverlay, Overlays, ThemeOverlay, merge};
pub use platform::{EnvLocaleProbe, FixedCountryProbe, PlatformEnricher, PlatformFragment};
pub use validator::validate;
