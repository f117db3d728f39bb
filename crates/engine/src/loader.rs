//! Markup assembly: from an ignition request to a renderer-ready document.
//!
//! Each call walks the same stages:
//!
//! ```text
//! Idle → SourceSelected → BaseLoaded → OverlaysGathered → Merged → Validated → Delivered
//!                    └──────────────┴──────────────────────────────┴──────────→ Failed
//! ```
//!
//! The base document is the only thing that can fail an assembly (besides
//! validation). Theme, localization and platform data are best-effort: a
//! missing or broken overlay is logged and left out.
//!
//! The loader keeps no per-call state. Its capability handles are shared
//! and immutable, so one loader serves any number of concurrent calls.

use crate::merger::{self, LocalizationOverlay, Overlays, ThemeOverlay};
use crate::platform::{EnvLocaleProbe, FixedCountryProbe, PlatformEnricher};
use crate::validator;
use screenset_assets::{AssetSource, DirAssetStore};
use screenset_config::AppConfig;
use screenset_core::error::{AssemblyError, DocumentKind, RemoteError};
use screenset_core::{IgnitionRequest, MarkupDocument, PlatformProbe, keys};
use screenset_remote::{HttpApiTransport, RemoteSource};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Suffix of the theme overlay asset.
pub const THEME_SUFFIX: &str = ".theme.json";

/// Suffix of the localization overlay asset.
pub const LOCALIZATION_SUFFIX: &str = ".i18n.json";

/// Stage of a single assembly call, reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStage {
    Idle,
    SourceSelected,
    BaseLoaded,
    OverlaysGathered,
    Merged,
    Validated,
    Delivered,
    Failed,
}

impl fmt::Display for AssemblyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::SourceSelected => "source_selected",
            Self::BaseLoaded => "base_loaded",
            Self::OverlaysGathered => "overlays_gathered",
            Self::Merged => "merged",
            Self::Validated => "validated",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Asset names derived from one asset path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetNames {
    pub markup: String,
    pub theme: String,
    pub localization: String,
}

impl AssetNames {
    /// `markup/login` and `markup/login.json` both name
    /// `markup/login.json`, `markup/login.theme.json`, `markup/login.i18n.json`.
    pub fn for_path(asset_path: &str) -> Self {
        let stem = asset_path.strip_suffix(".json").unwrap_or(asset_path);
        Self {
            markup: format!("{stem}.json"),
            theme: format!("{stem}{THEME_SUFFIX}"),
            localization: format!("{stem}{LOCALIZATION_SUFFIX}"),
        }
    }
}

/// The markup assembly engine.
#[derive(Clone)]
pub struct MarkupLoader {
    assets: AssetSource,
    remote: Option<RemoteSource>,
    platform: PlatformEnricher,
}

impl MarkupLoader {
    /// A loader serving local assets only.
    pub fn new(assets: AssetSource, platform: PlatformEnricher) -> Self {
        Self {
            assets,
            remote: None,
            platform,
        }
    }

    /// Enable hosted screen-sets.
    pub fn with_remote(mut self, remote: RemoteSource) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Wire a loader from configuration: assets under `asset_root`, the HTTP
    /// transport when an API key is set, and a fixed or locale-derived
    /// country.
    pub fn from_config(config: &AppConfig) -> Result<Self, RemoteError> {
        let assets = AssetSource::new(Arc::new(DirAssetStore::new(config.asset_root.clone())));
        let probe: Arc<dyn PlatformProbe> = match &config.country {
            Some(country) => Arc::new(FixedCountryProbe::new(Some(country.clone()))),
            None => Arc::new(EnvLocaleProbe),
        };
        let mut loader = Self::new(assets, PlatformEnricher::new(probe));
        if config.has_api_key() {
            let transport = HttpApiTransport::from_config(config)?;
            loader = loader.with_remote(RemoteSource::new(Arc::new(transport)));
        }
        Ok(loader)
    }

    /// Assemble the markup for `request`.
    pub async fn assemble(
        &self,
        request: &IgnitionRequest,
    ) -> Result<MarkupDocument, AssemblyError> {
        debug!(stage = %AssemblyStage::Idle, source = request.source_name(), "Assembly requested");
        match self.run(request).await {
            Ok(doc) => {
                info!(
                    stage = %AssemblyStage::Delivered,
                    source = request.source_name(),
                    initial = doc.initial_route().unwrap_or_default(),
                    "Markup assembled"
                );
                Ok(doc)
            }
            Err(e) => {
                warn!(
                    stage = %AssemblyStage::Failed,
                    source = request.source_name(),
                    kind = ?e.kind(),
                    error = %e,
                    "Markup assembly failed"
                );
                Err(e)
            }
        }
    }

    /// Assemble and report through callbacks. Exactly one of them runs.
    pub async fn assemble_with<S, F>(&self, request: &IgnitionRequest, on_loaded: S, on_failed: F)
    where
        S: FnOnce(MarkupDocument),
        F: FnOnce(AssemblyError),
    {
        match self.assemble(request).await {
            Ok(doc) => on_loaded(doc),
            Err(e) => on_failed(e),
        }
    }

    async fn run(&self, request: &IgnitionRequest) -> Result<MarkupDocument, AssemblyError> {
        debug!(stage = %AssemblyStage::SourceSelected, source = request.source_name());

        let (base, mut overlays) = match request {
            IgnitionRequest::Local {
                asset_path,
                initial_route,
                language,
            } => self.load_local(asset_path, initial_route.as_deref(), language.as_deref())?,
            IgnitionRequest::Remote {
                screen_set_id,
                language,
                initial_route,
            } => {
                self.load_remote(screen_set_id, language, initial_route.as_deref())
                    .await?
            }
        };

        overlays.platform = self.platform.fragment();
        debug!(
            stage = %AssemblyStage::OverlaysGathered,
            theme = overlays.theme.is_some(),
            localization = overlays.localization.is_some(),
            platform = overlays.platform.is_some()
        );

        let doc = merger::merge(&base, &overlays);
        debug!(stage = %AssemblyStage::Merged, keys = doc.len());

        validator::validate(&doc)?;
        debug!(stage = %AssemblyStage::Validated);

        Ok(doc)
    }

    /// Base asset plus best-effort theme and localization assets.
    fn load_local(
        &self,
        asset_path: &str,
        initial_route: Option<&str>,
        language: Option<&str>,
    ) -> Result<(MarkupDocument, Overlays), AssemblyError> {
        let names = AssetNames::for_path(asset_path);

        let text = self
            .assets
            .read_optional(&names.markup)
            .ok_or_else(|| AssemblyError::MissingBaseAsset {
                name: names.markup.clone(),
            })?;
        let base = MarkupDocument::parse(&text).map_err(|source| AssemblyError::Parse {
            document: DocumentKind::Markup,
            source,
        })?;
        debug!(stage = %AssemblyStage::BaseLoaded, asset = %names.markup);

        let theme = self
            .read_overlay(&names.theme, DocumentKind::Theme)
            .and_then(ThemeOverlay::from_document);
        let localization = self
            .read_overlay(&names.localization, DocumentKind::Localization)
            .map(|resources| LocalizationOverlay {
                resources,
                language: language.map(String::from),
            });

        Ok((
            base,
            Overlays {
                initial_route: initial_route.map(String::from),
                theme,
                localization,
                platform: None,
            },
        ))
    }

    /// Read and parse an optional overlay asset; any failure means no overlay.
    fn read_overlay(&self, name: &str, document: DocumentKind) -> Option<MarkupDocument> {
        let text = self.assets.read_optional(name)?;
        match MarkupDocument::parse(&text) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!(asset = name, %document, error = %e, "Ignoring unparseable overlay");
                None
            }
        }
    }

    /// Hosted screen-set plus its best-effort theme.
    async fn load_remote(
        &self,
        screen_set_id: &str,
        language: &str,
        initial_route: Option<&str>,
    ) -> Result<(MarkupDocument, Overlays), AssemblyError> {
        let remote = self.remote.as_ref().ok_or_else(|| {
            RemoteError::NotConfigured("no business API transport configured".into())
        })?;

        let screen_set = remote.fetch_screen_set(screen_set_id, language).await?;
        // Requested language first; a server-resolved `lang` in the screen-set wins.
        let mut base = MarkupDocument::new();
        base.insert(keys::LANG, language);
        base.extend(screen_set);
        debug!(stage = %AssemblyStage::BaseLoaded, screen_set_id);

        let theme = match remote.fetch_theme(Some(screen_set_id)).await {
            Ok(styles) => ThemeOverlay::from_document(styles),
            Err(e) => {
                warn!(screen_set_id, error = %e, "Theme unavailable, continuing without it");
                None
            }
        };

        Ok((
            base,
            Overlays {
                initial_route: initial_route.map(String::from),
                theme,
                localization: None,
                platform: None,
            },
        ))
    }
}

impl fmt::Debug for MarkupLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkupLoader")
            .field("assets", &self.assets)
            .field("remote", &self.remote.as_ref().map(|r| r.transport_name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenset_assets::InMemoryAssetStore;
    use screenset_core::ErrorKind;

    fn local_loader(store: InMemoryAssetStore) -> MarkupLoader {
        MarkupLoader::new(
            AssetSource::new(Arc::new(store)),
            PlatformEnricher::new(Arc::new(FixedCountryProbe::default())),
        )
    }

    #[test]
    fn asset_names_follow_suffix_convention() {
        let names = AssetNames::for_path("markup/login");
        assert_eq!(names.markup, "markup/login.json");
        assert_eq!(names.theme, "markup/login.theme.json");
        assert_eq!(names.localization, "markup/login.i18n.json");
        assert_eq!(AssetNames::for_path("markup/login.json"), names);
    }

    #[test]
    fn stage_names() {
        assert_eq!(AssemblyStage::OverlaysGathered.to_string(), "overlays_gathered");
        assert_eq!(AssemblyStage::Failed.to_string(), "failed");
    }

    #[tokio::test]
    async fn remote_request_without_transport_fails() {
        let loader = local_loader(InMemoryAssetStore::new());
        let err = loader
            .assemble(&IgnitionRequest::remote("abc", "en"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteFetch);
        assert!(matches!(
            err,
            AssemblyError::RemoteFetch(RemoteError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn unparseable_base_is_fatal() {
        let loader = local_loader(InMemoryAssetStore::new().with_asset("markup.json", "{"));
        let err = loader
            .assemble(&IgnitionRequest::local("markup"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::Parse {
                document: DocumentKind::Markup,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unparseable_overlays_are_ignored() {
        let loader = local_loader(
            InMemoryAssetStore::new()
                .with_asset("markup.json", r#"{"routing": {"initial": "login"}}"#)
                .with_asset("markup.theme.json", "not json")
                .with_asset("markup.i18n.json", "[]"),
        );
        let doc = loader
            .assemble(&IgnitionRequest::local("markup").with_language("fr"))
            .await
            .unwrap();
        assert!(!doc.contains_key("theme"));
        assert!(!doc.contains_key("i18n"));
        assert!(!doc.contains_key("lang"));
    }

    #[test]
    fn from_config_without_api_key_is_local_only() {
        let loader = MarkupLoader::from_config(&AppConfig::default()).unwrap();
        assert!(loader.remote.is_none());
    }
}
