//! Ignition request: the caller's choice of markup source.

use serde::{Deserialize, Serialize};

/// Which source an assembly call builds its markup from.
///
/// Exactly one variant is chosen by the caller; the engine never infers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum IgnitionRequest {
    /// A markup asset bundled with the application.
    Local {
        /// Asset path stem, e.g. `markup/login` (a trailing `.json` is tolerated).
        asset_path: String,
        /// Overrides the document's `routing.initial`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initial_route: Option<String>,
        /// Language applied when a localization overlay is present.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },

    /// A screen-set hosted by the business API.
    Remote {
        screen_set_id: String,
        language: String,
        /// Overrides the hosted screen-set's `routing.initial`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initial_route: Option<String>,
    },
}

impl IgnitionRequest {
    /// Build a local request with no override and no language.
    pub fn local(asset_path: impl Into<String>) -> Self {
        Self::Local {
            asset_path: asset_path.into(),
            initial_route: None,
            language: None,
        }
    }

    /// Build a remote request with no override.
    pub fn remote(screen_set_id: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Remote {
            screen_set_id: screen_set_id.into(),
            language: language.into(),
            initial_route: None,
        }
    }

    /// Set the initial-route override.
    pub fn with_initial_route(mut self, route: impl Into<String>) -> Self {
        match &mut self {
            Self::Local { initial_route, .. } | Self::Remote { initial_route, .. } => {
                *initial_route = Some(route.into());
            }
        }
        self
    }

    /// Set the language. On the remote path this replaces the requested language.
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        match &mut self {
            Self::Local { language, .. } => *language = Some(lang.into()),
            Self::Remote { language, .. } => *language = lang.into(),
        }
        self
    }

    pub fn initial_route(&self) -> Option<&str> {
        match self {
            Self::Local { initial_route, .. } | Self::Remote { initial_route, .. } => {
                initial_route.as_deref()
            }
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Self::Local { language, .. } => language.as_deref(),
            Self::Remote { language, .. } => Some(language),
        }
    }

    /// `"local"` or `"remote"`, for log fields.
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::Local { .. } => "local",
            Self::Remote { .. } => "remote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_fields() {
        let req = IgnitionRequest::local("markup/login")
            .with_initial_route("register")
            .with_language("fr");
        assert_eq!(req.initial_route(), Some("register"));
        assert_eq!(req.language(), Some("fr"));
        assert_eq!(req.source_name(), "local");

        let req = IgnitionRequest::remote("Default-RegistrationLogin", "en").with_language("de");
        assert_eq!(req.language(), Some("de"));
        assert_eq!(req.initial_route(), None);
        assert_eq!(req.source_name(), "remote");
    }

    #[test]
    fn tagged_serialization() {
        let req = IgnitionRequest::remote("abc", "en");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["source"], "remote");
        assert_eq!(json["screen_set_id"], "abc");
        assert!(json.get("initial_route").is_none());

        let parsed: IgnitionRequest = serde_json::from_str(
            r#"{"source": "local", "asset_path": "markup", "initial_route": "login"}"#,
        )
        .unwrap();
        assert_eq!(parsed.initial_route(), Some("login"));
        assert_eq!(parsed.language(), None);
    }
}
