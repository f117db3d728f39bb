//! Hosted screen-set and theme operations.
//!
//! Both operations are single-shot: one transport call, no retries. The
//! caller decides whether a failure is fatal.

use screenset_core::error::RemoteError;
use screenset_core::{ApiTransport, MarkupDocument, keys};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Remote operation returning a hosted screen-set.
pub const SCREEN_SET_METHOD: &str = "accounts.getNativeScreenSet";

/// Remote operation returning a screen-set's style library.
pub const THEME_METHOD: &str = "accounts.getNSSTheme";

/// The theme requested for every screen-set.
pub const DEFAULT_THEME_ID: &str = "system-default";

/// Fetches hosted markup over a shared transport.
#[derive(Clone)]
pub struct RemoteSource {
    transport: Arc<dyn ApiTransport>,
}

impl RemoteSource {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Fetch a hosted screen-set and return its `screenSet` sub-tree.
    pub async fn fetch_screen_set(
        &self,
        screen_set_id: &str,
        language: &str,
    ) -> Result<MarkupDocument, RemoteError> {
        let mut params = Map::new();
        params.insert("screenSetId".into(), Value::String(screen_set_id.into()));
        params.insert("lang".into(), Value::String(language.into()));

        let mut response = self.transport.send(SCREEN_SET_METHOD, params).await?;
        match response.remove(keys::SCREEN_SET) {
            Some(Value::Object(screen_set)) => {
                debug!(screen_set_id, language, keys = screen_set.len(), "Screen-set fetched");
                Ok(MarkupDocument::from(screen_set))
            }
            Some(_) => Err(RemoteError::InvalidResponse(
                "screenSet must be an object".into(),
            )),
            None => Err(RemoteError::InvalidResponse(
                "response has no screenSet".into(),
            )),
        }
    }

    /// Fetch the style library bound to a screen-set.
    ///
    /// Without a screen-set id no request is made and an empty style
    /// document is returned.
    pub async fn fetch_theme(
        &self,
        screen_set_id: Option<&str>,
    ) -> Result<MarkupDocument, RemoteError> {
        let Some(screen_set_id) = screen_set_id else {
            debug!("No screen-set id, skipping theme request");
            return Ok(MarkupDocument::new());
        };

        let mut params = Map::new();
        params.insert("themeId".into(), Value::String(DEFAULT_THEME_ID.into()));
        params.insert("screenSetId".into(), Value::String(screen_set_id.into()));

        let mut response = self.transport.send(THEME_METHOD, params).await?;
        // The style document arrives JSON-encoded inside a string field.
        match response.remove(keys::THEME) {
            Some(Value::String(encoded)) => MarkupDocument::parse(&encoded)
                .map_err(|e| RemoteError::InvalidResponse(format!("theme: {e}"))),
            Some(Value::Object(styles)) => Ok(MarkupDocument::from(styles)),
            Some(_) => Err(RemoteError::InvalidResponse(
                "theme must be a JSON-encoded string".into(),
            )),
            None => Err(RemoteError::InvalidResponse("response has no theme".into())),
        }
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }
}
