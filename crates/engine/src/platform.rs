//! Platform enrichment: best-effort device data for the markup.
//!
//! Currently supported: the ISO 3166 country code of the device network.
//! A probe failure is logged and treated as "no data"; it never fails an
//! assembly.

use screenset_core::error::PlatformError;
use screenset_core::{PlatformProbe, keys};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// The `platform` section of a markup document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformFragment {
    pub iso3166: String,
}

impl PlatformFragment {
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(keys::ISO3166.into(), Value::String(self.iso3166.clone()));
        Value::Object(map)
    }
}

/// Wraps a [`PlatformProbe`] and swallows its failures.
#[derive(Clone)]
pub struct PlatformEnricher {
    probe: Arc<dyn PlatformProbe>,
}

impl PlatformEnricher {
    pub fn new(probe: Arc<dyn PlatformProbe>) -> Self {
        Self { probe }
    }

    /// The detected country code, trimmed and lower-cased. Blank or failed
    /// detection is `None`.
    pub fn detect_country(&self) -> Option<String> {
        match self.probe.network_country() {
            Ok(Some(code)) => {
                let code = code.trim().to_ascii_lowercase();
                if code.is_empty() {
                    None
                } else {
                    debug!(probe = self.probe.name(), country = %code, "Network country detected");
                    Some(code)
                }
            }
            Ok(None) => None,
            Err(e) => {
                warn!(probe = self.probe.name(), error = %e, "Platform detection failed");
                None
            }
        }
    }

    /// The platform fragment, only when there is something to put in it.
    pub fn fragment(&self) -> Option<PlatformFragment> {
        self.detect_country()
            .map(|iso3166| PlatformFragment { iso3166 })
    }
}

/// Reports a fixed country code, or none.
#[derive(Debug, Clone, Default)]
pub struct FixedCountryProbe {
    country: Option<String>,
}

impl FixedCountryProbe {
    pub fn new(country: Option<String>) -> Self {
        Self { country }
    }
}

impl PlatformProbe for FixedCountryProbe {
    fn name(&self) -> &str {
        "fixed"
    }

    fn network_country(&self) -> Result<Option<String>, PlatformError> {
        Ok(self.country.clone())
    }
}

/// Derives the country from the process locale.
///
/// Checks `SCREENSET_COUNTRY` first, then the region part of `LC_ALL`,
/// `LC_MESSAGES` and `LANG` (`fr_CA.UTF-8` → `ca`).
/// A variable without a two-letter region (`es_419`) is skipped.
#[derive(Debug, Clone, Default)]
pub struct EnvLocaleProbe;

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

impl EnvLocaleProbe {
    fn detect(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<String>, PlatformError> {
        if let Some(country) = lookup("SCREENSET_COUNTRY").filter(|c| !c.trim().is_empty()) {
            return Ok(Some(country));
        }
        for var in LOCALE_VARS {
            let Some(locale) = lookup(var) else {
                continue;
            };
            match region_of(&locale) {
                Ok(Some(region)) => return Ok(Some(region)),
                Ok(None) => {}
                Err(e) => debug!(var, error = %e, "Skipping unusable locale"),
            }
        }
        Ok(None)
    }
}

impl PlatformProbe for EnvLocaleProbe {
    fn name(&self) -> &str {
        "env_locale"
    }

    fn network_country(&self) -> Result<Option<String>, PlatformError> {
        Self::detect(|key| std::env::var(key).ok())
    }
}

/// Region subtag of a POSIX or BCP 47 locale name.
fn region_of(locale: &str) -> Result<Option<String>, PlatformError> {
    let name = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    let Some((_, region)) = name.split_once(['_', '-']) else {
        return Ok(None);
    };
    if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(Some(region.to_ascii_lowercase()))
    } else {
        Err(PlatformError::MalformedLocale(locale.to_string()))
    }
}
