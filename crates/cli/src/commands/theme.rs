//! `screenset theme`: Fetch the style library of a hosted screen-set.

use screenset_config::AppConfig;
use screenset_remote::{HttpApiTransport, RemoteSource};
use std::sync::Arc;

pub async fn run(screen_set: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let transport = HttpApiTransport::from_config(&config)?;
    let source = RemoteSource::new(Arc::new(transport));

    let styles = source.fetch_theme(Some(&screen_set)).await?;
    if styles.is_empty() {
        tracing::warn!(screen_set = %screen_set, "Screen-set has no theme");
    }
    println!("{}", styles.to_pretty_json());
    Ok(())
}
