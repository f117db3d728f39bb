//! `screenset assemble`: Build markup from a local asset or hosted screen-set.

use screenset_config::AppConfig;
use screenset_core::IgnitionRequest;
use screenset_engine::MarkupLoader;
use std::path::PathBuf;

pub struct AssembleArgs {
    pub asset: Option<String>,
    pub screen_set: Option<String>,
    pub lang: Option<String>,
    pub initial_route: Option<String>,
    pub asset_root: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub async fn run(args: AssembleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    run_with(config, args).await
}

async fn run_with(
    mut config: AppConfig,
    args: AssembleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(root) = &args.asset_root {
        config.asset_root = root.clone();
    }

    let request = build_request(&args, &config.default_language)?;
    if matches!(request, IgnitionRequest::Remote { .. }) && !config.has_api_key() {
        return Err("Hosted screen-sets need an API key (set SCREENSET_API_KEY)".into());
    }

    let loader = MarkupLoader::from_config(&config)?;
    let doc = loader.assemble(&request).await?;
    let json = doc.to_pretty_json();

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(path = %path.display(), "Markup written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn build_request(args: &AssembleArgs, default_language: &str) -> Result<IgnitionRequest, String> {
    let language = args
        .lang
        .clone()
        .unwrap_or_else(|| default_language.to_string());

    let request = match (&args.asset, &args.screen_set) {
        (Some(asset), None) => IgnitionRequest::local(asset.clone()).with_language(language),
        (None, Some(screen_set)) => IgnitionRequest::remote(screen_set.clone(), language),
        _ => return Err("Specify exactly one of --asset or --screen-set".into()),
    };

    Ok(match &args.initial_route {
        Some(route) => request.with_initial_route(route.clone()),
        None => request,
    })
}
