//! Shared helper functions for CLI commands

use contextifyer_core::{
    error::Result, ontology::source_from_settings, Contextifier, LabelSource, Settings,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Load settings, letting `--labels-file` override the configured source
pub fn load_settings(config_path: Option<&Path>, labels_file: Option<PathBuf>) -> Result<Settings> {
    let mut settings = Settings::load(config_path)?;
    if let Some(path) = labels_file {
        debug!("Using labels file {} from command line", path.display());
        settings.ontology.labels_file = Some(path);
    }
    Ok(settings)
}

/// Fetch labels and build the linking service
///
/// Also returns the label source so long-running commands can reload.
pub async fn build_contextifier(
    settings: &Settings,
) -> Result<(Contextifier, Arc<dyn LabelSource>)> {
    let source = source_from_settings(&settings.ontology)?;
    info!("Loading labels from {}", source.describe());

    let pairs = source.fetch_labels().await?;
    let contextifier = Contextifier::from_pairs(
        pairs,
        settings.index.duplicate_policy,
        settings.matcher.clone(),
        settings.transformer.clone(),
    )?;
    info!("Reference index ready with {} labels", contextifier.label_count());

    Ok((contextifier, source))
}

/// Read a file, or stdin when `path` is `None` or `-`
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => Ok(std::fs::read_to_string(p)?),
        _ => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}
