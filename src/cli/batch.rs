//! Batch rewrite command

use super::helpers;
use contextifyer_core::{
    batch::{process_path, BatchOptions},
    error::{ContextifyerError, Result},
    Settings,
};
use std::path::PathBuf;

/// Handle batch rewrite of a file or directory
pub async fn handle(
    settings: Settings,
    input: PathBuf,
    output: PathBuf,
    extension: Option<String>,
    json: bool,
) -> Result<()> {
    let (contextifier, _source) = helpers::build_contextifier(&settings).await?;

    let options = BatchOptions {
        extension: extension
            .map(|e| e.trim_start_matches('.').to_string())
            .unwrap_or_else(|| settings.batch.extension.clone()),
    };

    let report = tokio::task::spawn_blocking(move || {
        process_path(&input, &output, &contextifier, &options)
    })
    .await
    .map_err(|e| ContextifyerError::Other(format!("Batch task failed: {}", e)))??;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for file in &report.processed {
        println!(
            "Processed {} -> {} ({} links)",
            file.input.display(),
            file.output.display(),
            file.links
        );
    }
    for file in &report.skipped {
        println!("Skipped {}: {}", file.input.display(), file.reason);
    }
    println!();
    println!(
        "{} file(s) rewritten, {} skipped, {} link(s)",
        report.processed.len(),
        report.skipped.len(),
        report.total_links()
    );

    Ok(())
}
