//! Label listing command

use super::helpers;
use contextifyer_core::{error::Result, Settings};
use serde_json::json;

/// Handle listing of the normalized label map
pub async fn handle(settings: Settings, json: bool) -> Result<()> {
    let (contextifier, source) = helpers::build_contextifier(&settings).await?;
    let index = contextifier.snapshot();

    if json {
        let entries: Vec<_> = index
            .iter()
            .map(|(label, identifier)| json!({ "label": label, "identifier": identifier }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (label, identifier) in index.iter() {
        println!("{}\t{}", label, identifier);
    }
    eprintln!("{} labels from {}", index.len(), source.describe());

    Ok(())
}
