//! Single document transform command

use super::helpers;
use contextifyer_core::{error::Result, Settings};
use std::path::PathBuf;

/// Handle transform of one document to stdout
pub async fn handle(settings: Settings, input: Option<PathBuf>, json: bool) -> Result<()> {
    let text = helpers::read_input(input.as_deref())?;
    let (contextifier, _source) = helpers::build_contextifier(&settings).await?;

    if json {
        let result = contextifier.transform_detailed(&text);
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", contextifier.transform(&text));
    }

    Ok(())
}
