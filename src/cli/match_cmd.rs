//! Single phrase match command

use super::helpers;
use contextifyer_core::{error::Result, MatchResult, Settings};

/// Handle lookup of one phrase against the index
pub async fn handle(settings: Settings, text: String, json: bool) -> Result<()> {
    let (contextifier, _source) = helpers::build_contextifier(&settings).await?;
    let result = contextifier.match_text(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        MatchResult::Matched(m) => {
            let kind = if m.exact { "exact" } else { "fuzzy" };
            println!("{} -> {} ({}, '{}', score {:.1})", text, m.identifier, kind, m.label, m.score);
        }
        MatchResult::NoMatch => println!("{} -> no match", text),
    }

    Ok(())
}
