use pitchside_core::{list_public, MatchStore};

use crate::commands::common::format_match_lines;
use crate::error::CliError;

pub async fn run_list<S: MatchStore>(store: &S, as_json: bool) -> Result<(), CliError> {
    let matches = list_public(store).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for line in format_match_lines(&matches) {
            println!("{line}");
        }
    }

    Ok(())
}
