use pitchside_core::MatchStore;

use crate::commands::common::{load_public_match, parse_match_id, scoreboard_line};
use crate::error::CliError;

pub async fn run_show<S: MatchStore>(store: &S, id: &str, as_json: bool) -> Result<(), CliError> {
    let id = parse_match_id(id)?;
    store.refresh().await?;
    let view = load_public_match(store, &id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", scoreboard_line(&view, view.timer_seconds));
    }

    Ok(())
}
