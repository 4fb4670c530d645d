use pitchside_core::{public_url_for, MatchStore};

use crate::commands::common::{load_public_match, parse_match_id};
use crate::error::CliError;

pub async fn run_share<S: MatchStore>(store: &S, id: &str, origin: &str) -> Result<(), CliError> {
    let id = parse_match_id(id)?;
    // only hand out links that resolve
    load_public_match(store, &id).await?;
    println!("{}", public_url_for(&id, origin));
    Ok(())
}
