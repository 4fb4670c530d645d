use pitchside_core::{create_match, public_url_for, MatchStore, Pin};

use crate::error::CliError;

pub async fn run_create<S: MatchStore>(
    store: &S,
    local: &str,
    away: &str,
    pin: Option<&str>,
    origin: &str,
) -> Result<(), CliError> {
    let pin = pin
        .map(|value| value.parse::<Pin>().map_err(CliError::InvalidPin))
        .transpose()?;
    let record = create_match(store, local, away, pin).await?;

    println!("Created match {}", record.id);
    println!("  {} vs {}", record.local_team, record.away_team);
    println!("  Admin PIN:  {}", record.pin);
    println!("  Public URL: {}", public_url_for(&record.id, origin));
    Ok(())
}
