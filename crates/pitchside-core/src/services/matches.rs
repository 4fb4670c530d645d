//! Match creation and listing helpers shared by front-ends.

use crate::error::{Error, Result};
use crate::models::{MatchRecord, Pin, PublicMatch};
use crate::store::MatchStore;

/// Create and persist a new scheduled match. A PIN is generated when none
/// is supplied.
pub async fn create_match<S: MatchStore>(
    store: &S,
    local_team: &str,
    away_team: &str,
    pin: Option<Pin>,
) -> Result<MatchRecord> {
    let record = MatchRecord::new(local_team, away_team, pin.unwrap_or_else(Pin::generate))?;

    if store.get(&record.id).await?.is_some() {
        return Err(Error::InvalidInput(format!(
            "match id {} is already in use",
            record.id
        )));
    }

    store.upsert(&record).await?;
    tracing::info!(
        match_id = %record.id,
        "Created match {} vs {}",
        record.local_team,
        record.away_team
    );
    Ok(record)
}

/// Administrator overview: every match in creation order, PINs stripped.
pub async fn list_public<S: MatchStore>(store: &S) -> Result<Vec<PublicMatch>> {
    Ok(store
        .list()
        .await?
        .iter()
        .map(MatchRecord::public_view)
        .collect())
}
