//! Public links and public lookup.
//!
//! Viewers reach a match through `/match/{id}`. Ids are URL-safe, so they
//! are used as path segments without escaping.

use crate::error::Result;
use crate::models::{MatchId, PublicMatch};
use crate::store::MatchStore;

const MATCH_PATH_PREFIX: &str = "/match/";

/// Shareable public URL for a match. Pure; trailing slashes on `origin` are
/// ignored.
pub fn public_url_for(id: &MatchId, origin: &str) -> String {
    format!(
        "{}{MATCH_PATH_PREFIX}{id}",
        origin.trim().trim_end_matches('/')
    )
}

/// Extract the match id from a `/match/{id}` path.
pub fn match_id_from_path(path: &str) -> Option<MatchId> {
    let rest = path.trim().strip_prefix(MATCH_PATH_PREFIX)?;
    rest.strip_suffix('/').unwrap_or(rest).parse().ok()
}

/// Resolve a public path to the match it names, without the PIN.
///
/// Unparseable paths and unknown ids both resolve to `None`.
pub async fn resolve_public_path<S: MatchStore>(
    store: &S,
    path: &str,
) -> Result<Option<PublicMatch>> {
    let Some(id) = match_id_from_path(path) else {
        return Ok(None);
    };
    Ok(store.get(&id).await?.map(|record| record.public_view()))
}
