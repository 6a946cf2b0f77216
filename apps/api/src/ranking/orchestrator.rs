//! Ranking orchestrator — the single externally exposed operation.
//!
//! Flow: compile prompt → generate → extract + validate → upsert → return.
//! Generation and validation failures short-circuit before the store is
//! touched, so a stored snapshot was always fully valid at write time.
//! Dependencies arrive as injected trait objects, never ambient globals.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::GenerationProvider;
use crate::models::profile::StudentProfile;
use crate::models::ranking::RankedCareerList;
use crate::ranking::extractor::extract_ranking;
use crate::ranking::prompts::build_ranking_prompt;
use crate::ranking::store::RankingStore;

/// Generates, validates, and persists a career ranking for one owner.
///
/// No retry happens here: transport, provider, extraction, and validation
/// failures all propagate, and retry policy stays with the caller.
pub async fn generate_ranking(
    provider: &dyn GenerationProvider,
    store: &dyn RankingStore,
    owner_id: &str,
    profile: &StudentProfile,
) -> Result<RankedCareerList, AppError> {
    profile.validate().map_err(AppError::Input)?;

    let prompt = build_ranking_prompt(profile);
    info!(
        "Requesting career ranking for owner {owner_id} via {}",
        provider.name()
    );

    let raw_reply = provider.generate(&prompt).await?;
    let ranking = extract_ranking(&raw_reply)?;

    let snapshot = store.upsert(owner_id, &ranking).await?;
    info!(
        "Ranking snapshot for owner {owner_id} updated at {}",
        snapshot.updated_at
    );

    Ok(ranking)
}
