//! Axum route handlers for the Ranking API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::StudentProfile;
use crate::models::ranking::{RankedCareerList, RankingSnapshot};
use crate::ranking::orchestrator::generate_ranking;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRankingRequest {
    pub user_id: String,
    pub profile: StudentProfile,
}

#[derive(Debug, Serialize)]
pub struct GenerateRankingResponse {
    pub careers: RankedCareerList,
}

/// POST /api/v1/rankings/generate
///
/// Runs the full pipeline for the given profile and returns the validated
/// ten-entry ranking. The stored snapshot for the user is replaced wholesale.
pub async fn handle_generate_ranking(
    State(state): State<AppState>,
    Json(request): Json<GenerateRankingRequest>,
) -> Result<Json<GenerateRankingResponse>, AppError> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::Input("userId cannot be empty".to_string()));
    }

    let careers = generate_ranking(
        state.provider.as_ref(),
        state.store.as_ref(),
        &request.user_id,
        &request.profile,
    )
    .await?;

    Ok(Json(GenerateRankingResponse { careers }))
}

/// GET /api/v1/rankings/:user_id
///
/// Returns the user's current snapshot, or 404 if none was ever generated.
pub async fn handle_get_ranking(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<RankingSnapshot>, AppError> {
    state
        .store
        .get_latest(&user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No ranking found for user {user_id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_generate_request_deserializes_wire_form() {
        let body = json!({
            "userId": Uuid::new_v4().to_string(),
            "profile": {
                "classLevel": "12th",
                "stream": "Commerce",
                "subjectScores": {"commerce": 88},
                "interestVector": {
                    "analytical": 6, "creative": 4, "social": 5, "business": 9,
                    "technical": 3, "research": 4, "publicService": 5
                },
                "socioEconomic": {
                    "locationType": "urban",
                    "incomeBracket": "3L_to_8L",
                    "firstGenCollege": false
                },
                "riskAppetite": "balanced"
            }
        });

        let request: GenerateRankingRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.profile.stream, "Commerce");
        assert_eq!(request.profile.subject_scores.commerce, Some(88.0));
    }

    #[test]
    fn test_generate_request_without_profile_is_rejected() {
        let body = json!({"userId": "user-1"});
        assert!(serde_json::from_value::<GenerateRankingRequest>(body).is_err());
    }
}
