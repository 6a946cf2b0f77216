//! Student profile persistence. One row per user, patch-on-save:
//! `created_at` survives re-saves, the profile document is replaced wholesale.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::StudentProfile;

#[derive(Debug, FromRow)]
struct ProfileRow {
    user_id: String,
    profile: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileRecord {
    pub user_id: String,
    pub profile: StudentProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_record(self) -> Result<StudentProfileRecord, AppError> {
        let profile: StudentProfile = serde_json::from_value(self.profile).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Stored profile for user {} is not decodable: {e}",
                self.user_id
            ))
        })?;
        Ok(StudentProfileRecord {
            user_id: self.user_id,
            profile,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub async fn upsert_profile(
    pool: &PgPool,
    user_id: &str,
    profile: &StudentProfile,
) -> Result<StudentProfileRecord, AppError> {
    let profile_value = serde_json::to_value(profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))?;

    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO student_profiles (user_id, profile, created_at, updated_at)
        VALUES ($1, $2, now(), now())
        ON CONFLICT (user_id)
        DO UPDATE SET profile = EXCLUDED.profile, updated_at = now()
        RETURNING user_id, profile, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(&profile_value)
    .fetch_one(pool)
    .await?;

    info!("Saved student profile for user {user_id}");
    row.into_record()
}

pub async fn get_profile(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<StudentProfileRecord>, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT user_id, profile, created_at, updated_at FROM student_profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.map(ProfileRow::into_record).transpose()
}
