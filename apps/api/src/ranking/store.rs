//! Ranking store — at most one current snapshot per owner, latest wins.
//!
//! The store is a trait so the orchestrator stays testable without Postgres;
//! `PgRankingStore` is the deployment backend. The upsert is a single
//! `ON CONFLICT` statement, so concurrent regenerations for one owner cannot
//! interleave a lookup with a write: the replace-or-insert is atomic per key
//! and `created_at` survives regeneration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::errors::AppError;
use crate::models::ranking::{RankedCareerList, RankingSnapshot};

#[async_trait]
pub trait RankingStore: Send + Sync {
    /// Replaces the owner's snapshot wholesale, creating it on first write.
    async fn upsert(
        &self,
        owner_id: &str,
        entries: &RankedCareerList,
    ) -> Result<RankingSnapshot, AppError>;

    /// The owner's current snapshot, if one has ever been stored.
    async fn get_latest(&self, owner_id: &str) -> Result<Option<RankingSnapshot>, AppError>;
}

#[derive(Debug, FromRow)]
struct RankingRow {
    user_id: String,
    entries: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RankingRow {
    fn into_snapshot(self) -> Result<RankingSnapshot, AppError> {
        let entries: RankedCareerList = serde_json::from_value(self.entries).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Stored ranking for user {} is not decodable: {e}",
                self.user_id
            ))
        })?;
        Ok(RankingSnapshot {
            owner_id: self.user_id,
            entries,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub struct PgRankingStore {
    pool: PgPool,
}

impl PgRankingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RankingStore for PgRankingStore {
    async fn upsert(
        &self,
        owner_id: &str,
        entries: &RankedCareerList,
    ) -> Result<RankingSnapshot, AppError> {
        let entries_value = serde_json::to_value(entries).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize ranking entries: {e}"))
        })?;

        let row = sqlx::query_as::<_, RankingRow>(
            r#"
            INSERT INTO career_rankings (user_id, entries, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            ON CONFLICT (user_id)
            DO UPDATE SET entries = EXCLUDED.entries, updated_at = now()
            RETURNING user_id, entries, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&entries_value)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored ranking snapshot for user {owner_id}");
        row.into_snapshot()
    }

    async fn get_latest(&self, owner_id: &str) -> Result<Option<RankingSnapshot>, AppError> {
        let row = sqlx::query_as::<_, RankingRow>(
            "SELECT user_id, entries, created_at, updated_at FROM career_rankings WHERE user_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RankingRow::into_snapshot).transpose()
    }
}

/// In-memory store used by orchestrator and contract tests. Carries the same
/// upsert semantics as the Postgres backend.
#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryRankingStore {
        snapshots: Mutex<HashMap<String, RankingSnapshot>>,
    }

    #[async_trait]
    impl RankingStore for MemoryRankingStore {
        async fn upsert(
            &self,
            owner_id: &str,
            entries: &RankedCareerList,
        ) -> Result<RankingSnapshot, AppError> {
            let now = Utc::now();
            let mut snapshots = self.snapshots.lock().unwrap();
            let snapshot = match snapshots.get(owner_id) {
                Some(existing) => RankingSnapshot {
                    owner_id: owner_id.to_string(),
                    entries: entries.clone(),
                    created_at: existing.created_at,
                    updated_at: now,
                },
                None => RankingSnapshot {
                    owner_id: owner_id.to_string(),
                    entries: entries.clone(),
                    created_at: now,
                    updated_at: now,
                },
            };
            snapshots.insert(owner_id.to_string(), snapshot.clone());
            Ok(snapshot)
        }

        async fn get_latest(&self, owner_id: &str) -> Result<Option<RankingSnapshot>, AppError> {
            Ok(self.snapshots.lock().unwrap().get(owner_id).cloned())
        }
    }

    impl MemoryRankingStore {
        pub fn snapshot_count(&self) -> usize {
            self.snapshots.lock().unwrap().len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryRankingStore;
    use super::*;
    use crate::ranking::extractor::extract_ranking;
    use serde_json::json;

    fn ranking(name_prefix: &str) -> RankedCareerList {
        let items: Vec<serde_json::Value> = (1..=10)
            .map(|rank| {
                json!({
                    "rank": rank,
                    "careerName": format!("{name_prefix} {rank}"),
                    "compatibilityScore": 85,
                    "subjectAlignment": 85,
                    "interestAlignment": 90,
                    "riskMatch": 80,
                    "accessibility": 75,
                    "marketGrowth": 88,
                    "whyItMatches": "Fits the profile.",
                    "requiredStream": "Any",
                    "entranceExams": ["CUET"],
                    "topCollegesIndia": ["DU"],
                    "skillsRequired": ["communication"],
                    "salaryRangeIndia": "₹4L – ₹12L per annum",
                    "fiveYearOutlook": "Stable demand.",
                    "riskLevel": "Low",
                    "backupPathways": ["Teaching"],
                    "alternativeRoutes": "State universities via CUET."
                })
            })
            .collect();
        extract_ranking(&serde_json::Value::Array(items).to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent_per_owner() {
        let store = MemoryRankingStore::default();

        let first = store.upsert("user-1", &ranking("First")).await.unwrap();
        let second = store.upsert("user-1", &ranking("Second")).await.unwrap();

        assert_eq!(store.snapshot_count(), 1);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);

        let latest = store.get_latest("user-1").await.unwrap().unwrap();
        assert_eq!(latest.entries.entries()[0].career_name, "Second 1");
    }

    #[tokio::test]
    async fn test_get_latest_absent_owner_is_none() {
        let store = MemoryRankingStore::default();
        assert!(store.get_latest("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_owners_partition_snapshots() {
        let store = MemoryRankingStore::default();
        store.upsert("user-1", &ranking("A")).await.unwrap();
        store.upsert("user-2", &ranking("B")).await.unwrap();

        assert_eq!(store.snapshot_count(), 2);
        let a = store.get_latest("user-1").await.unwrap().unwrap();
        let b = store.get_latest("user-2").await.unwrap().unwrap();
        assert_eq!(a.entries.entries()[0].career_name, "A 1");
        assert_eq!(b.entries.entries()[0].career_name, "B 1");
    }
}
