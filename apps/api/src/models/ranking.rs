//! Ranking data model — the validated output contract of the pipeline.
//!
//! `RankedCareerList` can only be built by the extractor after full
//! validation, so any value of that type carries the ten-entry,
//! rank-permutation invariant with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Academic stream a career requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequiredStream {
    Science,
    Commerce,
    Arts,
    Any,
}

impl RequiredStream {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Science" => Some(RequiredStream::Science),
            "Commerce" => Some(RequiredStream::Commerce),
            "Arts" => Some(RequiredStream::Arts),
            "Any" => Some(RequiredStream::Any),
            _ => None,
        }
    }
}

/// Career risk classification as asserted by the generation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(RiskLevel::Low),
            "Medium" => Some(RiskLevel::Medium),
            "High" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

/// One of the ten members of a ranking.
///
/// The five sub-scores and `compatibility_score` are asserted by the
/// generation provider under prompted constraints; locally they are only
/// range-checked. The 30/25/15/15/15 weighted-sum relationship is advisory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    pub rank: u8,
    pub career_name: String,
    pub compatibility_score: f64,
    pub subject_alignment: f64,
    pub interest_alignment: f64,
    pub risk_match: f64,
    pub accessibility: f64,
    pub market_growth: f64,
    pub why_it_matches: String,
    pub required_stream: RequiredStream,
    pub entrance_exams: Vec<String>,
    pub top_colleges_india: Vec<String>,
    pub skills_required: Vec<String>,
    /// Currency-qualified INR range, e.g. "₹6L – ₹25L per annum".
    pub salary_range_india: String,
    pub five_year_outlook: String,
    pub risk_level: RiskLevel,
    pub backup_pathways: Vec<String>,
    pub alternative_routes: String,
}

/// Exactly ten recommendations, sorted by rank, ranks a permutation of 1..10.
///
/// Deserialize exists so persisted snapshots can be read back; snapshots were
/// validated at write time, which is the only write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedCareerList(Vec<CareerRecommendation>);

impl RankedCareerList {
    /// Only the extractor constructs rankings, after full validation.
    pub(crate) fn from_validated(entries: Vec<CareerRecommendation>) -> Self {
        RankedCareerList(entries)
    }

    pub fn entries(&self) -> &[CareerRecommendation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The single persisted "current" ranking for an owner. Replace-on-write,
/// no history: `created_at` survives regeneration, `updated_at` moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSnapshot {
    pub owner_id: String,
    pub entries: RankedCareerList,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_stream_parses_closed_set_only() {
        assert_eq!(RequiredStream::parse("Science"), Some(RequiredStream::Science));
        assert_eq!(RequiredStream::parse("Any"), Some(RequiredStream::Any));
        assert_eq!(RequiredStream::parse("science"), None);
        assert_eq!(RequiredStream::parse("Engineering"), None);
    }

    #[test]
    fn test_risk_level_parses_closed_set_only() {
        assert_eq!(RiskLevel::parse("Medium"), Some(RiskLevel::Medium));
        assert_eq!(RiskLevel::parse("medium"), None);
        assert_eq!(RiskLevel::parse(""), None);
    }

    #[test]
    fn test_recommendation_round_trips_camel_case() {
        let json = r#"{
            "rank": 1,
            "careerName": "Software Engineer",
            "compatibilityScore": 87,
            "subjectAlignment": 85,
            "interestAlignment": 90,
            "riskMatch": 80,
            "accessibility": 75,
            "marketGrowth": 88,
            "whyItMatches": "Strong maths and analytical interest.",
            "requiredStream": "Science",
            "entranceExams": ["JEE Main"],
            "topCollegesIndia": ["IIT Bombay"],
            "skillsRequired": ["programming"],
            "salaryRangeIndia": "₹6L – ₹25L per annum",
            "fiveYearOutlook": "High demand.",
            "riskLevel": "Medium",
            "backupPathways": ["IT Consulting"],
            "alternativeRoutes": "State colleges followed by GATE."
        }"#;

        let rec: CareerRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.rank, 1);
        assert_eq!(rec.required_stream, RequiredStream::Science);
        assert_eq!(rec.risk_level, RiskLevel::Medium);

        let back = serde_json::to_value(&rec).unwrap();
        assert_eq!(back["careerName"], "Software Engineer");
        assert_eq!(back["salaryRangeIndia"], "₹6L – ₹25L per annum");
    }
}
