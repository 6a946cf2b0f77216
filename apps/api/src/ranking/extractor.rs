//! Response extractor & validator — the correctness boundary of the service.
//!
//! The generation provider is an unreliable, untrusted producer: its reply is
//! free-form text that merely claims to contain a ranking. This module either
//! produces a fully valid `RankedCareerList` or rejects the reply as a unit.
//! There is no partial acceptance: nine valid entries plus one invalid entry
//! is not a ranking.
//!
//! Accepted payload shapes, per provider mode:
//!   (a) the reply text contains a JSON array of 10 objects (Gemini);
//!   (b) the reply is a JSON object with a `careers` key holding that array
//!       (OpenAI json_object mode).
//! Both shapes yield the identical internal result.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::models::ranking::{
    CareerRecommendation, RankedCareerList, RequiredStream, RiskLevel,
};
use crate::ranking::prompts::RANKING_SIZE;

/// Tagged parse result for an untrusted reply: either no structured payload
/// could be located/parsed, or a payload was located but violates the
/// ranking invariants.
#[derive(Debug, Error)]
pub enum RankingParseError {
    /// `raw` preserves the original reply for operator diagnostics. It is
    /// logged, never shown to end users.
    #[error("extraction failed: {reason}")]
    Extraction { reason: String, raw: String },

    #[error("validation failed: {0}")]
    Validation(String),
}

impl RankingParseError {
    fn extraction(reason: &str, raw: &str) -> Self {
        RankingParseError::Extraction {
            reason: reason.to_string(),
            raw: raw.to_string(),
        }
    }
}

/// Markers accepted as evidence that a salary string is currency-qualified.
const CURRENCY_MARKERS: &[&str] = &["₹", "inr", "rs", "lakh", "lpa"];

/// Extracts and validates a ranked career list from a raw provider reply.
pub fn extract_ranking(raw: &str) -> Result<RankedCareerList, RankingParseError> {
    let text = strip_json_fences(raw);

    let entries = locate_entries(text, raw)?;
    validate_entries(entries)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from a reply.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim_start())
    } else {
        text
    }
}

/// Structural scan: locate the candidate JSON substring(s), parse, and pull
/// out the careers array. An object container is preferred when it opens
/// before the first bracket (shape b); the bracket-delimited array slice is
/// the fallback (shape a).
fn locate_entries(text: &str, raw: &str) -> Result<Vec<Value>, RankingParseError> {
    let array_slice = text.find('[').and_then(|start| {
        text.rfind(']')
            .filter(|end| *end > start)
            .map(|end| &text[start..=end])
    });
    let object_slice = text.find('{').and_then(|start| {
        text.rfind('}')
            .filter(|end| *end > start)
            .map(|end| &text[start..=end])
    });

    let mut candidates: Vec<&str> = Vec::new();
    match (object_slice, array_slice) {
        (Some(obj), Some(arr)) => {
            // Which container opens first decides which shape we try first;
            // the other remains a fallback for prose around the payload.
            if text.find('{') < text.find('[') {
                candidates.push(obj);
                candidates.push(arr);
            } else {
                candidates.push(arr);
                candidates.push(obj);
            }
        }
        (Some(obj), None) => candidates.push(obj),
        (None, Some(arr)) => candidates.push(arr),
        (None, None) => {
            return Err(RankingParseError::extraction(
                "no structured payload found",
                raw,
            ))
        }
    }

    let mut parsed_but_unusable: Option<&'static str> = None;
    for candidate in candidates {
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Array(items)) => return Ok(items),
            Ok(Value::Object(mut map)) => match map.remove("careers") {
                Some(Value::Array(items)) => return Ok(items),
                _ => parsed_but_unusable = Some("object payload has no careers array"),
            },
            Ok(_) => parsed_but_unusable = Some("payload is not an array or object"),
            Err(_) => {}
        }
    }

    Err(RankingParseError::extraction(
        parsed_but_unusable.unwrap_or("malformed JSON"),
        raw,
    ))
}

/// Validates cardinality, every entry, and the rank permutation, then
/// re-sorts by rank so positional order matches rank order downstream.
fn validate_entries(items: Vec<Value>) -> Result<RankedCareerList, RankingParseError> {
    if items.len() != RANKING_SIZE {
        return Err(RankingParseError::Validation(format!(
            "expected {} entries, got {}",
            RANKING_SIZE,
            items.len()
        )));
    }

    let mut entries = Vec::with_capacity(RANKING_SIZE);
    for (index, item) in items.iter().enumerate() {
        entries.push(validate_entry(index, item)?);
    }

    let mut seen = [false; RANKING_SIZE];
    for entry in &entries {
        let slot = (entry.rank - 1) as usize; // rank already checked to be in [1, 10]
        if seen[slot] {
            return Err(RankingParseError::Validation(format!(
                "duplicate rank {}: ranks must form a permutation of 1..{}",
                entry.rank, RANKING_SIZE
            )));
        }
        seen[slot] = true;
    }

    entries.sort_by_key(|e| e.rank);
    Ok(RankedCareerList::from_validated(entries))
}

fn validate_entry(index: usize, item: &Value) -> Result<CareerRecommendation, RankingParseError> {
    let entry = item.as_object().ok_or_else(|| {
        RankingParseError::Validation(format!("entry {index}: expected a JSON object, got {item}"))
    })?;

    let rank = rank_field(entry, index)?;
    let compatibility_score = score_field(entry, index, "compatibilityScore")?;
    let subject_alignment = score_field(entry, index, "subjectAlignment")?;
    let interest_alignment = score_field(entry, index, "interestAlignment")?;
    let risk_match = score_field(entry, index, "riskMatch")?;
    let accessibility = score_field(entry, index, "accessibility")?;
    let market_growth = score_field(entry, index, "marketGrowth")?;

    // Advisory only: the weighted-sum relationship is prompted, not enforced.
    // Drift is logged so prompt regressions are visible to operators.
    let implied = 0.30 * subject_alignment
        + 0.25 * interest_alignment
        + 0.15 * risk_match
        + 0.15 * accessibility
        + 0.15 * market_growth;
    if (implied - compatibility_score).abs() > 10.0 {
        warn!(
            "entry {index}: compatibilityScore {compatibility_score} drifts from implied weighted sum {implied:.1}"
        );
    }

    let required_stream_raw = string_field(entry, index, "requiredStream")?;
    let required_stream = RequiredStream::parse(&required_stream_raw).ok_or_else(|| {
        RankingParseError::Validation(format!(
            "entry {index}: field requiredStream must be one of Science/Commerce/Arts/Any, got \"{required_stream_raw}\""
        ))
    })?;

    let risk_level_raw = string_field(entry, index, "riskLevel")?;
    let risk_level = RiskLevel::parse(&risk_level_raw).ok_or_else(|| {
        RankingParseError::Validation(format!(
            "entry {index}: field riskLevel must be one of Low/Medium/High, got \"{risk_level_raw}\""
        ))
    })?;

    let salary_range_india = string_field(entry, index, "salaryRangeIndia")?;
    if !has_currency_marker(&salary_range_india) {
        return Err(RankingParseError::Validation(format!(
            "entry {index}: field salaryRangeIndia must be a currency-qualified range, got \"{salary_range_india}\""
        )));
    }

    Ok(CareerRecommendation {
        rank,
        career_name: string_field(entry, index, "careerName")?,
        compatibility_score,
        subject_alignment,
        interest_alignment,
        risk_match,
        accessibility,
        market_growth,
        why_it_matches: string_field(entry, index, "whyItMatches")?,
        required_stream,
        entrance_exams: string_list_field(entry, index, "entranceExams")?,
        top_colleges_india: string_list_field(entry, index, "topCollegesIndia")?,
        skills_required: string_list_field(entry, index, "skillsRequired")?,
        salary_range_india,
        five_year_outlook: string_field(entry, index, "fiveYearOutlook")?,
        risk_level,
        backup_pathways: string_list_field(entry, index, "backupPathways")?,
        alternative_routes: string_field(entry, index, "alternativeRoutes")?,
    })
}

fn require<'a>(
    entry: &'a Map<String, Value>,
    index: usize,
    name: &str,
) -> Result<&'a Value, RankingParseError> {
    entry.get(name).ok_or_else(|| {
        RankingParseError::Validation(format!("entry {index}: missing required field {name}"))
    })
}

fn rank_field(entry: &Map<String, Value>, index: usize) -> Result<u8, RankingParseError> {
    let value = require(entry, index, "rank")?;
    value
        .as_u64()
        .filter(|r| (1..=RANKING_SIZE as u64).contains(r))
        .map(|r| r as u8)
        .ok_or_else(|| {
            RankingParseError::Validation(format!(
                "entry {index}: field rank must be an integer in [1, {RANKING_SIZE}], got {value}"
            ))
        })
}

fn score_field(
    entry: &Map<String, Value>,
    index: usize,
    name: &str,
) -> Result<f64, RankingParseError> {
    let value = require(entry, index, name)?;
    value
        .as_f64()
        .filter(|s| (0.0..=100.0).contains(s))
        .ok_or_else(|| {
            RankingParseError::Validation(format!(
                "entry {index}: field {name} must be a number in [0, 100], got {value}"
            ))
        })
}

fn string_field(
    entry: &Map<String, Value>,
    index: usize,
    name: &str,
) -> Result<String, RankingParseError> {
    let value = require(entry, index, name)?;
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            RankingParseError::Validation(format!(
                "entry {index}: field {name} must be a non-empty string, got {value}"
            ))
        })
}

fn string_list_field(
    entry: &Map<String, Value>,
    index: usize,
    name: &str,
) -> Result<Vec<String>, RankingParseError> {
    let value = require(entry, index, name)?;
    let items = value.as_array().ok_or_else(|| {
        RankingParseError::Validation(format!(
            "entry {index}: field {name} must be a list of strings, got {value}"
        ))
    })?;
    if items.is_empty() {
        return Err(RankingParseError::Validation(format!(
            "entry {index}: field {name} must not be empty"
        )));
    }
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    RankingParseError::Validation(format!(
                        "entry {index}: field {name} contains a non-string or empty element: {item}"
                    ))
                })
        })
        .collect()
}

fn has_currency_marker(salary: &str) -> bool {
    let lower = salary.to_lowercase();
    CURRENCY_MARKERS.iter().any(|marker| lower.contains(marker))
}
