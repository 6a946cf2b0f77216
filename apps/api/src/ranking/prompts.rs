//! Prompt compiler — turns a student profile into the ranking instruction.
//!
//! `build_ranking_prompt` is pure and total: every optional input renders as
//! a default, and profile fields are serialized by hand so compilation can
//! never fail. The prompt states the exact weighting formula and the exact
//! output shape the extractor will enforce.

use crate::models::profile::StudentProfile;

/// Number of careers every ranking must contain. The extractor rejects any
/// other cardinality.
pub const RANKING_SIZE: usize = 10;

/// Ranking prompt template. Placeholders are filled by `build_ranking_prompt`.
const RANKING_PROMPT_TEMPLATE: &str = r#"You are an expert Indian career counselor and data scientist. Analyze the following student profile and return EXACTLY 10 ranked career paths as a JSON array.

STUDENT PROFILE:
- Class/Year: {class_level}
- Stream: {stream}
- Subject Scores: {subject_scores} (out of 100)
- Interest Vector (1-10 scale): {interest_vector}
- Location: {location_type}
- Income Bracket: {income_bracket}
- First Generation College Student: {first_gen}
- Risk Appetite: {risk_appetite}

SCORING FORMULA:
Compatibility Score = (Subject Alignment × 0.30) + (Interest Alignment × 0.25) + (Risk Match × 0.15) + (Accessibility × 0.15) + (Market Growth Index × 0.15)
Scale each factor 0-100. Compute a final compatibility score 0-100.

Return a JSON array of exactly 10 careers, each with this structure (no other text, just the JSON array):
[
  {
    "rank": 1,
    "careerName": "string",
    "compatibilityScore": 87,
    "subjectAlignment": 85,
    "interestAlignment": 90,
    "riskMatch": 80,
    "accessibility": 75,
    "marketGrowth": 88,
    "whyItMatches": "2-3 sentence explanation specific to this student",
    "requiredStream": "Science/Commerce/Arts/Any",
    "entranceExams": ["JEE Main", "JEE Advanced"],
    "topCollegesIndia": ["IIT Bombay", "NIT Trichy", "BITS Pilani"],
    "skillsRequired": ["mathematics", "problem solving", "programming"],
    "salaryRangeIndia": "₹6L – ₹25L per annum",
    "fiveYearOutlook": "High demand. 40% job growth expected by 2029 in India.",
    "riskLevel": "Medium",
    "backupPathways": ["Data Science", "IT Consulting"],
    "alternativeRoutes": "If JEE fails: BITS, state NITs via MHT-CET, or private engineering colleges followed by GATE for PSUs."
  }
]

Make sure:
1. Careers are India-specific and realistic for the student's stream and class
2. Accessibility score accounts for their socioeconomic context (rural/low-income = lower accessibility for highly competitive paths)
3. Risk match aligns with their stated appetite ({risk_appetite})
4. Include government job paths if risk appetite is "safe"
5. All entrance exams must be real Indian exams
6. Salary ranges must be realistic Indian market figures in INR lakh notation"#;

/// Compiles the ranking prompt for a profile. Pure and deterministic.
pub fn build_ranking_prompt(profile: &StudentProfile) -> String {
    let income_bracket = profile
        .socio_economic
        .income_bracket
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or("not specified");

    RANKING_PROMPT_TEMPLATE
        .replace("{class_level}", &profile.class_level)
        .replace("{stream}", &profile.stream)
        .replace("{subject_scores}", &render_subject_scores(profile))
        .replace("{interest_vector}", &render_interest_vector(profile))
        .replace(
            "{location_type}",
            profile.socio_economic.location_type.as_str(),
        )
        .replace("{income_bracket}", income_bracket)
        .replace(
            "{first_gen}",
            if profile.socio_economic.first_gen_college {
                "yes"
            } else {
                "no"
            },
        )
        .replace("{risk_appetite}", profile.risk_appetite.as_str())
}

/// Renders subject scores as a JSON-shaped object by hand. Hand-rendering
/// keeps compilation total; the fixed subject set makes it exhaustive.
fn render_subject_scores(profile: &StudentProfile) -> String {
    let present = profile.subject_scores.present();
    if present.is_empty() {
        return "{} (no scores recorded)".to_string();
    }
    let pairs: Vec<String> = present
        .iter()
        .map(|(subject, score)| format!("\"{subject}\": {score}"))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

fn render_interest_vector(profile: &StudentProfile) -> String {
    let pairs: Vec<String> = profile
        .interest_vector
        .clusters()
        .iter()
        .map(|(cluster, strength)| format!("\"{cluster}\": {strength}"))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}
