//! Student profile — the read-only input contract for ranking generation.
//!
//! The profile is owned by the profile store; the ranking pipeline only ever
//! reads it. Closed sets are enums; the seven-cluster interest vector is a
//! struct with non-optional fields so a profile that deserializes is already
//! structurally complete.

use serde::{Deserialize, Serialize};

/// Urban/rural split. Drives the accessibility bias in the compiled prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Urban,
    Rural,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Urban => "urban",
            LocationType::Rural => "rural",
        }
    }
}

/// Stated risk appetite. "safe" additionally pulls government/PSU tracks
/// into the generated ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskAppetite {
    Safe,
    #[default]
    Balanced,
    High,
}

impl RiskAppetite {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskAppetite::Safe => "safe",
            RiskAppetite::Balanced => "balanced",
            RiskAppetite::High => "high",
        }
    }
}

/// Per-subject marks out of 100. Absent subject = not studied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maths: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemistry: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biology: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commerce: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arts: Option<f64>,
}

impl SubjectScores {
    /// (subject, score) pairs for the subjects actually studied.
    pub fn present(&self) -> Vec<(&'static str, f64)> {
        [
            ("maths", self.maths),
            ("physics", self.physics),
            ("chemistry", self.chemistry),
            ("biology", self.biology),
            ("commerce", self.commerce),
            ("arts", self.arts),
        ]
        .into_iter()
        .filter_map(|(name, score)| score.map(|s| (name, s)))
        .collect()
    }
}

/// Interest strength per cluster, 1–10. All seven clusters are mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestVector {
    pub analytical: u8,
    pub creative: u8,
    pub social: u8,
    pub business: u8,
    pub technical: u8,
    pub research: u8,
    pub public_service: u8,
}

impl InterestVector {
    pub fn clusters(&self) -> [(&'static str, u8); 7] {
        [
            ("analytical", self.analytical),
            ("creative", self.creative),
            ("social", self.social),
            ("business", self.business),
            ("technical", self.technical),
            ("research", self.research),
            ("publicService", self.public_service),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocioEconomic {
    pub location_type: LocationType,
    /// Free-form bracket label, e.g. "below_3L". Rendered as "not specified"
    /// in the prompt when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_bracket: Option<String>,
    pub first_gen_college: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    /// Grade/year label, e.g. "12th".
    pub class_level: String,
    /// Academic stream label, e.g. "Science (PCM)" or "undecided".
    pub stream: String,
    #[serde(default)]
    pub subject_scores: SubjectScores,
    pub interest_vector: InterestVector,
    pub socio_economic: SocioEconomic,
    #[serde(default)]
    pub risk_appetite: RiskAppetite,
}

impl StudentProfile {
    /// Range checks that serde's type checks cannot express.
    /// Returns the first violation as a caller-correctable message.
    pub fn validate(&self) -> Result<(), String> {
        if self.class_level.trim().is_empty() {
            return Err("classLevel cannot be empty".to_string());
        }
        if self.stream.trim().is_empty() {
            return Err("stream cannot be empty".to_string());
        }
        for (subject, score) in self.subject_scores.present() {
            if !(0.0..=100.0).contains(&score) {
                return Err(format!(
                    "subjectScores.{subject} must be in [0, 100], got {score}"
                ));
            }
        }
        for (cluster, strength) in self.interest_vector.clusters() {
            if !(1..=10).contains(&strength) {
                return Err(format!(
                    "interestVector.{cluster} must be in [1, 10], got {strength}"
                ));
            }
        }
        Ok(())
    }
}

/// Scenario fixture shared across module tests: rural, low-income,
/// first-generation PCM student with a safe risk appetite.
#[cfg(test)]
pub(crate) fn sample_profile() -> StudentProfile {
    StudentProfile {
        class_level: "12th".to_string(),
        stream: "Science (PCM)".to_string(),
        subject_scores: SubjectScores {
            maths: Some(95.0),
            physics: Some(90.0),
            ..SubjectScores::default()
        },
        interest_vector: InterestVector {
            analytical: 9,
            creative: 3,
            social: 2,
            business: 4,
            technical: 8,
            research: 6,
            public_service: 2,
        },
        socio_economic: SocioEconomic {
            location_type: LocationType::Rural,
            income_bracket: Some("below_3L".to_string()),
            first_gen_college: true,
        },
        risk_appetite: RiskAppetite::Safe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_from_camel_case_wire_form() {
        let json = r#"{
            "classLevel": "12th",
            "stream": "Science (PCM)",
            "subjectScores": {"maths": 95, "physics": 90},
            "interestVector": {
                "analytical": 9, "creative": 3, "social": 2, "business": 4,
                "technical": 8, "research": 6, "publicService": 2
            },
            "socioEconomic": {
                "locationType": "rural",
                "incomeBracket": "below_3L",
                "firstGenCollege": true
            },
            "riskAppetite": "safe"
        }"#;

        let profile: StudentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.class_level, "12th");
        assert_eq!(profile.subject_scores.maths, Some(95.0));
        assert_eq!(profile.subject_scores.biology, None);
        assert_eq!(profile.interest_vector.public_service, 2);
        assert_eq!(profile.socio_economic.location_type, LocationType::Rural);
        assert!(profile.socio_economic.first_gen_college);
        assert_eq!(profile.risk_appetite, RiskAppetite::Safe);
    }

    #[test]
    fn test_interest_vector_missing_cluster_is_rejected() {
        // "research" absent — the seven-key invariant must fail deserialization
        let json = r#"{
            "classLevel": "12th",
            "stream": "Arts",
            "interestVector": {
                "analytical": 5, "creative": 5, "social": 5, "business": 5,
                "technical": 5, "publicService": 5
            },
            "socioEconomic": {"locationType": "urban", "firstGenCollege": false},
            "riskAppetite": "balanced"
        }"#;
        assert!(serde_json::from_str::<StudentProfile>(json).is_err());
    }

    #[test]
    fn test_risk_appetite_defaults_to_balanced() {
        assert_eq!(RiskAppetite::default(), RiskAppetite::Balanced);
    }

    #[test]
    fn test_validate_accepts_sample_profile() {
        assert!(sample_profile().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_subject_score() {
        let mut profile = sample_profile();
        profile.subject_scores.maths = Some(130.0);
        let err = profile.validate().unwrap_err();
        assert!(err.contains("maths"));
    }

    #[test]
    fn test_validate_rejects_zero_interest_strength() {
        let mut profile = sample_profile();
        profile.interest_vector.creative = 0;
        let err = profile.validate().unwrap_err();
        assert!(err.contains("creative"));
    }

    #[test]
    fn test_subject_scores_present_skips_unstudied_subjects() {
        let scores = SubjectScores {
            maths: Some(80.0),
            arts: Some(60.0),
            ..SubjectScores::default()
        };
        let present = scores.present();
        assert_eq!(present, vec![("maths", 80.0), ("arts", 60.0)]);
    }
}
