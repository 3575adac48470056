use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Student inputs collected by the audit step of the upstream form.
///
/// Field names are serialized camelCase to match the form's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub education: String,
    pub primary_goal: String,
    pub geographic_constraints: String,
    pub technical_skills: Vec<String>,
    pub gpa: f64,
    pub gpa_scale: f64,
    pub experience_text: String,
}

/// One internship posting as supplied by the caller: either pre-structured
/// fields or a pasted raw-text blob. Raw text is only consulted when
/// `required_skills` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingInput {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl ListingInput {
    /// Convenience constructor for raw pasted postings.
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        Self {
            role: String::new(),
            company: String::new(),
            required_skills: Vec::new(),
            description: String::new(),
            raw_text: Some(text.into()),
        }
    }

    /// The free text backing extraction and goal alignment: pasted raw text
    /// when present, the provided description otherwise.
    pub(crate) fn body_text(&self) -> &str {
        match self.raw_text.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => &self.description,
        }
    }
}

/// Placeholder used when no role line can be recovered from a posting.
pub const UNKNOWN_ROLE: &str = "Unknown Role";
/// Placeholder used when no company name can be recovered from a posting.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Extractor output: the normalized view of one posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredListing {
    pub role: String,
    pub company: String,
    pub required_skills: BTreeSet<String>,
}

impl StructuredListing {
    /// Whether the company field is a recovered name rather than a placeholder.
    pub fn has_named_company(&self) -> bool {
        !self.company.trim().is_empty() && self.company != UNKNOWN_COMPANY
    }
}

/// The four rubric factors, in the tie-breaking order used when selecting a
/// dominant driver for the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    SkillMatch,
    Credibility,
    AcceptanceProbability,
    CareerImpact,
}

impl ScoreFactor {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactor::SkillMatch => "skill match",
            ScoreFactor::Credibility => "credibility",
            ScoreFactor::AcceptanceProbability => "acceptance probability",
            ScoreFactor::CareerImpact => "career impact",
        }
    }

    pub(crate) const ALL: [ScoreFactor; 4] = [
        ScoreFactor::SkillMatch,
        ScoreFactor::Credibility,
        ScoreFactor::AcceptanceProbability,
        ScoreFactor::CareerImpact,
    ];
}

/// Three-way verdict band, serialized as the product-facing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Strong Apply")]
    StrongApply,
    #[serde(rename = "Apply Only If Low Effort")]
    ApplyIfLowEffort,
    #[serde(rename = "Not Worth Your Time")]
    NotWorthIt,
}

impl Classification {
    pub const fn label(self) -> &'static str {
        match self {
            Classification::StrongApply => "Strong Apply",
            Classification::ApplyIfLowEffort => "Apply Only If Low Effort",
            Classification::NotWorthIt => "Not Worth Your Time",
        }
    }
}

/// Complete rubric output for one listing: four sub-scores plus the derived
/// ROI and classification. All values lie in [0, 10].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub skill_match: f64,
    pub credibility: f64,
    pub acceptance_probability: f64,
    pub career_impact: f64,
    pub roi: f64,
    pub classification: Classification,
}

impl ScoreSet {
    fn value_of(&self, factor: ScoreFactor) -> f64 {
        match factor {
            ScoreFactor::SkillMatch => self.skill_match,
            ScoreFactor::Credibility => self.credibility,
            ScoreFactor::AcceptanceProbability => self.acceptance_probability,
            ScoreFactor::CareerImpact => self.career_impact,
        }
    }

    /// The lowest-scoring factor; ties resolve to the earliest declared.
    pub fn weakest(&self) -> ScoreFactor {
        let mut weakest = ScoreFactor::SkillMatch;
        for factor in ScoreFactor::ALL {
            if self.value_of(factor) < self.value_of(weakest) {
                weakest = factor;
            }
        }
        weakest
    }

    /// The highest-scoring factor; ties resolve to the earliest declared.
    pub fn strongest(&self) -> ScoreFactor {
        let mut strongest = ScoreFactor::SkillMatch;
        for factor in ScoreFactor::ALL {
            if self.value_of(factor) > self.value_of(strongest) {
                strongest = factor;
            }
        }
        strongest
    }
}

/// Per-listing analysis: the structured listing, its scores, and the
/// templated narrative. Write-once; the engine never mutates a record after
/// composing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(flatten)]
    pub listing: StructuredListing,
    #[serde(flatten)]
    pub scores: ScoreSet,
    pub reasons: Vec<String>,
    pub risks: Vec<String>,
    pub hard_verdict: String,
}

/// Full engine output: a profile summary line plus one record per input
/// listing, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReport {
    pub profile_summary: String,
    pub internships: Vec<AnalysisRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(skill: f64, cred: f64, accept: f64, impact: f64) -> ScoreSet {
        ScoreSet {
            skill_match: skill,
            credibility: cred,
            acceptance_probability: accept,
            career_impact: impact,
            roi: 5.0,
            classification: Classification::ApplyIfLowEffort,
        }
    }

    #[test]
    fn weakest_and_strongest_pick_extremes() {
        let set = scores(6.7, 3.0, 6.0, 9.0);
        assert_eq!(set.weakest(), ScoreFactor::Credibility);
        assert_eq!(set.strongest(), ScoreFactor::CareerImpact);
    }

    #[test]
    fn factor_ties_resolve_in_declaration_order() {
        let set = scores(5.0, 5.0, 5.0, 5.0);
        assert_eq!(set.weakest(), ScoreFactor::SkillMatch);
        assert_eq!(set.strongest(), ScoreFactor::SkillMatch);
    }

    #[test]
    fn classification_serializes_as_product_strings() {
        let json = serde_json::to_string(&Classification::NotWorthIt).expect("serialize");
        assert_eq!(json, "\"Not Worth Your Time\"");
        let parsed: Classification =
            serde_json::from_str("\"Strong Apply\"").expect("deserialize");
        assert_eq!(parsed, Classification::StrongApply);
    }

    #[test]
    fn listing_input_prefers_raw_text_body() {
        let mut input = ListingInput::from_raw_text("pasted posting");
        input.description = "provided description".to_string();
        assert_eq!(input.body_text(), "pasted posting");

        input.raw_text = Some("   ".to_string());
        assert_eq!(input.body_text(), "provided description");
    }
}
