//! Deterministic internship decision engine.
//!
//! A pure, synchronous computation: the profile's GPA is normalized once,
//! then every listing runs through extraction, scoring, aggregation, and
//! verdict composition. Identical inputs always produce identical reports;
//! the report preserves the input listing order.

pub mod domain;
pub mod reference;

mod aggregate;
mod extract;
mod import;
mod normalize;
mod score;
mod verdict;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

pub use aggregate::RubricWeights;
pub use domain::{
    AnalysisRecord, Classification, EngineReport, ListingInput, ScoreFactor, ScoreSet,
    StructuredListing, StudentProfile, UNKNOWN_COMPANY, UNKNOWN_ROLE,
};
pub use extract::ExtractorOptions;
pub use import::{listings_from_csv_path, listings_from_csv_reader};
pub use normalize::{normalized_gpa, ValidationError, SUPPORTED_GPA_SCALES};
pub use reference::{
    CompanyTier, CompanyTierBook, ReferenceData, ReferenceDataError, SkillVocabulary,
};

/// Stateless evaluator applying the fixed rubric to (profile, listing) pairs.
/// Reference data and weights are fixed at construction and read-only for
/// the engine's lifetime.
pub struct DecisionEngine {
    reference: ReferenceData,
    weights: RubricWeights,
    extractor: ExtractorOptions,
}

impl DecisionEngine {
    pub fn new(reference: ReferenceData) -> Self {
        Self {
            reference,
            weights: RubricWeights::default(),
            extractor: ExtractorOptions::default(),
        }
    }

    pub fn with_weights(reference: ReferenceData, weights: RubricWeights) -> Self {
        Self {
            reference,
            weights,
            extractor: ExtractorOptions::default(),
        }
    }

    pub fn extractor_options(mut self, options: ExtractorOptions) -> Self {
        self.extractor = options;
        self
    }

    /// Run the full rubric. Fails only when the profile violates the GPA
    /// constraints; garbled listing text degrades to neutral defaults
    /// instead of failing.
    pub fn run(
        &self,
        profile: &StudentProfile,
        listings: &[ListingInput],
    ) -> Result<EngineReport, ValidationError> {
        let gpa = normalize::normalized_gpa(profile.gpa, profile.gpa_scale)?;
        let profile_skills: BTreeSet<String> = profile
            .technical_skills
            .iter()
            .map(|skill| reference::normalize_token(skill))
            .filter(|skill| !skill.is_empty())
            .collect();

        let internships = listings
            .iter()
            .map(|input| self.analyze(profile, gpa, &profile_skills, input))
            .collect();

        Ok(EngineReport {
            profile_summary: profile_summary(profile, gpa),
            internships,
        })
    }

    fn analyze(
        &self,
        profile: &StudentProfile,
        normalized_gpa: f64,
        profile_skills: &BTreeSet<String>,
        input: &ListingInput,
    ) -> AnalysisRecord {
        let listing = extract::extract(input, &self.reference.vocabulary, &self.extractor);
        let sub = score::score_listing(
            profile_skills,
            normalized_gpa,
            &profile.primary_goal,
            &listing,
            input.body_text(),
            &self.reference.tiers,
        );
        let scores = aggregate::aggregate(&sub, &self.weights);
        let (reasons, risks, hard_verdict) =
            verdict::compose(profile_skills, &profile.primary_goal, &listing, &scores);

        AnalysisRecord {
            listing,
            scores,
            reasons,
            risks,
            hard_verdict,
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(ReferenceData::builtin())
    }
}

fn profile_summary(profile: &StudentProfile, normalized_gpa: f64) -> String {
    let education = profile.education.trim();
    let education = if education.is_empty() {
        "Unspecified background"
    } else {
        education
    };
    let goal = profile.primary_goal.trim();
    let goal = if goal.is_empty() { "no stated goal" } else { goal };

    format!(
        "{education} targeting {goal}; GPA {normalized_gpa:.1}/10 normalized; {} declared skills",
        profile.technical_skills.len()
    )
}
