use std::collections::BTreeSet;

use super::domain::StructuredListing;
use super::extract::tokenize;
use super::normalize::round1;
use super::reference::{CompanyTier, CompanyTierBook};

/// The four independent sub-scores produced for one (profile, listing) pair,
/// before aggregation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SubScores {
    pub(crate) skill_match: f64,
    pub(crate) credibility: f64,
    pub(crate) acceptance_probability: f64,
    pub(crate) career_impact: f64,
}

pub(crate) fn score_listing(
    profile_skills: &BTreeSet<String>,
    normalized_gpa: f64,
    primary_goal: &str,
    listing: &StructuredListing,
    listing_text: &str,
    tiers: &CompanyTierBook,
) -> SubScores {
    let skill_match = skill_match_score(profile_skills, &listing.required_skills);
    let credibility = credibility_score(listing, tiers);
    let acceptance_probability = acceptance_probability(skill_match, normalized_gpa);
    let career_impact = career_impact_score(primary_goal, &listing.role, listing_text);

    SubScores {
        skill_match: clamped(skill_match, "skill_match"),
        credibility: clamped(credibility, "credibility"),
        acceptance_probability: clamped(acceptance_probability, "acceptance_probability"),
        career_impact: clamped(career_impact, "career_impact"),
    }
}

/// Overlap ratio scaled to 0–10. An empty requirement set scores a neutral
/// 5.0 so unextractable postings are neither rewarded nor punished.
fn skill_match_score(profile_skills: &BTreeSet<String>, listing_skills: &BTreeSet<String>) -> f64 {
    if listing_skills.is_empty() {
        return 5.0;
    }
    let shared = listing_skills.intersection(profile_skills).count();
    round1(shared as f64 / listing_skills.len() as f64 * 10.0)
}

fn credibility_score(listing: &StructuredListing, tiers: &CompanyTierBook) -> f64 {
    if !listing.has_named_company() {
        return CompanyTier::Unverifiable.credibility();
    }
    tiers.tier_for(&listing.company).credibility()
}

/// Ordered if-chain, first match wins. The branches are deliberately not
/// disjoint: a 9.0 skill match with a 5.0 GPA skips the GPA-gated top branch
/// and lands on the ">= 6" branch.
fn acceptance_probability(skill_match: f64, normalized_gpa: f64) -> f64 {
    if skill_match >= 8.0 && normalized_gpa >= 7.0 {
        8.0
    } else if skill_match >= 6.0 {
        6.0
    } else if skill_match >= 4.0 {
        4.0
    } else {
        2.0
    }
}

/// Alignment buckets for the career-impact factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GoalAlignment {
    Full,
    Partial,
    Weak,
    None,
}

impl GoalAlignment {
    pub(crate) const fn score(self) -> f64 {
        match self {
            GoalAlignment::Full => 9.0,
            GoalAlignment::Partial => 6.0,
            GoalAlignment::Weak => 3.0,
            GoalAlignment::None => 1.0,
        }
    }
}

/// Broad-field keyword families used for the "weak" alignment bucket: a goal
/// and role that share a family but no direct keyword are in the same field
/// with different specializations.
const FIELD_GROUPS: &[&[&str]] = &[
    &[
        "software", "engineer", "engineering", "developer", "development", "programming", "swe",
    ],
    &[
        "data", "analytics", "analyst", "science", "scientist", "statistics",
    ],
    &[
        "ml", "ai", "machine", "learning", "intelligence", "research",
    ],
    &[
        "quant", "quantitative", "finance", "financial", "trading",
    ],
    &[
        "security", "infrastructure", "devops", "cloud", "systems", "platform",
    ],
    &[
        "product", "design", "ux", "marketing", "sales",
    ],
];

fn career_impact_score(primary_goal: &str, role: &str, listing_text: &str) -> f64 {
    classify_alignment(primary_goal, role, listing_text).score()
}

pub(crate) fn classify_alignment(
    primary_goal: &str,
    role: &str,
    listing_text: &str,
) -> GoalAlignment {
    let goal_tokens: BTreeSet<String> = tokenize(primary_goal).into_iter().collect();
    if goal_tokens.is_empty() {
        // No stated goal: unassessable rather than zero-alignment.
        return GoalAlignment::Weak;
    }

    let role_tokens: BTreeSet<String> = tokenize(role).into_iter().collect();
    let matched = goal_tokens
        .iter()
        .filter(|goal| role_tokens.iter().any(|role| tokens_overlap(goal, role)))
        .count();

    if matched == goal_tokens.len() {
        return GoalAlignment::Full;
    }
    if matched > 0 {
        return GoalAlignment::Partial;
    }

    let mut broad_tokens = role_tokens;
    broad_tokens.extend(tokenize(listing_text));
    if shares_field_group(&goal_tokens, &broad_tokens) {
        GoalAlignment::Weak
    } else {
        GoalAlignment::None
    }
}

/// Exact match, or substring containment once both tokens are long enough to
/// make containment meaningful ("engineer" / "engineering").
fn tokens_overlap(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    a.len() >= 4 && b.len() >= 4 && (a.contains(b) || b.contains(a))
}

fn shares_field_group(goal_tokens: &BTreeSet<String>, role_tokens: &BTreeSet<String>) -> bool {
    FIELD_GROUPS.iter().any(|group| {
        group.iter().any(|keyword| goal_tokens.contains(*keyword))
            && group.iter().any(|keyword| role_tokens.contains(*keyword))
    })
}

/// Sub-scores must stay in [0, 10]; drifting outside is an internal
/// invariant violation worth logging, not a user error.
fn clamped(value: f64, factor: &'static str) -> f64 {
    if (0.0..=10.0).contains(&value) {
        value
    } else {
        tracing::warn!(factor, value, "sub-score left rubric bounds; clamping");
        value.clamp(0.0, 10.0)
    }
}
