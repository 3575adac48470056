use std::collections::BTreeSet;

use super::domain::{Classification, ScoreFactor, ScoreSet, StructuredListing};

/// Render the numeric result into reason bullets, risk bullets, and one
/// blunt verdict sentence. Template selection is driven entirely by the
/// computed scores, so identical inputs always produce identical text.
pub(crate) fn compose(
    profile_skills: &BTreeSet<String>,
    primary_goal: &str,
    listing: &StructuredListing,
    scores: &ScoreSet,
) -> (Vec<String>, Vec<String>, String) {
    let all_equal = scores.skill_match == scores.credibility
        && scores.credibility == scores.acceptance_probability
        && scores.acceptance_probability == scores.career_impact;

    let (reasons, risks) = if all_equal {
        degenerate_bullets(scores)
    } else {
        (
            reason_bullets(profile_skills, primary_goal, listing, scores),
            risk_bullets(profile_skills, primary_goal, listing, scores),
        )
    };

    let hard_verdict = hard_verdict(listing, scores);
    (reasons, risks, hard_verdict)
}

/// All four factors identical: nothing stands out, so fall back to the
/// generic summary templates.
fn degenerate_bullets(scores: &ScoreSet) -> (Vec<String>, Vec<String>) {
    let reasons = vec![format!(
        "Every factor scores {:.1}/10; the composite ROI of {:.1}/10 is the whole story.",
        scores.skill_match, scores.roi
    )];
    let risks = vec![
        "No single factor dominates; the rubric found nothing to separate this posting from the pack.".to_string(),
    ];
    (reasons, risks)
}

fn reason_bullets(
    profile_skills: &BTreeSet<String>,
    primary_goal: &str,
    listing: &StructuredListing,
    scores: &ScoreSet,
) -> Vec<String> {
    let mut reasons = Vec::new();

    match scores.strongest() {
        ScoreFactor::SkillMatch => {
            if listing.required_skills.is_empty() {
                reasons.push(
                    "No explicit skill requirements were recovered, so skill match defaults to neutral."
                        .to_string(),
                );
            } else {
                let matched = listing
                    .required_skills
                    .intersection(profile_skills)
                    .count();
                reasons.push(format!(
                    "Your stack covers {matched} of {} required skills ({:.1}/10 skill match).",
                    listing.required_skills.len(),
                    scores.skill_match
                ));
            }
        }
        ScoreFactor::Credibility => reasons.push(format!(
            "{} clears the employer reference lists ({:.1}/10 credibility).",
            listing.company, scores.credibility
        )),
        ScoreFactor::AcceptanceProbability => reasons.push(format!(
            "The rubric gates put acceptance odds at {:.1}/10 for this profile.",
            scores.acceptance_probability
        )),
        ScoreFactor::CareerImpact => {
            let goal = if primary_goal.trim().is_empty() {
                "your career direction".to_string()
            } else {
                format!("your goal of {}", primary_goal.trim())
            };
            reasons.push(format!(
                "The {} role advances {goal} ({:.1}/10 career impact).",
                listing.role, scores.career_impact
            ));
        }
    }

    if scores.classification == Classification::StrongApply {
        reasons.push(format!(
            "Composite ROI {:.1}/10 clears the strong-apply bar.",
            scores.roi
        ));
    }

    reasons
}

fn risk_bullets(
    profile_skills: &BTreeSet<String>,
    primary_goal: &str,
    listing: &StructuredListing,
    scores: &ScoreSet,
) -> Vec<String> {
    let mut risks = Vec::new();

    match scores.weakest() {
        ScoreFactor::SkillMatch => {
            let missing: Vec<&str> = listing
                .required_skills
                .difference(profile_skills)
                .take(3)
                .map(String::as_str)
                .collect();
            if missing.is_empty() {
                risks.push(
                    "Requirements were unextractable; the neutral skill match may be hiding a real gap."
                        .to_string(),
                );
            } else {
                risks.push(format!(
                    "Missing required skills: {}.",
                    missing.join(", ")
                ));
            }
        }
        ScoreFactor::Credibility => {
            if listing.has_named_company() {
                risks.push(format!(
                    "{} could not be verified against the employer reference lists; treat its claims skeptically.",
                    listing.company
                ));
            } else {
                risks.push(
                    "The company name could not be recovered from the posting at all.".to_string(),
                );
            }
        }
        ScoreFactor::AcceptanceProbability => risks.push(format!(
            "Acceptance odds are capped at {:.1}/10 by the skill-match and GPA gates.",
            scores.acceptance_probability
        )),
        ScoreFactor::CareerImpact => {
            let goal = primary_goal.trim();
            if goal.is_empty() {
                risks.push(
                    "No stated career goal, so the role's long-term value cannot be assessed."
                        .to_string(),
                );
            } else {
                risks.push(format!(
                    "The {} role does little for your stated goal of {goal}.",
                    listing.role
                ));
            }
        }
    }

    if scores.classification == Classification::NotWorthIt {
        risks.push(format!(
            "Composite ROI {:.1}/10 falls below the apply threshold.",
            scores.roi
        ));
    }

    risks
}

/// One sentence per classification band, parameterized with company, role,
/// and the dominant driving factor.
fn hard_verdict(listing: &StructuredListing, scores: &ScoreSet) -> String {
    match scores.classification {
        Classification::StrongApply => format!(
            "Apply to {} now; {} is carrying this one and nothing in the rubric disqualifies you.",
            listing.company,
            scores.strongest().label()
        ),
        Classification::ApplyIfLowEffort => format!(
            "Send {} a low-effort application at most; {} drags the ROI to {:.1}/10, so don't burn real prep time on the {} role.",
            listing.company,
            scores.weakest().label(),
            scores.roi,
            listing.role
        ),
        Classification::NotWorthIt => format!(
            "Skip the {} posting at {}; with {} this weak the ROI math says your hours are better spent elsewhere.",
            listing.role,
            listing.company,
            scores.weakest().label()
        ),
    }
}
