use super::common::*;
use crate::engine::domain::{Classification, ScoreSet};
use crate::engine::verdict::compose;

fn scores(
    skill: f64,
    cred: f64,
    accept: f64,
    impact: f64,
    roi: f64,
    classification: Classification,
) -> ScoreSet {
    ScoreSet {
        skill_match: skill,
        credibility: cred,
        acceptance_probability: accept,
        career_impact: impact,
        roi,
        classification,
    }
}

#[test]
fn weak_credibility_drives_the_risk_bullet() {
    let listing = listing("Quiet Local Bakery", "Data Intern", &["python"]);
    let set = scores(8.0, 3.0, 6.0, 6.0, 6.1, Classification::ApplyIfLowEffort);

    let (_, risks, _) = compose(&skill_set(&["python"]), "Data Engineer", &listing, &set);

    assert!(risks
        .iter()
        .any(|risk| risk.contains("Quiet Local Bakery") && risk.contains("verified")));
}

#[test]
fn placeholder_company_gets_the_unrecovered_risk() {
    let listing = listing("Unknown Company", "Unknown Role", &[]);
    let set = scores(5.0, 3.0, 4.0, 6.0, 4.5, Classification::NotWorthIt);

    let (_, risks, _) = compose(&skill_set(&[]), "", &listing, &set);

    assert!(risks
        .iter()
        .any(|risk| risk.contains("could not be recovered")));
}

#[test]
fn strong_skill_match_drives_the_reason_bullet() {
    let listing = listing("Initech", "Data Intern", &["python", "sql", "aws"]);
    let set = scores(6.7, 5.0, 6.0, 6.0, 6.0, Classification::ApplyIfLowEffort);

    let (reasons, _, _) = compose(
        &skill_set(&["python", "sql"]),
        "Data Engineer",
        &listing,
        &set,
    );

    assert!(reasons
        .iter()
        .any(|reason| reason.contains("2 of 3") && reason.contains("6.7/10")));
}

#[test]
fn missing_skills_are_listed_capped_at_three() {
    let listing = listing(
        "Google",
        "Intern",
        &["aws", "docker", "go", "kubernetes", "python"],
    );
    let set = scores(2.0, 9.0, 2.0, 6.0, 4.8, Classification::NotWorthIt);

    let (_, risks, _) = compose(&skill_set(&["python"]), "", &listing, &set);

    let missing = risks
        .iter()
        .find(|risk| risk.starts_with("Missing required skills"))
        .expect("missing-skill bullet");
    // BTreeSet difference: alphabetical, first three.
    assert!(missing.contains("aws, docker, go"));
    assert!(!missing.contains("kubernetes"));
}

#[test]
fn all_equal_scores_fall_back_to_generic_templates() {
    let listing = listing("Initech", "Intern", &[]);
    let set = scores(5.0, 5.0, 5.0, 5.0, 5.0, Classification::ApplyIfLowEffort);

    let (reasons, risks, verdict) = compose(&skill_set(&[]), "", &listing, &set);

    assert_eq!(reasons.len(), 1);
    assert_eq!(risks.len(), 1);
    assert!(reasons[0].contains("Every factor scores 5.0/10"));
    assert!(!verdict.is_empty());
}

#[test]
fn hard_verdict_tracks_the_classification_band() {
    let listing = listing("Google", "SWE Intern", &["python"]);

    let strong = scores(10.0, 9.0, 8.0, 9.0, 9.1, Classification::StrongApply);
    let (_, _, verdict) = compose(&skill_set(&["python"]), "SWE", &listing, &strong);
    assert!(verdict.starts_with("Apply to Google now"));
    assert!(verdict.contains("skill match"));

    let medium = scores(6.7, 7.0, 6.0, 6.0, 6.5, Classification::ApplyIfLowEffort);
    let (_, _, verdict) = compose(&skill_set(&["python"]), "SWE", &listing, &medium);
    assert!(verdict.contains("low-effort"));
    assert!(verdict.contains("6.5/10"));

    let weak = scores(2.0, 3.0, 2.0, 1.0, 2.2, Classification::NotWorthIt);
    let (_, _, verdict) = compose(&skill_set(&[]), "SWE", &listing, &weak);
    assert!(verdict.starts_with("Skip"));
    assert!(verdict.contains("Google"));
    assert!(verdict.contains("career impact"));
}

#[test]
fn strong_apply_appends_the_roi_reason() {
    let listing = listing("Google", "SWE Intern", &["python"]);
    let set = scores(10.0, 9.0, 8.0, 9.0, 9.1, Classification::StrongApply);

    let (reasons, _, _) = compose(&skill_set(&["python"]), "SWE", &listing, &set);

    assert!(reasons.iter().any(|reason| reason.contains("9.1/10")));
}
