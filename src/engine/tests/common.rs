use std::collections::BTreeSet;

use crate::engine::domain::{ListingInput, StructuredListing};

pub(super) fn structured_input(company: &str, role: &str, skills: &[&str]) -> ListingInput {
    ListingInput {
        role: role.to_string(),
        company: company.to_string(),
        required_skills: skills.iter().map(|skill| skill.to_string()).collect(),
        description: String::new(),
        raw_text: None,
    }
}

pub(super) fn listing(company: &str, role: &str, skills: &[&str]) -> StructuredListing {
    StructuredListing {
        role: role.to_string(),
        company: company.to_string(),
        required_skills: skill_set(skills),
    }
}

pub(super) fn skill_set(skills: &[&str]) -> BTreeSet<String> {
    skills.iter().map(|skill| skill.to_string()).collect()
}
