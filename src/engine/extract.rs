use std::collections::BTreeSet;

use super::domain::{ListingInput, StructuredListing, UNKNOWN_COMPANY, UNKNOWN_ROLE};
use super::reference::{normalize_token, SkillVocabulary};

/// Knobs for the header-detection pass.
#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    /// How many leading non-blank lines are searched for a role/company line.
    pub head_lines: usize,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self { head_lines: 5 }
    }
}

/// Header lines longer than this are treated as prose, not a title.
const MAX_HEADER_LINE_LEN: usize = 80;

/// Turn one listing input into its structured form. Never fails: the worst
/// case is placeholder role/company and an empty skill set.
pub(crate) fn extract(
    input: &ListingInput,
    vocabulary: &SkillVocabulary,
    options: &ExtractorOptions,
) -> StructuredListing {
    let provided_skills = normalize_skills(&input.required_skills);

    if !provided_skills.is_empty() {
        return StructuredListing {
            role: field_or(&input.role, UNKNOWN_ROLE),
            company: field_or(&input.company, UNKNOWN_COMPANY),
            required_skills: provided_skills,
        };
    }

    let text = input.body_text();
    let (detected_role, detected_company) = detect_header(text, options.head_lines);

    // Fields the caller filled in win over anything recovered from text.
    let role = if input.role.trim().is_empty() {
        detected_role.unwrap_or_else(|| UNKNOWN_ROLE.to_string())
    } else {
        input.role.trim().to_string()
    };
    let company = if input.company.trim().is_empty() {
        detected_company.unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
    } else {
        input.company.trim().to_string()
    };

    StructuredListing {
        role,
        company,
        required_skills: extract_skills(text, vocabulary),
    }
}

fn field_or(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

fn normalize_skills(skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|skill| normalize_token(skill))
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Search the first `head_lines` non-blank lines for a "Role at Company" or
/// "Company – Role" title line.
fn detect_header(text: &str, head_lines: usize) -> (Option<String>, Option<String>) {
    for line in text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(head_lines)
    {
        if line.len() > MAX_HEADER_LINE_LEN {
            continue;
        }
        if let Some(split) = split_header_line(line) {
            return (Some(split.0), Some(split.1));
        }
    }
    (None, None)
}

/// Returns (role, company) when the line matches a separator pattern, with
/// both sides non-empty. Patterns are tried in fixed order: " at " first,
/// then "Company – Role" separators (en dash, hyphen, colon).
fn split_header_line(line: &str) -> Option<(String, String)> {
    if let Some(index) = find_at_separator(line) {
        let role = line[..index].trim();
        let company = line[index + 4..].trim();
        if !role.is_empty() && !company.is_empty() {
            return Some((role.to_string(), company.to_string()));
        }
    }

    for separator in [" \u{2013} ", " - ", ":"] {
        if let Some((left, right)) = line.split_once(separator) {
            let company = left.trim();
            let role = right.trim();
            if !company.is_empty() && !role.is_empty() {
                return Some((role.to_string(), company.to_string()));
            }
        }
    }

    None
}

/// Byte-safe, case-insensitive search for the " at " separator.
fn find_at_separator(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    if bytes.len() < 4 {
        return None;
    }
    (0..bytes.len() - 3).find(|&i| {
        bytes[i] == b' '
            && bytes[i + 1].eq_ignore_ascii_case(&b'a')
            && bytes[i + 2].eq_ignore_ascii_case(&b't')
            && bytes[i + 3] == b' '
    })
}

/// Phrase matches are collected against the lower-cased text before single
/// tokens are intersected with the vocabulary.
fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> BTreeSet<String> {
    let mut skills = BTreeSet::new();
    let lowered = text.to_lowercase();

    for phrase in vocabulary.phrases() {
        if lowered.contains(phrase.as_str()) {
            skills.insert(phrase.clone());
        }
    }

    for token in tokenize(&lowered) {
        if vocabulary.contains_term(&token) {
            skills.insert(token);
        }
    }

    skills
}

/// Lower-cased, punctuation-stripped tokens. `+` and `#` are kept so terms
/// like "c++" and "c#" survive.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '+' || c == '#'))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
