//! Reference data the engine consults: the technical-skill vocabulary used
//! by extraction and the employer tier lists used by credibility scoring.
//!
//! Both ship with built-in defaults and can be replaced at process start
//! from maintained CSV exports; the engine treats them as read-only for its
//! lifetime.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

/// Credibility bucket assigned to an employer via reference-list lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyTier {
    /// Tier-1: large employers with well-known internship pipelines.
    Major,
    /// Tier-2: established companies with a verifiable track record.
    Established,
    /// Tier-3: named startups and smaller firms on the watch list.
    Emerging,
    /// Absent from every list; never defaults upward.
    Unverifiable,
}

impl CompanyTier {
    pub const fn credibility(self) -> f64 {
        match self {
            CompanyTier::Major => 9.0,
            CompanyTier::Established => 7.0,
            CompanyTier::Emerging => 5.0,
            CompanyTier::Unverifiable => 3.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CompanyTier::Major => "Tier-1 employer",
            CompanyTier::Established => "Tier-2 employer",
            CompanyTier::Emerging => "Tier-3 employer",
            CompanyTier::Unverifiable => "unverifiable employer",
        }
    }
}

/// Errors raised while loading reference CSV files at startup.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed reference csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("company '{company}' carries unknown tier '{tier}' (expected 1, 2, or 3)")]
    UnknownTier { company: String, tier: String },
}

/// Strip zero-width characters, collapse whitespace, and lower-case, so that
/// pasted names compare stably regardless of clipboard artifacts.
pub(crate) fn normalize_token(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Maintained vocabulary of technical terms recognized during extraction.
/// Multi-word phrases are kept apart from single tokens so the extractor can
/// match them against full text before tokenizing.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    phrases: Vec<String>,
    terms: BTreeSet<String>,
}

const BUILTIN_TERMS: &[&str] = &[
    "python", "java", "javascript", "typescript", "rust", "go", "c++", "c#",
    "kotlin", "swift", "scala", "sql", "nosql", "postgresql", "mysql",
    "mongodb", "redis", "react", "angular", "vue", "node", "django", "flask",
    "spring", "pandas", "numpy", "pytorch", "tensorflow", "keras", "spark",
    "hadoop", "kafka", "airflow", "aws", "azure", "gcp", "docker",
    "kubernetes", "terraform", "git", "linux", "bash", "graphql", "rest",
    "html", "css", "excel", "tableau", "matlab",
];

const BUILTIN_PHRASES: &[&str] = &[
    "machine learning",
    "deep learning",
    "data analysis",
    "data science",
    "natural language processing",
    "computer vision",
    "distributed systems",
    "version control",
    "unit testing",
];

impl SkillVocabulary {
    /// The vocabulary shipped with the engine.
    pub fn builtin() -> Self {
        Self::from_terms(BUILTIN_TERMS.iter().chain(BUILTIN_PHRASES).copied())
    }

    /// Build a vocabulary from arbitrary term strings; entries containing
    /// whitespace become phrases.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self {
            phrases: Vec::new(),
            terms: BTreeSet::new(),
        };
        for term in terms {
            vocabulary.insert(term.as_ref());
        }
        vocabulary
    }

    fn insert(&mut self, term: &str) {
        let normalized = normalize_token(term);
        if normalized.is_empty() {
            return;
        }
        if normalized.contains(' ') {
            if !self.phrases.contains(&normalized) {
                self.phrases.push(normalized);
            }
        } else {
            self.terms.insert(normalized);
        }
    }

    pub(crate) fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub(crate) fn contains_term(&self, token: &str) -> bool {
        self.terms.contains(token)
    }

    /// Load a vocabulary from a CSV export with a `Term` column.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ReferenceDataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut vocabulary = Self {
            phrases: Vec::new(),
            terms: BTreeSet::new(),
        };
        for row in csv_reader.deserialize::<VocabularyRow>() {
            let row = row?;
            vocabulary.insert(&row.term);
        }
        Ok(vocabulary)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        Self::from_csv_reader(File::open(path)?)
    }
}

#[derive(Debug, Deserialize)]
struct VocabularyRow {
    #[serde(rename = "Term")]
    term: String,
}

/// Maintained employer tier lists backing credibility scoring.
#[derive(Debug, Clone)]
pub struct CompanyTierBook {
    major: Vec<String>,
    established: Vec<String>,
    emerging: Vec<String>,
}

const BUILTIN_MAJOR: &[&str] = &[
    "google", "meta", "microsoft", "amazon", "apple", "netflix", "nvidia",
    "openai", "anthropic", "deepmind", "stripe", "jane street", "two sigma",
    "citadel", "goldman sachs", "jpmorgan",
];

const BUILTIN_ESTABLISHED: &[&str] = &[
    "ibm", "oracle", "salesforce", "adobe", "intel", "cisco", "uber",
    "airbnb", "spotify", "shopify", "atlassian", "palantir", "bloomberg",
    "databricks", "snowflake", "datadog", "cloudflare",
];

const BUILTIN_EMERGING: &[&str] = &[
    "ramp", "vercel", "hugging face", "scale ai", "linear", "notion",
    "figma", "replit", "modal", "temporal",
];

impl CompanyTierBook {
    /// The tier lists shipped with the engine.
    pub fn builtin() -> Self {
        let normalize_all =
            |names: &[&str]| names.iter().map(|name| normalize_token(name)).collect();
        Self {
            major: normalize_all(BUILTIN_MAJOR),
            established: normalize_all(BUILTIN_ESTABLISHED),
            emerging: normalize_all(BUILTIN_EMERGING),
        }
    }

    /// An empty book; every lookup resolves to `Unverifiable`.
    pub fn empty() -> Self {
        Self {
            major: Vec::new(),
            established: Vec::new(),
            emerging: Vec::new(),
        }
    }

    pub fn insert(&mut self, company: &str, tier: CompanyTier) {
        let normalized = normalize_token(company);
        if normalized.is_empty() {
            return;
        }
        match tier {
            CompanyTier::Major => self.major.push(normalized),
            CompanyTier::Established => self.established.push(normalized),
            CompanyTier::Emerging => self.emerging.push(normalized),
            CompanyTier::Unverifiable => {}
        }
    }

    /// Resolve a company name to its tier. Lookup is case-insensitive exact
    /// or word-boundary prefix match (minimum four characters); names absent
    /// from every list resolve to `Unverifiable`.
    pub fn tier_for(&self, company: &str) -> CompanyTier {
        let name = normalize_token(company);
        if name.is_empty() {
            return CompanyTier::Unverifiable;
        }

        let scan = |entries: &[String]| entries.iter().any(|entry| names_match(entry, &name));

        if scan(&self.major) {
            CompanyTier::Major
        } else if scan(&self.established) {
            CompanyTier::Established
        } else if scan(&self.emerging) {
            CompanyTier::Emerging
        } else {
            CompanyTier::Unverifiable
        }
    }

    /// Load tier lists from a CSV export with `Company` and `Tier` columns,
    /// tiers given as 1, 2, or 3.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ReferenceDataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut book = Self::empty();
        for row in csv_reader.deserialize::<TierRow>() {
            let row = row?;
            let tier = match row.tier.as_str() {
                "1" => CompanyTier::Major,
                "2" => CompanyTier::Established,
                "3" => CompanyTier::Emerging,
                other => {
                    return Err(ReferenceDataError::UnknownTier {
                        company: row.company,
                        tier: other.to_string(),
                    })
                }
            };
            book.insert(&row.company, tier);
        }
        Ok(book)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        Self::from_csv_reader(File::open(path)?)
    }
}

#[derive(Debug, Deserialize)]
struct TierRow {
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Tier")]
    tier: String,
}

fn names_match(entry: &str, name: &str) -> bool {
    if entry == name {
        return true;
    }
    if entry.len().min(name.len()) < 4 {
        return false;
    }
    word_prefix(entry, name) || word_prefix(name, entry)
}

/// True when `shorter` is a prefix of `longer` ending on a word boundary, so
/// "google" matches "google llc" but "meta" does not match "metalworks".
fn word_prefix(longer: &str, shorter: &str) -> bool {
    longer.starts_with(shorter)
        && longer[shorter.len()..]
            .chars()
            .next()
            .map_or(true, |next| next.is_whitespace())
}

/// The full reference bundle handed to the engine at construction.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub vocabulary: SkillVocabulary,
    pub tiers: CompanyTierBook,
}

impl ReferenceData {
    pub fn builtin() -> Self {
        Self {
            vocabulary: SkillVocabulary::builtin(),
            tiers: CompanyTierBook::builtin(),
        }
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_lookup_is_case_insensitive() {
        let book = CompanyTierBook::builtin();
        assert_eq!(book.tier_for("Google"), CompanyTier::Major);
        assert_eq!(book.tier_for("SPOTIFY"), CompanyTier::Established);
        assert_eq!(book.tier_for("Figma"), CompanyTier::Emerging);
    }

    #[test]
    fn prefix_match_respects_word_boundaries() {
        let book = CompanyTierBook::builtin();
        assert_eq!(book.tier_for("Google LLC"), CompanyTier::Major);
        assert_eq!(book.tier_for("Jane Street Capital"), CompanyTier::Major);
        // "meta" must not claim unrelated companies sharing a leading run.
        assert_eq!(book.tier_for("Metalworks Forge"), CompanyTier::Unverifiable);
    }

    #[test]
    fn unmatched_names_never_default_upward() {
        let book = CompanyTierBook::builtin();
        assert_eq!(book.tier_for("Quiet Local Bakery"), CompanyTier::Unverifiable);
        assert_eq!(book.tier_for(""), CompanyTier::Unverifiable);
    }

    #[test]
    fn tier_book_loads_from_csv() {
        let csv = "Company,Tier\nInitech,2\nHooli,1\nPied Piper,3\n";
        let book = CompanyTierBook::from_csv_reader(csv.as_bytes()).expect("parse");
        assert_eq!(book.tier_for("hooli"), CompanyTier::Major);
        assert_eq!(book.tier_for("Initech Gmbh"), CompanyTier::Established);
        assert_eq!(book.tier_for("Pied Piper"), CompanyTier::Emerging);
    }

    #[test]
    fn tier_book_rejects_unknown_tier() {
        let csv = "Company,Tier\nInitech,platinum\n";
        match CompanyTierBook::from_csv_reader(csv.as_bytes()) {
            Err(ReferenceDataError::UnknownTier { company, tier }) => {
                assert_eq!(company, "Initech");
                assert_eq!(tier, "platinum");
            }
            other => panic!("expected unknown tier error, got {other:?}"),
        }
    }

    #[test]
    fn vocabulary_separates_phrases_from_terms() {
        let vocabulary =
            SkillVocabulary::from_terms(["Python", "machine learning", "  SQL  "]);
        assert!(vocabulary.contains_term("python"));
        assert!(vocabulary.contains_term("sql"));
        assert_eq!(vocabulary.phrases(), ["machine learning"]);
    }

    #[test]
    fn vocabulary_loads_from_csv() {
        let csv = "Term\nRust\ndata engineering\n";
        let vocabulary = SkillVocabulary::from_csv_reader(csv.as_bytes()).expect("parse");
        assert!(vocabulary.contains_term("rust"));
        assert_eq!(vocabulary.phrases(), ["data engineering"]);
    }

    #[test]
    fn normalize_token_strips_clipboard_artifacts() {
        assert_eq!(normalize_token("\u{feff} Jane   Street "), "jane street");
    }
}
