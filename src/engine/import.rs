//! Batch import of listings from a CSV export, for callers that collect
//! pasted postings in a spreadsheet instead of submitting JSON.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::ListingInput;

/// Read listings from CSV with `Role`, `Company`, `Required Skills`,
/// `Description`, and `Raw Text` columns. Required skills are
/// semicolon-separated within their cell; every column may be blank.
pub fn listings_from_csv_reader<R: Read>(reader: R) -> Result<Vec<ListingInput>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut listings = Vec::new();

    for row in csv_reader.deserialize::<ListingRow>() {
        let row = row?;
        listings.push(ListingInput {
            role: row.role,
            company: row.company,
            required_skills: split_skills(&row.required_skills),
            description: row.description,
            raw_text: row.raw_text,
        });
    }

    Ok(listings)
}

pub fn listings_from_csv_path(path: impl AsRef<Path>) -> Result<Vec<ListingInput>, csv::Error> {
    let file = File::open(path).map_err(csv::Error::from)?;
    listings_from_csv_reader(file)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Role", default)]
    role: String,
    #[serde(rename = "Company", default)]
    company: String,
    #[serde(rename = "Required Skills", default)]
    required_skills: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Raw Text", default, deserialize_with = "empty_string_as_none")]
    raw_text: Option<String>,
}

fn split_skills(cell: &str) -> Vec<String> {
    cell.split(';')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
