use anyhow::{anyhow, Context, Result};
use biblatex::{Field, RawBibliography, RawChunk};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::Publication;

/// One BibTeX entry as plain strings. Field names are lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibRecord {
    pub key: String,
    pub fields: BTreeMap<String, String>,
}

impl BibRecord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_lowercase(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// Strips braces that wrap the whole value, as in `{{Brown Univ}}`.
fn unwrap_braces(mut value: &str) -> &str {
    loop {
        let trimmed = value.trim();
        let Some(inner) = trimmed
            .strip_prefix('{')
            .and_then(|v| v.strip_suffix('}'))
        else {
            return trimmed;
        };

        // `{A} and {B}` starts and ends with a brace without being wrapped.
        let mut depth = 0usize;
        for c in inner.chars() {
            match c {
                '{' => depth += 1,
                '}' if depth == 0 => return trimmed,
                '}' => depth -= 1,
                _ => {}
            }
        }
        value = inner;
    }
}

fn field_text(field: &Field<'_>, abbreviations: &HashMap<String, String>) -> String {
    field
        .iter()
        .map(|chunk| match chunk.v {
            RawChunk::Normal(s) => unwrap_braces(s).replace("\\_", "_"),
            RawChunk::Abbreviation(name) => abbreviations
                .get(&name.to_lowercase())
                .cloned()
                .unwrap_or_else(|| name.to_string()),
        })
        .collect()
}

/// Parses BibTeX source into records.
///
/// Field values keep their source text, line breaks included; the
/// affiliation block relies on them to separate groups.
pub fn parse_bibtex(src: &str) -> Result<Vec<BibRecord>> {
    let raw =
        RawBibliography::parse(src).map_err(|e| anyhow!("BibTeX parse error: {}", e))?;

    // @string definitions may refer to earlier ones.
    let mut abbreviations: HashMap<String, String> = HashMap::new();
    for pair in &raw.abbreviations {
        let text = field_text(&pair.value.v, &abbreviations);
        abbreviations.insert(pair.key.v.to_lowercase(), text);
    }

    Ok(raw
        .entries
        .iter()
        .map(|entry| BibRecord {
            key: entry.v.key.v.to_string(),
            fields: entry
                .v
                .fields
                .iter()
                .map(|pair| {
                    (
                        pair.key.v.to_lowercase(),
                        field_text(&pair.value.v, &abbreviations),
                    )
                })
                .collect(),
        })
        .collect())
}

pub fn load_bib_file<P: AsRef<Path>>(path: P) -> Result<Vec<BibRecord>> {
    let path = path.as_ref();
    let src = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_bibtex(&src).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Looks up a record by its entry key.
pub fn find_publication<'a>(records: &'a [BibRecord], key: &str) -> Option<&'a BibRecord> {
    records.iter().find(|r| r.key == key)
}

impl Publication {
    /// Identified by DOI when the record has one, otherwise by entry key.
    pub fn from_record(record: &BibRecord) -> Self {
        let publication_id = record
            .get("doi")
            .map(str::trim)
            .filter(|doi| !doi.is_empty())
            .unwrap_or(record.key.as_str())
            .to_string();

        Self {
            publication_id,
            affiliation: record.get("affiliation").map(String::from),
            contact_email: record.get("author-email").map(String::from),
        }
    }
}
