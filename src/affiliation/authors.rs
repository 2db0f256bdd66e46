use std::collections::HashSet;

use crate::{AuthorRow, Config, RecordError};

use super::{clean_name, AUTHOR_SEPARATOR};

/// An affiliation line split into its author names and the institution they
/// share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGroup<'a> {
    pub authors: Vec<&'a str>,
    pub institution: &'a str,
}

/// Position within the final `Surname, Given, Institution...` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Surname,
    Given,
}

/// Splits the last entry of an author list at its second comma.
///
/// Returns the name (without the comma) and everything after the comma.
/// An entry with a single comma is all name and no institution; an entry
/// with no comma at all is malformed.
fn split_name(entry: &str) -> Option<(&str, &str)> {
    let mut field = Field::Surname;

    for (idx, c) in entry.char_indices() {
        if c != ',' {
            continue;
        }
        match field {
            Field::Surname => field = Field::Given,
            Field::Given => return Some((&entry[..idx], &entry[idx + 1..])),
        }
    }

    match field {
        Field::Surname => None,
        Field::Given => Some((entry, "")),
    }
}

/// Parses one affiliation line.
///
/// Lines without `"; "` name a single author. Otherwise the entries before
/// the last `"; "` are whole author names and the entry after it holds the
/// final author followed by the shared institution.
pub fn parse_group(text: &str) -> Result<ParsedGroup<'_>, RecordError> {
    let (listed, last) = match text.rfind(AUTHOR_SEPARATOR) {
        Some(idx) => (Some(&text[..idx]), &text[idx + AUTHOR_SEPARATOR.len()..]),
        None => (None, text),
    };

    let (last_name, institution) =
        split_name(last).ok_or_else(|| RecordError::MalformedAffiliation {
            group: text.to_string(),
        })?;

    let mut authors: Vec<&str> = listed
        .into_iter()
        .flat_map(|l| l.split(AUTHOR_SEPARATOR))
        .map(clean_name)
        .filter(|name| !name.is_empty())
        .collect();

    let last_name = clean_name(last_name);
    if !last_name.is_empty() {
        authors.push(last_name);
    }

    Ok(ParsedGroup {
        authors,
        institution: institution.trim(),
    })
}

/// Accumulates the author rows of one publication, in source order.
///
/// An author is recorded once; a repeated name keeps the institution from
/// its first line.
pub struct AuthorExtractor<'c> {
    config: &'c Config,
    publication_id: String,
    seen: HashSet<String>,
    rows: Vec<AuthorRow>,
}

impl<'c> AuthorExtractor<'c> {
    pub fn new(config: &'c Config, publication_id: impl Into<String>) -> Self {
        Self {
            config,
            publication_id: publication_id.into(),
            seen: HashSet::new(),
            rows: Vec::new(),
        }
    }

    pub fn push_group(&mut self, text: &str) -> Result<(), RecordError> {
        let parsed = parse_group(text)?;

        for author in parsed.authors {
            if self.config.is_reprint(author) || self.seen.contains(author) {
                continue;
            }
            self.seen.insert(author.to_string());
            self.rows.push(AuthorRow {
                author_name: author.to_string(),
                institution: parsed.institution.to_string(),
                publication_id: self.publication_id.clone(),
            });
        }

        Ok(())
    }

    pub fn rows(&self) -> &[AuthorRow] {
        &self.rows
    }

    pub fn finish(self) -> Vec<AuthorRow> {
        self.rows
    }
}
