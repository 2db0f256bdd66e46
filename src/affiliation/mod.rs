//! Parsing of the free-text `affiliation` field.
//!
//! The field lists one affiliation group per line, each shaped like
//! `Surname, Given; Surname, Given, Institution, City, Country.`. Commas
//! separate name parts as well as the name from the institution, so the
//! boundary is taken to be the second comma of the last listed author.

use std::collections::HashSet;

use crate::{AuthorRow, Config, RecordError};

mod authors;
mod classify;
mod segment;

pub use authors::{parse_group, AuthorExtractor, ParsedGroup};
pub use classify::{AffiliationGroup, Classifier, HomeAuthors};
pub use segment::{segment, Segments};

pub(crate) const AUTHOR_SEPARATOR: &str = "; ";

pub(crate) fn clean_name(name: &str) -> &str {
    name.trim_matches(|c: char| c == ',' || c.is_whitespace())
}

/// Author rows for every non-domestic group of `block`.
///
/// Malformed groups are skipped and returned alongside the rows.
pub fn foreign_authors(
    publication_id: &str,
    block: &str,
    config: &Config,
) -> (Vec<AuthorRow>, Vec<RecordError>) {
    let classifier = Classifier::new(config);
    let mut extractor = AuthorExtractor::new(config, publication_id);
    let mut malformed = Vec::new();

    for group in segment(block).map(|g| classifier.classify(g)) {
        if !group.is_foreign() {
            continue;
        }
        if let Err(e) = extractor.push_group(group.text) {
            malformed.push(e);
        }
    }

    (extractor.finish(), malformed)
}

/// Number of distinct authors named anywhere in `block`, domestic groups
/// included.
pub fn count_authors(block: &str, config: &Config) -> usize {
    let mut names: HashSet<&str> = HashSet::new();

    for group in segment(block) {
        if let Ok(parsed) = parse_group(group) {
            names.extend(
                parsed
                    .authors
                    .into_iter()
                    .filter(|name| !config.is_reprint(name)),
            );
        }
    }

    let home = Classifier::new(config).home_authors(block);
    let home_only = home
        .names
        .iter()
        .filter(|name| !names.contains(name.as_str()))
        .count();

    names.len() + home_only
}
