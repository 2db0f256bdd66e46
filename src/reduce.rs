use std::collections::BTreeSet;

use crate::affiliation::{count_authors, foreign_authors, Classifier};
use crate::{AuthorRow, CollaborationEdge, Config, Publication, RecordError};

/// Everything the corpus needs to know about one publication.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicationAnalysis {
    pub publication_id: String,
    pub home_authors: BTreeSet<String>,
    pub total_authors: usize,
    pub edges: Vec<CollaborationEdge>,
    pub warnings: Vec<RecordError>,
}

/// Collapses line breaks to single spaces and unescapes `\_`.
pub fn normalize_contact_email(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace("\\_", "_")
}

/// Cross join of home authors and foreign rows, minus self-pairs.
///
/// Edges are ordered by home author, then by foreign row in source order.
pub fn reduce_publication(
    publication_id: &str,
    home_authors: &BTreeSet<String>,
    foreign_rows: &[AuthorRow],
    contact_email: Option<&str>,
) -> Vec<CollaborationEdge> {
    let contact_email = contact_email
        .map(normalize_contact_email)
        .unwrap_or_default();

    let mut edges = Vec::with_capacity(home_authors.len() * foreign_rows.len());
    for home in home_authors {
        for row in foreign_rows {
            if &row.author_name == home {
                continue;
            }
            edges.push(CollaborationEdge {
                home_author: home.clone(),
                foreign_author: row.author_name.clone(),
                foreign_institution: row.institution.clone(),
                publication_id: publication_id.to_string(),
                contact_email: contact_email.clone(),
            });
        }
    }

    edges
}

/// Runs classification, extraction and reduction over one publication.
///
/// Fails only for conditions that make the record unusable; recoverable
/// problems are collected in `warnings`.
pub fn analyze_publication(
    publication: &Publication,
    config: &Config,
) -> Result<PublicationAnalysis, RecordError> {
    let block = publication
        .affiliation
        .as_deref()
        .ok_or(RecordError::MissingField {
            field: "affiliation",
        })?;

    let total_authors = count_authors(block, config);
    if total_authors == 0 {
        return Err(RecordError::ZeroAuthorCount);
    }

    let home = Classifier::new(config).home_authors(block);
    let (foreign_rows, mut warnings) = foreign_authors(&publication.publication_id, block, config);
    if !home.marker_found {
        warnings.push(RecordError::NoHomeAuthor);
    }

    let edges = reduce_publication(
        &publication.publication_id,
        &home.names,
        &foreign_rows,
        publication.contact_email.as_deref(),
    );

    Ok(PublicationAnalysis {
        publication_id: publication.publication_id.clone(),
        home_authors: home.names,
        total_authors,
        edges,
        warnings,
    })
}
