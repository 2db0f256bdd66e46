use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::path::Path;

pub const PRIOR_AUTHOR_COLUMN: &str = "prior_intl_author";

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Load the foreign-author names reported by an earlier run.
///
/// The file needs a header row with a `prior_intl_author` column; other
/// columns are ignored. `.tsv` files are read tab-delimited.
pub fn load_prior_authors<P: AsRef<Path>>(path: P) -> Result<HashSet<String>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == PRIOR_AUTHOR_COLUMN)
        .ok_or_else(|| {
            anyhow!(
                "{} has no `{}` column",
                path.display(),
                PRIOR_AUTHOR_COLUMN
            )
        })?;

    let mut authors = HashSet::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(column).map(str::trim) {
            if !name.is_empty() {
                authors.insert(name.to_string());
            }
        }
    }

    Ok(authors)
}
