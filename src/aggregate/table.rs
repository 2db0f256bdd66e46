use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Writes `rows` as CSV under an explicit header, so empty tables still
/// get one.
pub fn write_rows<P: AsRef<Path>, T: Serialize>(
    path: P,
    headers: &[&str],
    rows: &[T],
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_rows<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<Vec<T>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.with_context(|| format!("Bad row in {}", path.display()))?);
    }
    Ok(rows)
}
