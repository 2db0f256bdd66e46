use thiserror::Error;

/// Problems found while analyzing a single publication record.
///
/// None of these abort a run. Fatal kinds exclude the record, the rest are
/// reported as warnings and processing of the record continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("malformed affiliation line: {group:?}")]
    MalformedAffiliation { group: String },

    #[error("no author affiliated with the home institution")]
    NoHomeAuthor,

    #[error("no authors could be extracted from the affiliation block")]
    ZeroAuthorCount,

    #[error("record is missing the `{field}` field")]
    MissingField { field: &'static str },
}

impl RecordError {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RecordError::ZeroAuthorCount | RecordError::MissingField { .. }
        )
    }
}
