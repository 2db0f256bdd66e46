use serde::{Deserialize, Serialize};

pub mod affiliation;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod reduce;

pub use config::Config;
pub use error::RecordError;

/// One author paired with the institution listed on their affiliation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRow {
    pub author_name: String,
    pub institution: String,
    pub publication_id: String,
}

/// The fields of one bibliographic record the analysis consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub publication_id: String,
    pub affiliation: Option<String>,
    pub contact_email: Option<String>,
}

impl Publication {
    pub fn new(publication_id: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self {
            publication_id: publication_id.into(),
            affiliation: Some(affiliation.into()),
            contact_email: None,
        }
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationEdge {
    pub home_author: String,
    pub foreign_author: String,
    pub foreign_institution: String,
    pub publication_id: String,
    pub contact_email: String,
}

/// A row of the instance table: one edge plus the corpus-wide counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationInstance {
    pub home_author: String,
    pub foreign_author: String,
    pub foreign_institution: String,
    pub publication_id: String,
    pub contact_email: String,
    pub collaboration_instances: usize,
    pub home_collaboration_instances: usize,
}

impl CollaborationInstance {
    pub const HEADERS: [&'static str; 7] = [
        "home_author",
        "foreign_author",
        "foreign_institution",
        "publication_id",
        "contact_email",
        "collaboration_instances",
        "home_collaboration_instances",
    ];
}

/// A row of the aggregate table, one per foreign author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignAuthorSummary {
    pub foreign_author: String,
    pub collaboration_instances: usize,
    pub publication_count: usize,
    pub institutions: String,
    pub home_authors: String,
    pub contact_emails: String,
    pub publication_ids: String,
}

impl ForeignAuthorSummary {
    pub const HEADERS: [&'static str; 7] = [
        "foreign_author",
        "collaboration_instances",
        "publication_count",
        "institutions",
        "home_authors",
        "contact_emails",
        "publication_ids",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub processed: usize,
    pub kept: usize,
    pub filtered: usize,
    pub skipped: usize,
    pub warned: usize,
    pub duplicate_ids: usize,
    pub edges: usize,
}
