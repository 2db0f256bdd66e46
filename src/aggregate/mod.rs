mod prior;
mod table;
pub use prior::{load_prior_authors, PRIOR_AUTHOR_COLUMN};
pub use table::{read_rows, write_rows};

use anyhow::Result;
use clap::Args;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::extract::BibRecord;
use crate::reduce::analyze_publication;
use crate::{
    CollaborationEdge, CollaborationInstance, Config, ForeignAuthorSummary, Publication,
    RunSummary,
};

#[derive(Args)]
pub struct AggregateArgs {
    /// Instance table written by `extract`
    #[arg(short, long, default_value = "collaborations.csv")]
    pub input: PathBuf,

    /// Output file for the per-foreign-author table
    #[arg(short, long, default_value = "collaborators.csv")]
    pub output: PathBuf,

    /// Table of foreign authors reported by a previous run
    #[arg(short, long)]
    pub prior: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Kept,
    Filtered,
    Skipped,
}

#[derive(Debug, Clone, Default)]
pub struct CorpusResult {
    pub instances: Vec<CollaborationInstance>,
    pub summary: RunSummary,
}

/// Folds publications one at a time into a single edge table.
pub struct Corpus<'c> {
    config: &'c Config,
    edges: Vec<CollaborationEdge>,
    seen_ids: HashSet<String>,
    summary: RunSummary,
}

impl<'c> Corpus<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            edges: Vec::new(),
            seen_ids: HashSet::new(),
            summary: RunSummary::default(),
        }
    }

    pub fn add_record(&mut self, record: &BibRecord) -> RecordOutcome {
        self.add_publication(&Publication::from_record(record))
    }

    pub fn add_publication(&mut self, publication: &Publication) -> RecordOutcome {
        let id = publication.publication_id.as_str();
        self.summary.processed += 1;

        if !self.seen_ids.insert(id.to_string()) {
            self.summary.duplicate_ids += 1;
            warn!("{}: publication id seen before, processing again", id);
        }

        let analysis = match analyze_publication(publication, self.config) {
            Ok(analysis) => analysis,
            Err(e) => {
                self.summary.skipped += 1;
                warn!("{}: skipped: {}", id, e);
                return RecordOutcome::Skipped;
            }
        };

        for warning in &analysis.warnings {
            warn!("{}: {}", id, warning);
        }
        if !analysis.warnings.is_empty() {
            self.summary.warned += 1;
        }

        if !self
            .config
            .keeps(analysis.home_authors.len(), analysis.total_authors)
        {
            self.summary.filtered += 1;
            debug!(
                "{}: filtered ({} home of {} authors)",
                id,
                analysis.home_authors.len(),
                analysis.total_authors
            );
            return RecordOutcome::Filtered;
        }

        self.summary.kept += 1;
        self.edges.extend(analysis.edges);
        RecordOutcome::Kept
    }

    pub fn finish(self) -> CorpusResult {
        let instances = count_instances(self.edges);
        let summary = RunSummary {
            edges: instances.len(),
            ..self.summary
        };
        CorpusResult { instances, summary }
    }
}

pub fn aggregate(publications: &[Publication], config: &Config) -> CorpusResult {
    let mut corpus = Corpus::new(config);
    for publication in publications {
        corpus.add_publication(publication);
    }
    corpus.finish()
}

/// Attaches per-author edge counts and sorts by foreign-author count
/// (descending), then foreign-author name (descending). Edges with equal
/// keys keep their input order.
pub fn count_instances(edges: Vec<CollaborationEdge>) -> Vec<CollaborationInstance> {
    let mut foreign_counts: HashMap<String, usize> = HashMap::new();
    let mut home_counts: HashMap<String, usize> = HashMap::new();
    for edge in &edges {
        *foreign_counts.entry(edge.foreign_author.clone()).or_insert(0) += 1;
        *home_counts.entry(edge.home_author.clone()).or_insert(0) += 1;
    }

    let mut instances: Vec<CollaborationInstance> = edges
        .into_iter()
        .map(|edge| CollaborationInstance {
            collaboration_instances: foreign_counts[&edge.foreign_author],
            home_collaboration_instances: home_counts[&edge.home_author],
            home_author: edge.home_author,
            foreign_author: edge.foreign_author,
            foreign_institution: edge.foreign_institution,
            publication_id: edge.publication_id,
            contact_email: edge.contact_email,
        })
        .collect();

    instances.sort_by(|a, b| {
        b.collaboration_instances
            .cmp(&a.collaboration_instances)
            .then_with(|| b.foreign_author.cmp(&a.foreign_author))
    });
    instances
}

#[derive(Default)]
struct SummaryBuilder {
    instances: usize,
    institutions: Vec<String>,
    home_authors: Vec<String>,
    contact_emails: Vec<String>,
    publication_ids: Vec<String>,
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// One row per foreign author not listed in `prior`, in the order the
/// authors first appear in `instances`.
pub fn summarize_by_foreign_author(
    instances: &[CollaborationInstance],
    prior: &HashSet<String>,
) -> Vec<ForeignAuthorSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut builders: HashMap<&str, SummaryBuilder> = HashMap::new();

    for instance in instances {
        let author = instance.foreign_author.as_str();
        if prior.contains(author) {
            continue;
        }

        let builder = builders.entry(author).or_insert_with(|| {
            order.push(author);
            SummaryBuilder::default()
        });
        builder.instances += 1;
        push_distinct(&mut builder.institutions, &instance.foreign_institution);
        push_distinct(&mut builder.home_authors, &instance.home_author);
        push_distinct(&mut builder.contact_emails, &instance.contact_email);
        push_distinct(&mut builder.publication_ids, &instance.publication_id);
    }

    order
        .into_iter()
        .filter_map(|author| {
            let b = builders.remove(author)?;
            Some(ForeignAuthorSummary {
                foreign_author: author.to_string(),
                collaboration_instances: b.instances,
                publication_count: b.publication_ids.len(),
                institutions: b.institutions.join("; "),
                home_authors: b.home_authors.join("; "),
                contact_emails: b.contact_emails.join("; "),
                publication_ids: b.publication_ids.join("; "),
            })
        })
        .collect()
}

pub fn run(args: AggregateArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wos_collab=info".parse()?),
        )
        .try_init()
        .ok();

    let instances: Vec<CollaborationInstance> = read_rows(&args.input)?;
    info!("Loaded {} collaboration instances", instances.len());

    let prior = match &args.prior {
        Some(path) => {
            let prior = load_prior_authors(path)?;
            info!("Excluding {} authors from prior run", prior.len());
            prior
        }
        None => HashSet::new(),
    };

    let summaries = summarize_by_foreign_author(&instances, &prior);
    write_rows(&args.output, &ForeignAuthorSummary::HEADERS, &summaries)?;

    eprintln!(
        "\nResults:\n  Instances read: {}\n  Foreign authors: {}\n  Output: {:?}",
        instances.len(),
        summaries.len(),
        args.output
    );

    Ok(())
}

