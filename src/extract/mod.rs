use anyhow::{Context, Result};
use clap::Args;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::aggregate::{load_prior_authors, summarize_by_foreign_author, write_rows, Corpus};
use crate::{CollaborationInstance, Config, ForeignAuthorSummary};

mod bibtex;
pub use bibtex::{find_publication, load_bib_file, parse_bibtex, BibRecord};

pub const INSTANCES_FILE: &str = "collaborations.csv";
pub const COLLABORATORS_FILE: &str = "collaborators.csv";
pub const SUMMARY_FILE: &str = "run_summary.json";

#[derive(Args)]
pub struct ExtractArgs {
    /// Directory containing .bib exports
    pub input: PathBuf,

    /// Directory for the output tables
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Table of foreign authors reported by a previous run
    #[arg(short, long)]
    pub prior: Option<PathBuf>,

    #[command(flatten)]
    pub config: Config,
}

/// `.bib` files directly inside `directory`, sorted by path.
pub fn find_bib_files<P: AsRef<Path>>(directory: P) -> Result<Vec<PathBuf>> {
    let pattern = directory.as_ref().join("*.bib");
    let pattern_str = pattern.to_string_lossy();
    let mut files: Vec<PathBuf> = glob(&pattern_str)?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Every record of every `.bib` file in `directory`, in file then entry
/// order. Files that fail to parse are logged and skipped.
pub fn read_all_bibtex<P: AsRef<Path>>(directory: P) -> Result<Vec<BibRecord>> {
    let files = find_bib_files(&directory)?;
    info!("Found {} files to process", files.len());

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut records = Vec::new();
    for path in &files {
        match load_bib_file(path) {
            Ok(entries) => records.extend(entries),
            Err(e) => error!("Error processing {}: {:#}", path.display(), e),
        }
        progress.inc(1);
    }
    progress.finish();

    Ok(records)
}

pub fn run(args: ExtractArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wos_collab=info".parse()?),
        )
        .try_init()
        .ok();

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let prior = match &args.prior {
        Some(path) => load_prior_authors(path)?,
        None => HashSet::new(),
    };

    info!("Reading BibTeX data from {}", args.input.display());
    let records = read_all_bibtex(&args.input)?;
    info!("Loaded {} records", records.len());

    let mut corpus = Corpus::new(&args.config);
    for record in &records {
        corpus.add_record(record);
    }
    let result = corpus.finish();

    let instances_path = args.output.join(INSTANCES_FILE);
    write_rows(&instances_path, &CollaborationInstance::HEADERS, &result.instances)?;

    let summaries = summarize_by_foreign_author(&result.instances, &prior);
    let collaborators_path = args.output.join(COLLABORATORS_FILE);
    write_rows(&collaborators_path, &ForeignAuthorSummary::HEADERS, &summaries)?;

    let summary_path = args.output.join(SUMMARY_FILE);
    serde_json::to_writer_pretty(File::create(&summary_path)?, &result.summary)?;

    let s = &result.summary;
    eprintln!(
        "\nResults:\n  Records processed: {}\n  Kept: {}\n  Filtered: {}\n  Skipped: {}\n  Warned: {}\n  Duplicate ids: {}\n  Collaboration instances: {}\n  Foreign authors: {}",
        s.processed, s.kept, s.filtered, s.skipped, s.warned, s.duplicate_ids, s.edges, summaries.len()
    );
    eprintln!(
        "\nOutput files:\n  {:?}\n  {:?}\n  {:?}",
        instances_path, collaborators_path, summary_path
    );

    Ok(())
}
