use std::collections::BTreeSet;
use wos_collab::reduce::{analyze_publication, normalize_contact_email, reduce_publication};
use wos_collab::{AuthorRow, Config, Publication, RecordError};

fn row(name: &str, institution: &str) -> AuthorRow {
    AuthorRow {
        author_name: name.to_string(),
        institution: institution.to_string(),
        publication_id: "10.1000/a".to_string(),
    }
}

fn home(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_normalize_contact_email_collapses_lines_and_unescapes() {
    let raw = "jane\\_doe@brown.edu;\n   k.lee@u-tokyo.ac.jp";

    assert_eq!(
        normalize_contact_email(raw),
        "jane_doe@brown.edu; k.lee@u-tokyo.ac.jp"
    );
}

#[test]
fn test_reduce_builds_cross_join_without_self_pairs() {
    let foreign = vec![
        row("Chen, L", "Peking Univ, Beijing, Peoples R China."),
        row("Smith, A", "Univ Oxford, Oxford, England."),
    ];

    let edges = reduce_publication(
        "10.1000/a",
        &home(&["Doe, J", "Chen, L"]),
        &foreign,
        Some("doe@brown.edu"),
    );

    let pairs: Vec<(&str, &str)> = edges
        .iter()
        .map(|e| (e.home_author.as_str(), e.foreign_author.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Chen, L", "Smith, A"),
            ("Doe, J", "Chen, L"),
            ("Doe, J", "Smith, A"),
        ]
    );
    assert!(edges.iter().all(|e| e.home_author != e.foreign_author));
    assert!(edges.iter().all(|e| e.contact_email == "doe@brown.edu"));
    assert_eq!(edges[0].foreign_institution, "Univ Oxford, Oxford, England.");
}

#[test]
fn test_reduce_without_foreign_rows_yields_no_edges() {
    let edges = reduce_publication("10.1000/a", &home(&["Doe, J"]), &[], None);

    assert!(edges.is_empty());
}

#[test]
fn test_reduce_missing_email_is_empty_string() {
    let foreign = vec![row("Smith, A", "Univ Oxford, Oxford, England.")];

    let edges = reduce_publication("10.1000/a", &home(&["Doe, J"]), &foreign, None);

    assert_eq!(edges[0].contact_email, "");
}

#[test]
fn test_analyze_publication_end_to_end() {
    let publication = Publication::new(
        "10.1000/a",
        "Doe, J, Brown Univ, Providence, RI 02912 USA.\nSmith, A, Univ Oxford, Oxford, England.",
    )
    .with_contact_email("doe@brown.edu");

    let analysis = analyze_publication(&publication, &Config::default()).unwrap();

    assert_eq!(analysis.total_authors, 2);
    assert_eq!(analysis.home_authors, home(&["Doe, J"]));
    assert_eq!(analysis.edges.len(), 1);
    assert!(analysis.warnings.is_empty());
}

#[test]
fn test_analyze_publication_missing_affiliation() {
    let publication = Publication {
        publication_id: "WOS:1".to_string(),
        affiliation: None,
        contact_email: None,
    };

    let err = analyze_publication(&publication, &Config::default()).unwrap_err();

    assert_eq!(
        err,
        RecordError::MissingField {
            field: "affiliation"
        }
    );
    assert!(err.is_fatal());
}

#[test]
fn test_analyze_publication_without_authors_is_fatal() {
    let publication = Publication::new("WOS:2", "Consortium\n  \n");

    let err = analyze_publication(&publication, &Config::default()).unwrap_err();

    assert_eq!(err, RecordError::ZeroAuthorCount);
    assert!(err.is_fatal());
}

#[test]
fn test_analyze_publication_without_home_authors_warns() {
    let publication = Publication::new("WOS:3", "Smith, A, Univ Oxford, Oxford, England.");

    let analysis = analyze_publication(&publication, &Config::default()).unwrap();

    assert!(analysis.edges.is_empty());
    assert_eq!(analysis.warnings, vec![RecordError::NoHomeAuthor]);
    assert!(!RecordError::NoHomeAuthor.is_fatal());
}
