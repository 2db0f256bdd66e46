use std::collections::HashSet;
use wos_collab::aggregate::{aggregate, summarize_by_foreign_author};
use wos_collab::{Config, Publication};

fn corpus() -> Vec<Publication> {
    vec![
        Publication::new(
            "10.1000/intl",
            "Doe, J (Reprint Author), Brown Univ, Dept Chem, Providence, RI 02912 USA.
   Doe, J, Brown Univ, Dept Chem, Providence, RI 02912 USA.
   Smith, A, Univ Oxford, Dept Chem, Oxford OX1 3TA, England.
   Mueller, H, Max Planck Inst Chem, Mainz, Germany.",
        )
        .with_contact_email("doe@brown.edu"),
        Publication::new(
            "WOS:000000002",
            "Park, S, Harvard Univ, Dept Phys, Cambridge, MA 02138 USA.",
        ),
        Publication::new(
            "10.1000/dual",
            "Kim, Y, Brown Univ, Dept Phys, Providence, RI 02912 USA.
   Kim, Y, Univ Tokyo, Dept Phys, Tokyo 1130033, Japan.",
        ),
    ]
}

#[test]
fn test_full_pipeline_three_publications() {
    let config = Config::default();

    let result = aggregate(&corpus(), &config);

    assert_eq!(result.summary.processed, 3);
    assert_eq!(result.summary.kept, 3);
    assert_eq!(result.summary.skipped, 0);
    assert_eq!(result.summary.warned, 1);
    assert_eq!(result.summary.edges, 2);

    assert_eq!(result.instances.len(), 2);
    for instance in &result.instances {
        assert_eq!(instance.home_author, "Doe, J");
        assert_eq!(instance.publication_id, "10.1000/intl");
        assert_eq!(instance.contact_email, "doe@brown.edu");
        assert_eq!(instance.collaboration_instances, 1);
        assert_ne!(instance.home_author, instance.foreign_author);
    }
    let foreign: Vec<&str> = result
        .instances
        .iter()
        .map(|i| i.foreign_author.as_str())
        .collect();
    assert_eq!(foreign, vec!["Smith, A", "Mueller, H"]);

    let summaries = summarize_by_foreign_author(&result.instances, &HashSet::new());
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|s| s.foreign_author != "Kim, Y"));
}

#[test]
fn test_aggregation_is_idempotent() {
    let config = Config::default();

    let first = aggregate(&corpus(), &config);
    let second = aggregate(&corpus(), &config);

    assert_eq!(first.instances, second.instances);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn test_instance_count_includes_every_home_author_edge() {
    let config = Config::default();
    let publications = vec![
        Publication::new(
            "10.1000/p1",
            "Doe, J; Roe, R, Brown Univ, Providence, RI 02912 USA.
   Smith, A, Univ Oxford, Oxford, England.",
        ),
        Publication::new(
            "10.1000/p2",
            "Doe, J, Brown Univ, Providence, RI 02912 USA.
   Smith, A, Univ Oxford, Oxford, England.",
        ),
    ];

    let result = aggregate(&publications, &config);
    let summaries = summarize_by_foreign_author(&result.instances, &HashSet::new());

    assert_eq!(result.instances.len(), 3);
    assert!(result
        .instances
        .iter()
        .all(|i| i.collaboration_instances == 3));
    assert_eq!(summaries[0].collaboration_instances, 3);
    assert_eq!(summaries[0].publication_count, 2);
}
