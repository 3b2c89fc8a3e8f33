use approx::assert_relative_eq;
use majors_dashboard::core::{
    AggregateCache, AggregateResult, CapitalizationMode, CountColumn, DataQualityIssue, Dataset,
    Record, aggregate,
};

const SAMPLE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/women_stem_sample.csv"
);
const DIRTY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/dirty_rows.csv");

fn two_row_dataset() -> Dataset {
    Dataset::from_records(vec![
        Record::new("Computer engineering", "Engineering", 100, 30, 70),
        Record::new("Biology", "Biological Sciences", 50, 35, 15),
    ])
}

#[test]
fn aggregate_sums_matching_category() {
    let dataset = two_row_dataset();
    assert_eq!(
        aggregate(&dataset, "Engineering"),
        AggregateResult::new(100, 30, 70)
    );
    assert_eq!(
        aggregate(&dataset, "Biological Sciences"),
        AggregateResult::new(50, 35, 15)
    );
}

#[test]
fn aggregate_over_sample_file() {
    let dataset = Dataset::load(SAMPLE, CapitalizationMode::FirstLetter).expect("load sample");
    let engineering = aggregate(&dataset, "Engineering");

    assert_eq!(engineering.total, 103_288);
    assert_eq!(engineering.men, 90_053);
    assert_eq!(engineering.women, 13_235);
    assert!(engineering.warnings.is_empty());
    assert_eq!(engineering.women + engineering.men, engineering.total);
}

#[test]
fn unknown_category_yields_zeros() {
    let dataset = two_row_dataset();
    let result = aggregate(&dataset, "NoSuchCategory");
    assert_eq!(result, AggregateResult::new(0, 0, 0));
    assert!(result.is_empty());
    assert_eq!(result.share_women(), None);
}

#[test]
fn empty_dataset_yields_zeros() {
    let dataset = Dataset::default();
    assert_eq!(aggregate(&dataset, "Engineering"), AggregateResult::default());
}

#[test]
fn category_match_is_exact() {
    let dataset = two_row_dataset();
    assert!(aggregate(&dataset, "engineering").is_empty());
    assert!(aggregate(&dataset, "Engineering ").is_empty());
}

#[test]
fn share_women_is_fraction_of_total() {
    let dataset = two_row_dataset();
    let share = aggregate(&dataset, "Biological Sciences")
        .share_women()
        .expect("positive total");
    assert_relative_eq!(share, 0.7, epsilon = 1e-12);
}

#[test]
fn dirty_rows_are_summed_as_is_and_flagged() {
    let dataset = Dataset::load(DIRTY, CapitalizationMode::FirstLetter).expect("load dirty rows");
    let physical = aggregate(&dataset, "Physical Sciences");

    // The non-numeric total counts as zero; the negative women count is kept.
    assert_eq!(physical.total, 190);
    assert_eq!(physical.women, 55);
    assert_eq!(physical.men, 185);
    assert_eq!(physical.warnings.len(), 2);
    assert!(physical.warnings.iter().all(|w| w.row == 1 || w.row == 2));
}

#[test]
fn partition_break_traces_to_flagged_row() {
    let dataset = Dataset::load(DIRTY, CapitalizationMode::FirstLetter).expect("load dirty rows");
    let biological = aggregate(&dataset, "Biological Sciences");

    assert_ne!(biological.women + biological.men, biological.total);
    assert_eq!(biological.warnings.len(), 1);
    assert_eq!(biological.warnings[0].major, "Zoology");
    assert!(matches!(
        biological.warnings[0].issue,
        DataQualityIssue::PartitionMismatch { .. }
    ));
}

#[test]
fn aggregate_is_idempotent() {
    let dataset = Dataset::load(DIRTY, CapitalizationMode::FirstLetter).expect("load dirty rows");
    assert_eq!(
        aggregate(&dataset, "Physical Sciences"),
        aggregate(&dataset, "Physical Sciences")
    );
}

#[test]
fn cache_returns_same_result_as_direct_call() {
    let dataset = two_row_dataset();
    let mut cache = AggregateCache::new();
    assert!(cache.is_empty());

    cache.insert("Engineering", aggregate(&dataset, "Engineering"));
    cache.insert("Nope", aggregate(&dataset, "Nope"));
    cache.insert("Engineering", aggregate(&dataset, "Engineering"));

    assert_eq!(cache.len(), 2);
    assert_eq!(
        cache.get("Engineering"),
        Some(&aggregate(&dataset, "Engineering"))
    );
    assert_eq!(cache.get("Nope"), Some(&AggregateResult::default()));
    assert_eq!(cache.get("Health"), None);
}

#[test]
fn extreme_counts_saturate_and_are_reported() {
    let input = "Major,Major_category,Total,Women,Men\n\
                 big,Engineering,9223372036854775807,9223372036854775807,9223372036854775807\n\
                 big2,Engineering,9223372036854775807,1,1\n";
    let dataset =
        Dataset::from_reader(input.as_bytes(), CapitalizationMode::FirstLetter).expect("load");

    let result = aggregate(&dataset, "Engineering");
    assert_eq!(result.total, i64::MAX);
    assert_eq!(result.women, i64::MAX);
    assert_eq!(result.men, i64::MAX);

    let overflows: Vec<_> = result
        .warnings
        .iter()
        .filter(|w| matches!(w.issue, DataQualityIssue::SumOverflow { .. }))
        .collect();
    assert_eq!(overflows.len(), 3);
    assert!(overflows.iter().all(|w| w.row == 1 && w.major == "Big2"));
    assert!(matches!(
        overflows[0].issue,
        DataQualityIssue::SumOverflow {
            column: CountColumn::Total
        }
    ));
    assert!(dataset.quality_report().len() >= 2);
}
