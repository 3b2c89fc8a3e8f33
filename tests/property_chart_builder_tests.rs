use majors_dashboard::core::{
    AxisField, Dataset, Record, SeriesField, SeriesName, SortOrder, build_chart,
};
use proptest::prelude::*;

fn record() -> impl Strategy<Value = Record> {
    (
        prop::sample::select(vec!["Biology", "Chemistry", "Geology", "Nursing"]),
        prop::sample::select(vec!["Biological Sciences", "Physical Sciences", "Health"]),
        0i64..100_000,
        0i64..100_000,
    )
        .prop_map(|(major, category, women, men)| {
            Record::new(major, category, women + men, women, men)
        })
}

fn axis_field() -> impl Strategy<Value = AxisField> {
    prop::sample::select(vec![AxisField::Major, AxisField::MajorCategory])
}

fn series_field() -> impl Strategy<Value = SeriesField> {
    prop::sample::select(vec![SeriesField::Total, SeriesField::Women, SeriesField::Men])
}

fn sort_order() -> impl Strategy<Value = SortOrder> {
    prop::sample::select(vec![
        SortOrder::CategoryAscending,
        SortOrder::TotalAscending,
        SortOrder::TotalDescending,
    ])
}

proptest! {
    #[test]
    fn every_series_spans_the_axis(
        records in prop::collection::vec(record(), 0..48),
        axis in axis_field(),
        series in series_field(),
        order in sort_order()
    ) {
        let dataset = Dataset::from_records(records);
        let chart = build_chart(&dataset, axis, series, order);

        prop_assert_eq!(chart.axis_labels.len(), dataset.len());
        for s in &chart.series {
            prop_assert_eq!(s.values.len(), chart.axis_labels.len());
        }
    }

    #[test]
    fn series_count_follows_series_field(
        records in prop::collection::vec(record(), 0..16),
        axis in axis_field(),
        series in series_field(),
        order in sort_order()
    ) {
        let dataset = Dataset::from_records(records);
        let chart = build_chart(&dataset, axis, series, order);

        if series == SeriesField::Total {
            let names: Vec<_> = chart.series.iter().map(|s| s.name).collect();
            prop_assert_eq!(names, vec![SeriesName::Men, SeriesName::Women]);
            prop_assert!(chart.stacked);
        } else {
            prop_assert_eq!(chart.series.len(), 1);
            prop_assert!(!chart.stacked);
        }
    }

    #[test]
    fn build_chart_is_idempotent(
        records in prop::collection::vec(record(), 0..32),
        axis in axis_field(),
        series in series_field(),
        order in sort_order()
    ) {
        let dataset = Dataset::from_records(records);
        prop_assert_eq!(
            build_chart(&dataset, axis, series, order),
            build_chart(&dataset, axis, series, order)
        );
    }

    #[test]
    fn ordered_axis_is_a_sorted_permutation_of_distinct_labels(
        records in prop::collection::vec(record(), 0..48),
        axis in axis_field(),
        series in series_field(),
        order in sort_order()
    ) {
        let dataset = Dataset::from_records(records);
        let chart = build_chart(&dataset, axis, series, order);
        let ticks = chart.ordered_axis();

        let mut expected: Vec<&str> = chart.axis_labels.iter().map(String::as_str).collect();
        expected.sort_unstable();
        expected.dedup();
        let mut seen: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, expected);

        for pair in ticks.windows(2) {
            match order {
                SortOrder::CategoryAscending => prop_assert!(pair[0].label < pair[1].label),
                SortOrder::TotalAscending => prop_assert!(pair[0].total <= pair[1].total),
                SortOrder::TotalDescending => prop_assert!(pair[0].total >= pair[1].total),
            }
        }

        let grand_total: i64 = chart.series.iter().flat_map(|s| s.values.iter()).sum();
        prop_assert_eq!(ticks.iter().map(|t| t.total).sum::<i64>(), grand_total);
    }
}
