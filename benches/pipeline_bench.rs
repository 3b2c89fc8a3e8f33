use criterion::{Criterion, criterion_group, criterion_main};
use majors_dashboard::core::{
    AxisField, CapitalizationMode, Dataset, Record, SeriesField, SortOrder, aggregate, build_chart,
};
use std::hint::black_box;

const CATEGORIES: [&str; 16] = [
    "Agriculture & Natural Resources",
    "Arts",
    "Biology & Life Science",
    "Business",
    "Communications & Journalism",
    "Computers & Mathematics",
    "Education",
    "Engineering",
    "Health",
    "Humanities & Liberal Arts",
    "Industrial Arts & Consumer Services",
    "Interdisciplinary",
    "Law & Public Policy",
    "Physical Sciences",
    "Psychology & Social Work",
    "Social Science",
];

fn synthetic_dataset(rows: usize) -> Dataset {
    let records = (0..rows)
        .map(|i| {
            let women = (i as i64 * 37) % 50_000;
            let men = (i as i64 * 53) % 60_000;
            Record::new(
                format!("Major {i}"),
                CATEGORIES[i % CATEGORIES.len()],
                women + men,
                women,
                men,
            )
        })
        .collect();
    Dataset::from_records(records)
}

fn synthetic_csv(rows: usize) -> String {
    let mut csv = String::from("Major,Major_category,Total,Women,Men\n");
    for i in 0..rows {
        let women = (i * 37) % 50_000;
        let men = (i * 53) % 60_000;
        csv.push_str(&format!(
            "MAJOR {i},{},{},{women},{men}\n",
            CATEGORIES[i % CATEGORIES.len()],
            women + men
        ));
    }
    csv
}

fn bench_load_10k(c: &mut Criterion) {
    let csv = synthetic_csv(10_000);

    c.bench_function("dataset_load_10k", |b| {
        b.iter(|| {
            let _ = Dataset::from_reader(
                black_box(csv.as_bytes()),
                black_box(CapitalizationMode::Sentence),
            )
            .expect("load should succeed");
        })
    });
}

fn bench_aggregate_10k(c: &mut Criterion) {
    let dataset = synthetic_dataset(10_000);

    c.bench_function("aggregate_10k", |b| {
        b.iter(|| {
            let _ = aggregate(black_box(&dataset), black_box("Engineering"));
        })
    });
}

fn bench_build_chart_10k(c: &mut Criterion) {
    let dataset = synthetic_dataset(10_000);

    c.bench_function("build_chart_stacked_10k", |b| {
        b.iter(|| {
            let chart = build_chart(
                black_box(&dataset),
                black_box(AxisField::MajorCategory),
                black_box(SeriesField::Total),
                black_box(SortOrder::TotalDescending),
            );
            let _ = chart.ordered_axis();
        })
    });
}

criterion_group!(
    benches,
    bench_load_10k,
    bench_aggregate_10k,
    bench_build_chart_10k
);
criterion_main!(benches);
