use std::sync::Arc;

use majors_dashboard::DashboardError;
use majors_dashboard::api::{
    DASHBOARD_FRAME_JSON_SCHEMA_V1, DashboardConfig, DashboardSession, SelectionChange,
};
use majors_dashboard::core::{
    AxisField, CapitalizationMode, ChartSpec, Dataset, Record, SeriesField, SortOrder,
    build_chart,
};
use majors_dashboard::render::{DashboardFrame, NullRenderer};
use serde_json::Value;

const CONFIG: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/dashboard_config.json"
);

fn two_row_dataset() -> Arc<Dataset> {
    Arc::new(Dataset::from_records(vec![
        Record::new("Computer engineering", "Engineering", 100, 30, 70),
        Record::new("Biology", "Biological Sciences", 50, 35, 15),
    ]))
}

#[test]
fn frame_contract_uses_camel_case_selection_values() {
    let mut session = DashboardSession::new(
        NullRenderer::default(),
        two_row_dataset(),
        &DashboardConfig::default(),
    )
    .expect("session init");
    session.apply(SelectionChange::AxisField(AxisField::MajorCategory));

    let json = session.frame_json_contract_v1_pretty().expect("serialize");
    let value: Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["schema_version"], DASHBOARD_FRAME_JSON_SCHEMA_V1);
    let frame = &value["frame"];
    assert_eq!(frame["selection"]["categoryFilter"], "Engineering");
    assert_eq!(frame["selection"]["axisField"], "majorCategory");
    assert_eq!(frame["selection"]["sortOrder"], "categoryAscending");
    assert_eq!(frame["aggregate"]["total"], 100);
    assert_eq!(frame["chart"]["stacked"], true);
    assert_eq!(frame["chart"]["series"][0]["name"], "Men");
    assert_eq!(frame["chart"]["series"][1]["values"][1], 35);
    assert!(frame["aggregate"].get("warnings").is_none());

    let parsed = DashboardFrame::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, session.frame());
}

#[test]
fn chart_contract_accepts_bare_and_versioned_payloads() {
    let chart = build_chart(
        &two_row_dataset(),
        AxisField::Major,
        SeriesField::Women,
        SortOrder::TotalDescending,
    );

    let versioned = chart.to_json_contract_v1_pretty().expect("serialize");
    let bare = serde_json::to_string(&chart).expect("serialize bare");

    assert_eq!(
        ChartSpec::from_json_compat_str(&versioned).expect("versioned"),
        chart
    );
    assert_eq!(ChartSpec::from_json_compat_str(&bare).expect("bare"), chart);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let chart = build_chart(
        &Dataset::default(),
        AxisField::Major,
        SeriesField::Total,
        SortOrder::CategoryAscending,
    );
    let mut value: Value =
        serde_json::from_str(&chart.to_json_contract_v1_pretty().expect("serialize"))
            .expect("json");
    value["schema_version"] = Value::from(99);

    let err = ChartSpec::from_json_compat_str(&value.to_string()).expect_err("future schema");
    assert!(matches!(err, DashboardError::Serialization(_)));
}

#[test]
fn config_file_fills_missing_fields_with_defaults() {
    let config = DashboardConfig::from_json_file(CONFIG).expect("read config");

    assert_eq!(config.default_category, "Computers & Mathematics");
    assert_eq!(config.axis_field, AxisField::MajorCategory);
    assert_eq!(config.series_field, SeriesField::Total);
    assert_eq!(config.sort_order, SortOrder::TotalDescending);
    assert_eq!(config.capitalization, CapitalizationMode::Sentence);
    assert!(!config.memoize_aggregates);
    assert_eq!(config.bar_width, 40);

    let selection = config.initial_selection();
    assert_eq!(selection.category_filter, "Computers & Mathematics");
    assert_eq!(selection.axis_field, AxisField::MajorCategory);
}

#[test]
fn empty_config_object_is_the_stock_dashboard() {
    let config = DashboardConfig::from_json_str("{}").expect("defaults");
    assert_eq!(config, DashboardConfig::default());
    assert_eq!(config.default_category, "Engineering");
    assert_eq!(config.dataset_path.to_str(), Some("women-stem.csv"));
}

#[test]
fn config_with_unknown_selection_value_is_rejected() {
    let err = DashboardConfig::from_json_str(r#"{"sort_order": "random"}"#)
        .expect_err("unknown sort order");
    assert!(matches!(err, DashboardError::InvalidConfig(_)));

    let err = DashboardConfig::from_json_str(r#"{"bar_width": 0}"#).expect_err("zero width");
    assert!(matches!(err, DashboardError::InvalidConfig(_)));
}

#[test]
fn config_serializes_back_to_json() {
    let config = DashboardConfig::new("data/majors.csv").with_memoized_aggregates(true);
    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(
        DashboardConfig::from_json_str(&json).expect("parse"),
        config
    );
}
