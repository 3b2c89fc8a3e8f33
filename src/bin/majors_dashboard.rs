use std::path::PathBuf;

use majors_dashboard::api::{DashboardConfig, DashboardSession, SelectionChange};
use majors_dashboard::core::CategoricalColumn;
use majors_dashboard::render::TextRenderer;
use majors_dashboard::telemetry::init_default_tracing;
use tracing::info;

const USAGE: &str = "usage: majors_dashboard [--config <path>] [--data <path>] [--category <name>] \
[--axis major|majorCategory] [--series total|women|men] \
[--sort categoryAscending|totalAscending|totalDescending] [--format text|json] [--bar-width <n>] \
[--list-categories] [--list-majors] [--quality-report]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Categories,
    Majors,
    QualityReport,
}

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    bar_width: Option<usize>,
    changes: Vec<(&'static str, String)>,
    format: Option<OutputFormat>,
    listing: Option<Listing>,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_json_file(path).map_err(|err| err.to_string())?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = args.data {
        config.dataset_path = data;
    }
    if let Some(bar_width) = args.bar_width {
        config.bar_width = bar_width;
    }

    let renderer = TextRenderer::new(config.bar_width);
    let mut session =
        DashboardSession::from_config(renderer, &config).map_err(|err| err.to_string())?;
    info!(
        path = %config.dataset_path.display(),
        rows = session.dataset().len(),
        "dataset loaded"
    );

    if let Some(listing) = args.listing {
        let dataset = session.dataset();
        let lines: Vec<String> = match listing {
            Listing::Categories => dataset
                .distinct(CategoricalColumn::MajorCategory)
                .iter()
                .cloned()
                .collect(),
            Listing::Majors => dataset
                .distinct(CategoricalColumn::Major)
                .iter()
                .cloned()
                .collect(),
            Listing::QualityReport => dataset
                .quality_report()
                .iter()
                .map(ToString::to_string)
                .collect(),
        };
        for line in lines {
            println!("{line}");
        }
        return Ok(());
    }

    for (control, value) in &args.changes {
        let change = SelectionChange::parse(control, value).map_err(|err| err.to_string())?;
        session.apply(change);
    }

    match args.format.unwrap_or(OutputFormat::Text) {
        OutputFormat::Text => {
            session.render().map_err(|err| err.to_string())?;
            print!("{}", session.renderer().output());
        }
        OutputFormat::Json => {
            let frame = session.frame();
            frame.validate().map_err(|err| err.to_string())?;
            let json = frame
                .to_json_contract_v1_pretty()
                .map_err(|err| err.to_string())?;
            println!("{json}");
        }
    }
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}\n{USAGE}"))
        };
        match flag.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--data" => parsed.data = Some(PathBuf::from(value("--data")?)),
            "--category" => parsed
                .changes
                .push(("categoryFilter", value("--category")?)),
            "--axis" => parsed.changes.push(("axisField", value("--axis")?)),
            "--series" => parsed.changes.push(("seriesField", value("--series")?)),
            "--sort" => parsed.changes.push(("sortOrder", value("--sort")?)),
            "--bar-width" => {
                let raw = value("--bar-width")?;
                let width = raw
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --bar-width `{raw}`"))?;
                parsed.bar_width = Some(width);
            }
            "--format" => {
                parsed.format = Some(match value("--format")?.as_str() {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    other => return Err(format!("unknown format `{other}`\n{USAGE}")),
                });
            }
            "--list-categories" => parsed.listing = Some(Listing::Categories),
            "--list-majors" => parsed.listing = Some(Listing::Majors),
            "--quality-report" => parsed.listing = Some(Listing::QualityReport),
            "-h" | "--help" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown flag `{other}`\n{USAGE}")),
        }
    }

    Ok(parsed)
}
