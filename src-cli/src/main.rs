//! Labelmaker command line
//!
//! ```text
//! labelmaker template.svg sheet.ini data.csv out.svg --only ship=yes --dir row
//! ```
//!
//! Writes `out_0.svg`, `out_1.svg`, ... one file per filled sheet.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use label_merge::{
    CsvConfig, CsvParser, Direction, FileSink, GridPosition, MergeConfig, MergeEngine, Selection,
    SheetGeometry,
};
use label_template::{Filter, MissingFieldPolicy, Template, TemplateOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "labelmaker")]
#[command(about = "Generate label sheets from an SVG template and CSV data")]
#[command(version)]
struct Cli {
    /// SVG template for a single label
    template: PathBuf,

    /// Sheet configuration (INI file with a [sheet] section)
    config: PathBuf,

    /// CSV data, one label per record after the header
    data: PathBuf,

    /// Output file; pages are written as <output>_<n>.svg
    output: PathBuf,

    /// Only process rows where FIELD is non-empty, or equals VALUE
    #[arg(long, value_name = "FIELD[=VALUE]")]
    only: Option<Selection>,

    /// Starting row, zero is topmost
    #[arg(long = "start-row", alias = "start_row", default_value_t = 0)]
    start_row: usize,

    /// Starting column, zero is leftmost
    #[arg(long = "start-col", alias = "start_col", default_value_t = 0)]
    start_col: usize,

    /// Fill order: across rows (row) or down columns (col)
    #[arg(long, default_value = "col", value_name = "row|col")]
    dir: Direction,

    /// Behaviour when a template marker names a column the data lacks
    #[arg(long = "missing-field", default_value = "fail", value_name = "fail|empty")]
    missing_field: MissingFieldPolicy,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let options = TemplateOptions::default().with_missing_field(cli.missing_field);
    let template = Template::from_file(&cli.template, Filter::default_pipeline(), options)
        .with_context(|| format!("Failed to load template: {}", cli.template.display()))?;

    let geometry = SheetGeometry::from_file(&cli.config)
        .with_context(|| format!("Failed to load sheet configuration: {}", cli.config.display()))?;

    let config = MergeConfig::new(template, geometry)
        .with_direction(cli.dir)
        .with_start(GridPosition::new(cli.start_row, cli.start_col))
        .with_selection(cli.only.clone());
    let engine = MergeEngine::new(config).context("Invalid starting position")?;

    let rows = CsvParser::with_config(CsvConfig::for_path(&cli.data))
        .open_file(&cli.data)
        .with_context(|| format!("Failed to open data: {}", cli.data.display()))?;

    tracing::info!(
        template = %cli.template.display(),
        data = %cli.data.display(),
        direction = %cli.dir,
        "generating label sheets"
    );

    let mut sink = FileSink::new(&cli.output);
    let summary = engine
        .run_reader(rows, &mut sink)
        .with_context(|| format!("Failed to generate labels from {}", cli.data.display()))?;

    for path in sink.written() {
        println!("{}", path.display());
    }
    tracing::info!(
        pages = summary.pages,
        labels = summary.rows_placed,
        skipped = summary.rows_skipped,
        "done"
    );
    Ok(())
}
