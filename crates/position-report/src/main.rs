use anyhow::{Context, Result};
use position_tax::OperationBook;

mod config;
mod import;
mod render;

use config::{ReportConfig, ReportFormat};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = ReportConfig::from_env(std::env::args().nth(1))?;
    tracing::info!(
        file = %config.operations_file.display(),
        format = ?config.format,
        "Configuration loaded"
    );

    let csv_data = std::fs::read_to_string(&config.operations_file).with_context(|| {
        format!(
            "Failed to read operations file {}",
            config.operations_file.display()
        )
    })?;
    let drafts = import::parse_operations_csv(&csv_data).context("Failed to parse operations CSV")?;

    let mut book = OperationBook::new();
    let result = import::import_operations(&mut book, &drafts);
    tracing::info!(
        imported = result.imported,
        skipped = result.skipped,
        "Operations imported"
    );
    for error in &result.errors {
        eprintln!("skipped {error}");
    }

    let points = book.points();
    let visible = render::focus_window(&points, config.focus_index);

    match config.format {
        ReportFormat::Table => {
            println!("{}", render::render_legend());
            println!();
            print!("{}", render::render_table(visible));
        }
        ReportFormat::Json => println!("{}", render::render_json(visible)?),
    }

    Ok(())
}
