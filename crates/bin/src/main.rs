//! Vantage CLI binary.
//!
//! Builds a custom index dashboard and prints it, or lists the known indices.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vantage::{CatalogError, DashboardConfig, DashboardError, IndexCatalog, build_dashboard};
use vantage_data::{DataError, PriceProvider, file::CsvPriceProvider, yahoo::YahooPriceProvider};
use vantage_metrics::IndexDefinition;
use vantage_output::{
    Dashboard, ExportError, ExportFormat, Exporter, Report, ReportError, composition_bar,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("Unknown index '{name}'. Available: {available}")]
    UnknownIndex { name: String, available: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Progress bar template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

#[derive(Parser)]
#[command(name = "vantage")]
#[command(about = "Vantage: custom equity indices against a benchmark", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with extra index definitions
    #[arg(long, global = true)]
    indices: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and display the dashboard of an index
    Show {
        /// Index name (see `vantage list`)
        index: String,

        /// Lookback in years (overrides the config file)
        #[arg(long)]
        years: Option<u32>,

        /// Read `<SYMBOL>.csv` files from this directory instead of Yahoo
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// JSON file with fetch and metric settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the available indices
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
    Csv,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run() -> Result<(), CliError> {
    init_tracing()?;
    let cli = Cli::parse();

    let mut catalog = IndexCatalog::builtin();
    if let Some(path) = &cli.indices {
        catalog = catalog.merge(IndexCatalog::from_file(path)?);
    }

    match cli.command {
        Commands::List => list_indices(&catalog),
        Commands::Show {
            index,
            years,
            data_dir,
            config,
            format,
            output,
        } => {
            let definition = catalog
                .get(&index)
                .ok_or_else(|| CliError::UnknownIndex {
                    name: index.clone(),
                    available: catalog.names().join(", "),
                })?;

            let mut config = load_config(config.as_deref())?;
            if let Some(years) = years {
                config.fetch.lookback_years = years;
            }

            let dashboard = match data_dir {
                Some(dir) => {
                    fetch_dashboard(&CsvPriceProvider::new(dir), definition, &config).await?
                }
                None => {
                    let provider = YahooPriceProvider::with_config(&config.fetch)?;
                    fetch_dashboard(&provider, definition, &config).await?
                }
            };

            let years = config.fetch.lookback_years;
            match output {
                Some(path) => {
                    if format == OutputFormat::Json {
                        Report::new(&dashboard, years).write_json(&path)?;
                    } else {
                        std::fs::write(&path, render(&dashboard, format, years)?)?;
                    }
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", render(&dashboard, format, years)?),
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig, CliError> {
    let Some(path) = path else {
        return Ok(DashboardConfig::default());
    };
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

async fn fetch_dashboard<P: PriceProvider>(
    provider: &P,
    definition: &IndexDefinition,
    config: &DashboardConfig,
) -> Result<Dashboard, CliError> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!(
        "Fetching {} constituents and {}...",
        definition.constituents.len(),
        definition.benchmark
    ));

    match build_dashboard(provider, definition, config).await {
        Ok(dashboard) => {
            pb.finish_with_message(format!(
                "Built {} ({} observations)",
                dashboard.name,
                dashboard.index_series.len()
            ));
            Ok(dashboard)
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            Err(e.into())
        }
    }
}

fn render(dashboard: &Dashboard, format: OutputFormat, years: u32) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Text => dashboard.to_ascii_table(),
        OutputFormat::Markdown => dashboard.to_markdown(),
        OutputFormat::Csv => dashboard.export_to_string(ExportFormat::Csv)?,
        OutputFormat::Json => {
            let mut json = Report::new(dashboard, years).to_json()?;
            json.push('\n');
            json
        }
    })
}

fn list_indices(catalog: &IndexCatalog) {
    for definition in catalog.definitions() {
        println!("\n{} (benchmark: {})", definition.name, definition.benchmark);
        if !definition.description.is_empty() {
            println!("  {}", definition.description);
        }
        for constituent in &definition.constituents {
            println!(
                "  {:<12} {:>7.2}%  {}",
                constituent.symbol,
                constituent.weight * 100.0,
                composition_bar(constituent.weight)
            );
        }
    }
}
