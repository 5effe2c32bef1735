// Main entry point - Dependency injection, dashboard run and dataset build
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use body_dashboard::application::dashboard_service::DashboardService;
use body_dashboard::application::dataset_repository::DatasetRepository;
use body_dashboard::application::session::DashboardSession;
use body_dashboard::infrastructure::config::{load_dashboard_config, load_metrics_config, DatasetSource};
use body_dashboard::infrastructure::dataset_builder::DatasetBuilder;
use body_dashboard::infrastructure::file_dataset::FileDatasetRepository;
use body_dashboard::infrastructure::http_dataset::HttpDatasetRepository;
use body_dashboard::infrastructure::report_reader::ReportReader;
use body_dashboard::infrastructure::report_urls::read_report_urls;
use body_dashboard::presentation::console::ConsolePresenter;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "body-dashboard")]
#[command(version, about = "Body-composition measurement dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for the configured dataset (default)
    Show,

    /// Read every report listed in a URL file and write the dataset
    Build {
        /// File listing report URLs, one per line
        #[arg(long, default_value = "records.txt")]
        records: PathBuf,

        /// Where to write the dataset
        #[arg(long, default_value = "records_mapped.json")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => show().await,
        Commands::Build { records, out } => build(records, out).await,
    }
}

async fn show() -> anyhow::Result<()> {
    // Load configuration
    let dashboard_config = load_dashboard_config()?;
    let metrics_config = load_metrics_config()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn DatasetRepository> = match dashboard_config.dataset.source() {
        DatasetSource::Http(url) => Arc::new(HttpDatasetRepository::new(url)),
        DatasetSource::File(path) => Arc::new(FileDatasetRepository::new(path)),
    };

    // Create service (application layer)
    let service = DashboardService::new(repository, metrics_config);

    // Presentation layer
    let presenter = ConsolePresenter::new(std::io::stdout(), dashboard_config.dataset.placeholder.clone());

    let mut session =
        match DashboardSession::open(&service, presenter, dashboard_config.session.mode).await {
            Ok(session) => session,
            // Already reported to the presenter as a status line
            Err(_) => return Ok(()),
        };

    for metric in &dashboard_config.session.select {
        session.select(metric);
    }
    if let Some(primary) = session.selection().primary() {
        tracing::info!("{}: {}", primary, session.description_text(primary));
    }

    Ok(())
}

async fn build(records: PathBuf, out: PathBuf) -> anyhow::Result<()> {
    let urls = read_report_urls(&records)
        .with_context(|| format!("Failed to read {}", records.display()))?;
    if urls.is_empty() {
        tracing::warn!("No URLs found in {}", records.display());
        return Ok(());
    }

    let reader = ReportReader::new(reqwest::Client::new());
    let builder = DatasetBuilder::collect(&reader, &urls).await;
    for (metric, unit) in builder.units() {
        tracing::info!("{} measured in {}", metric, unit);
    }
    builder.write_to(&out)
}
