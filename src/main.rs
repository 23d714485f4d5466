use anyhow::Result;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zamalek_news::config::{ConfigOverrides, resolve_config};
use zamalek_news::fetch::{FileFetcher, HttpFetcher, PageFetcher};
use zamalek_news::pipeline::{RunOptions, run};
use zamalek_news::store::render_items;

#[derive(Parser, Debug)]
#[command(name = "zamalek_news", about = "Snapshot a site's news listing as JSON")]
struct Cli {
    /// Page to scrape
    #[arg(long)]
    url: Option<String>,

    /// Output JSON file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Maximum items to save
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    limit: Option<usize>,

    /// TOML file with scraper settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read the page from a saved HTML file instead of the network
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Print the JSON to stdout instead of writing the output file
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let config = resolve_config(
        cli.config.as_deref(),
        ConfigOverrides {
            url: cli.url,
            output: cli.output,
            limit: cli.limit,
        },
    )?;

    let fetcher: Box<dyn PageFetcher> = match cli.input_file {
        Some(path) => Box::new(FileFetcher::new(path)),
        None => Box::new(HttpFetcher::from_config(&config)?),
    };

    let (report, items) = run(
        &config,
        fetcher.as_ref(),
        &RunOptions {
            dry_run: cli.dry_run,
        },
    )?;

    info!(
        url = %report.url,
        strategy = ?report.strategy.map(|s| s.to_string()),
        fetch_failed = report.fetch_failed,
        found = report.found,
        kept = report.kept,
        "scrape summary"
    );

    if items.is_empty() {
        println!("No items found.");
    } else if cli.dry_run {
        println!("{}", render_items(&items)?);
    } else if let Some(path) = &report.written {
        println!("Saved {} items to {}", report.kept, path.display());
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}
