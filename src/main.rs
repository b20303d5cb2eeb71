use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use reqwest::Client;
use sasegen::{
    config::SiteConfig,
    fetch::{fetch_table, Location},
    model::count_valid,
    render::Container,
    schema::Source,
    site,
};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Generate the chapter site's CSV-driven page sections")]
struct Cli {
    /// Site config; `site.yaml` is used when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Build date override (YYYY-MM-DD).
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch every source, render every section and rewrite the pages.
    Build,
    /// Print a CSV resource as JSON records.
    Parse {
        location: String,
        /// Validate against this source's columns first.
        #[arg(long)]
        source: Option<Source>,
    },
    /// Print one container's fragment.
    Render { container: Container },
    /// Fetch and validate every source.
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sasegen=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) load config ──────────────────────────────────────────────
    let cli = Cli::parse();
    let mut config = SiteConfig::load_or_default(cli.config.as_deref())?;
    if cli.today.is_some() {
        config.today = cli.today;
    }
    let client = Client::new();

    // ─── 3) run ──────────────────────────────────────────────────────
    match cli.command {
        Command::Build => {
            info!(today = %config.today(), base = %config.base, "startup");
            let report = site::build(&config, &client).await?;
            if !report.failed.is_empty() {
                warn!(failed = ?report.failed, "some sections were not updated");
            }
        }
        Command::Parse { location, source } => {
            let location = Location::parse(&location)?;
            let table = fetch_table(&client, &location).await?;
            if let Some(source) = source {
                let valid = count_valid(source, &table)
                    .with_context(|| format!("validating {location} as {source}"))?;
                info!(source = %source, records = table.len(), valid, "validated");
            }
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        Command::Render { container } => {
            let html = site::render_one(&config, &client, container).await?;
            println!("{html}");
        }
        Command::Check => {
            let reports = site::check(&config, &client).await?;
            let mut failed = 0;
            for r in &reports {
                match &r.error {
                    None => info!(
                        source = %r.source,
                        location = %r.location,
                        records = r.records,
                        skipped = r.skipped(),
                        "ok"
                    ),
                    Some(e) => {
                        failed += 1;
                        error!(source = %r.source, location = %r.location, error = %e, "failed");
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&reports)?);
            if failed > 0 {
                bail!("{failed} of {} sources failed", reports.len());
            }
        }
    }

    Ok(())
}
