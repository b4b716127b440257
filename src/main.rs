use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use screener_score::config::AppConfig;
use screener_score::models::CompanyReport;
use screener_score::pipeline::{analyze_page, Pipeline};
use screener_score::utils::{self, fmt_score};

#[derive(Parser)]
#[command(name = "screener-score", about = "Score screener.in company pages", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, extract and score one or more tickers
    Analyze {
        /// Ticker symbols as used in screener.in URLs (e.g. TCS, INFY)
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Print a score summary instead of the JSON report
        #[arg(short, long)]
        summary: bool,
    },

    /// Extract and score a saved company page without fetching
    Inspect {
        /// Path to an HTML file saved from a company page
        file: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "screener_score=info,warn",
        1 => "screener_score=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Analyze { tickers, summary } => {
            let _t = utils::Timer::start(format!("Analyze {} ticker(s)", tickers.len()));
            let pipeline = Pipeline::new(&config)?;
            let (reports, stats) = pipeline.run(&tickers).await?;

            for report in &reports {
                if summary {
                    print_summary(report);
                } else {
                    print_json(report, config.output.pretty)?;
                }
            }

            if stats.errors > 0 {
                bail!(
                    "Failed to fetch stock data for {} of {} ticker(s)",
                    stats.errors,
                    stats.tickers_requested
                );
            }
        }

        Command::Inspect { file } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let report = analyze_page(&html).map_err(|e| {
                warn!("{:?}: {}", file, e);
                anyhow::anyhow!("Failed to extract stock data from {:?}", file)
            })?;
            info!("{:?}: {}", file, report.evaluation.evaluation);
            print_json(&report, config.output.pretty)?;
        }

        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn print_json(report: &CompanyReport, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    println!("{}", json);
    Ok(())
}

fn print_summary(report: &CompanyReport) {
    let scores = &report.evaluation.scores;
    let rows = [
        ("Financial health", scores.financial_health),
        ("Profitability", scores.profitability),
        ("Valuation", scores.valuation),
        ("Growth", scores.growth),
        ("Algorithmic", scores.algorithmic),
        ("Value investing", scores.value_investing),
        ("Growth investing", scores.growth_investing),
        ("Dividend investing", scores.dividend_investing),
        ("Momentum investing", scores.momentum_investing),
    ];

    println!("─────────────────────────────────");
    println!("  {}", report.profile.name);
    println!("─────────────────────────────────");
    for (label, score) in rows {
        println!("  {:<19}: {}", label, fmt_score(score));
    }
    println!("─────────────────────────────────");
    println!("  {:<19}: {}", "Overall", fmt_score(report.evaluation.overall_score));
    println!("  {:<19}: {}", "Evaluation", report.evaluation.evaluation);
    println!("─────────────────────────────────");
}
