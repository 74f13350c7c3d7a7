//! Command-line interface for stockscore

mod output;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use stockscore_engine::{
    AnalysisSnapshot, Analyzer, EngineConfig, SnapshotDirectorySource, StockAnalysisEngine,
};
use stockscore_utils::{Config, LogFormat};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "stockscore")]
#[command(about = "Score stocks from fundamentals, price history and news", long_about = None)]
struct Cli {
    /// Engine configuration file (JSON); falls back to $STOCKSCORE_CONFIG
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (plain or json); falls back to $STOCKSCORE_LOG_FORMAT
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse a single snapshot file
    Analyze {
        /// JSON snapshot with symbol, fundamentals, priceHistory and articles
        snapshot: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Include indicators, per-article sentiment and the full reason breakdown
        #[arg(long)]
        detailed: bool,
    },
    /// Analyse and rank several symbols from a snapshot directory
    Compare {
        /// Directory holding <SYMBOL>.json snapshots
        #[arg(short, long)]
        dir: PathBuf,

        #[arg(required = true)]
        symbols: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app = Config::from_env();
    stockscore_utils::init_tracing(cli.log_format.unwrap_or(app.log_format));
    debug!(environment = %app.environment, "Starting {}", app.app_name);

    let config = EngineConfig::load(cli.config.as_deref())
        .context("failed to load engine configuration")?;
    let config = Arc::new(config);

    match cli.command {
        Commands::Analyze {
            snapshot,
            format,
            detailed,
        } => {
            let snapshot = AnalysisSnapshot::from_file(&snapshot)
                .with_context(|| format!("failed to read snapshot {}", snapshot.display()))?;
            info!(symbol = %snapshot.symbol, "Analysing snapshot");

            let report = Analyzer::new(config).analyze_detailed(
                &snapshot.symbol,
                &snapshot.fundamentals,
                &snapshot.price_history,
                &snapshot.articles,
            );

            match format {
                OutputFormat::Json if detailed => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.result)?),
                OutputFormat::Table => {
                    println!("{}", output::result_table(&report.result));
                    println!("{}", report.result.summary());
                    if detailed {
                        println!("{}", output::detail_table(&report));
                    }
                }
            }
        }
        Commands::Compare {
            dir,
            symbols,
            format,
        } => {
            if !dir.is_dir() {
                bail!("snapshot directory {} does not exist", dir.display());
            }
            let source = Arc::new(SnapshotDirectorySource::new(dir));
            let engine = StockAnalysisEngine::new(source, config);

            let comparison = engine.compare(&symbols).await;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
                OutputFormat::Table => println!("{}", output::comparison_table(&comparison)),
            }

            if comparison.ranked.is_empty() {
                bail!("no symbol could be analysed");
            }
        }
    }

    Ok(())
}
