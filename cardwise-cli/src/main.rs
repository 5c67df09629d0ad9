use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use cardwise_core::time::GREETING_DATETIME_FORMAT;
use cardwise_core::{
    card_summaries, cashback_by_category, spending_by_category, top_transactions, Transaction,
    TracingSink,
};
use cardwise_ingest::load_ledger;

mod config;
mod logging;
mod report_file;
mod state;
mod views;

#[derive(Parser, Debug)]
#[command(name = "cardwise", version, about = "Cashback and spending reports for card statements")]
struct Cli {
    /// Statement CSV (overrides [ledger] path from the config)
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    /// File capturing the report result (overrides [reports] output)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Report(ReportCommand),

    /// Configuration file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Greeting, card totals, top transactions, currency rates and stock prices as JSON
    Home {
        /// "YYYY-MM-DD HH:MM:SS" (default: now)
        #[arg(long)]
        time: Option<String>,
    },

    /// Cashback per category for one month
    Cashback {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },

    /// Spending in one category over the last three months, grouped by timestamp
    CategorySpend {
        #[arg(long)]
        category: String,

        /// Reference date "DD.MM.YYYY" (default: now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Spending and cashback per card
    Cards,

    /// The five largest transactions
    Top,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.cardwise/config.toml with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(),
        },
        Command::Report(report) => run_report(report, cli.ledger, cli.output).await,
    }
}

async fn run_report(
    command: ReportCommand,
    ledger: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = config::load_config()?;
    let ledger_path = ledger.unwrap_or(cfg.ledger.path);
    let output = output.unwrap_or(cfg.reports.output);
    let txns = load_or_empty(&ledger_path);

    match command {
        ReportCommand::Home { time } => {
            let time =
                time.unwrap_or_else(|| Local::now().format(GREETING_DATETIME_FORMAT).to_string());
            let page = views::home_page(&time, &txns, &cfg.market).await?;
            println!("{}", serde_json::to_string_pretty(&page).context("serialize home page")?);
        }

        ReportCommand::Cashback { year, month } => {
            let outcome = cashback_by_category(&txns, year, month, &TracingSink);
            let inputs = format!("year={year} month={month}");
            let json = report_file::capture(&output, "cashback", &inputs, outcome)?;
            println!("{json}");
        }

        ReportCommand::CategorySpend { category, date } => {
            let groups = spending_by_category(&txns, &category, date.as_deref(), &TracingSink);
            let inputs = format!("category={category} date={}", date.as_deref().unwrap_or("now"));
            let json =
                report_file::capture(&output, "category-spend", &inputs, Ok::<_, String>(groups))?;
            println!("{json}");
        }

        ReportCommand::Cards => {
            let cards = card_summaries(&txns, &TracingSink);
            println!("{}", serde_json::to_string_pretty(&cards).context("serialize cards")?);
        }

        ReportCommand::Top => {
            let top = top_transactions(&txns, &TracingSink);
            println!("{}", serde_json::to_string_pretty(&top).context("serialize top")?);
        }
    }

    Ok(())
}

/// A ledger that cannot be loaded means there is nothing to report on.
fn load_or_empty(path: &Path) -> Vec<Transaction> {
    match load_ledger(path) {
        Ok(txns) => txns,
        Err(e) => {
            tracing::warn!(error = %e, "continuing with an empty ledger");
            Vec::new()
        }
    }
}
