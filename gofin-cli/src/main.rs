use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{Parser, Subcommand};
use gofin_core::{MonthYear, RawAmount, RawTransaction, time::to_rfc3339_utc};
use gofin_finance::{Dashboard, Locale, Resume};
use gofin_ingest::{JsonFileStore, TransactionRepository};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "gofin", version, about = "Personal finance summaries from the local transaction store")]
struct Cli {
    /// Config file (default: ~/.gofin/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured locale (pt-BR, en-US)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Totals, last transactions and the transaction listing
    Dashboard {
        /// User whose transactions to read (default: config user_id)
        #[arg(long)]
        user: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Expenses of one month by category
    Resume {
        #[arg(long)]
        user: Option<String>,

        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<MonthYear>,

        /// Step back N months from --month
        #[arg(long, default_value_t = 0, conflicts_with = "next")]
        prev: u16,

        /// Step forward N months from --month
        #[arg(long, default_value_t = 0)]
        next: u16,

        #[arg(long)]
        json: bool,
    },

    /// Record a transaction
    Add {
        #[arg(long)]
        user: Option<String>,

        #[arg(long)]
        name: String,

        /// Non-negative amount, e.g. 59.90
        #[arg(long)]
        amount: String,

        #[arg(long = "type", value_parser = ["positive", "negative"])]
        kind: String,

        /// Category key (see `gofin categories`)
        #[arg(long)]
        category: String,

        /// YYYY-MM-DD or RFC 3339 (default: now)
        #[arg(long)]
        date: Option<String>,
    },

    /// List the category catalog
    Categories,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut cfg = config::load_config(cli.config.as_deref())?;
    if let Some(locale) = cli.locale {
        cfg.locale = locale;
    }

    match cli.command {
        Command::Dashboard { user, json } => {
            let user = user.unwrap_or_else(|| cfg.user_id.clone());
            let txns = repository(&cfg)?
                .load(&user, cfg.tz()?)
                .await
                .with_context(|| format!("loading transactions of user {user}"))?;

            let dash = Dashboard::build(&txns, cfg.locale);
            output(&dash, json, render::dashboard)?;
        }

        Command::Resume {
            user,
            month,
            prev,
            next,
            json,
        } => {
            let user = user.unwrap_or_else(|| cfg.user_id.clone());
            let tz = cfg.tz()?;
            let month = month
                .unwrap_or_else(|| MonthYear::of(Utc::now().with_timezone(&tz).date_naive()))
                .shift(i32::from(next) - i32::from(prev))
                .ok_or_else(|| anyhow!("selected month is out of range"))?;

            let txns = repository(&cfg)?
                .load(&user, tz)
                .await
                .with_context(|| format!("loading transactions of user {user}"))?;

            let resume = Resume::build(&txns, month, &cfg.catalog(), cfg.locale);
            output(&resume, json, render::resume)?;
        }

        Command::Add {
            user,
            name,
            amount,
            kind,
            category,
            date,
        } => {
            let user = user.unwrap_or_else(|| cfg.user_id.clone());
            let catalog = cfg.catalog();
            if !catalog.contains(&category) {
                tracing::warn!(category = %category, "category is not in the catalog; it will not show up in resume");
            }

            let record = RawTransaction {
                id: uuid::Uuid::new_v4().to_string(),
                name,
                amount: RawAmount::Text(amount),
                kind,
                category,
                date: date.unwrap_or_else(|| to_rfc3339_utc(Utc::now())),
            };
            let id = record.id.clone();

            repository(&cfg)?
                .append(&user, record, cfg.tz()?)
                .await
                .with_context(|| format!("storing transaction for user {user}"))?;
            println!("Added {id}");
        }

        Command::Categories => {
            print!("{}", render::categories(&cfg.catalog()));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn repository(cfg: &Config) -> Result<TransactionRepository<JsonFileStore>> {
    let path = cfg.store_path()?;
    tracing::debug!(path = %path.display(), "using store file");
    Ok(TransactionRepository::new(JsonFileStore::new(path)).with_read_timeout(cfg.read_timeout()))
}

fn output<T: Serialize>(view: &T, json: bool, text: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", text(view));
    }
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn setup_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
