//! Operational CLI for the catalog core: inspect what the storefront would
//! see without standing up the storefront.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use lxt_catalog::catalog::USED_CATEGORY;
use lxt_catalog::pricing::{self, PaymentMethod};
use lxt_catalog::{Catalog, Config, ExchangeRate, SheetClient, sheet};

#[derive(Parser)]
#[command(name = "lxt-catalog", version, about = "LXT catalog ingestion and pricing tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the inventory sheet and print the normalized used catalog
    Catalog,
    /// Fetch the current blue-dollar rate (surcharge included)
    Rate,
    /// Price a USD amount across payment methods
    Quote {
        /// Base price in USD
        #[arg(long)]
        usd: f64,
        /// Single method to price (default: all)
        #[arg(long)]
        method: Option<PaymentMethod>,
        /// Skip the live quote fetch and use the fallback rate
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let http = reqwest::Client::new();

    match cli.command {
        Command::Catalog => {
            let catalog = Catalog::empty();
            let client = SheetClient::new(http, &config.sheet_id);

            match sheet::refresh(&catalog, &client).await {
                Ok(count) => println!("{}", format!("{count} used items loaded").green()),
                Err(err) => {
                    eprintln!("{} {err:#}", "sheet fetch failed:".red());
                    eprintln!("continuing with the static subset only");
                }
            }

            for entry in catalog.snapshot().iter() {
                if entry.category != USED_CATEGORY {
                    continue;
                }
                let battery = entry.battery_health.as_deref().unwrap_or("-");
                println!(
                    "{:<28} {:>8}  bat {:<5} {}",
                    entry.name.bold(),
                    format!("USD {}", entry.price_usd),
                    battery,
                    entry.description.dimmed(),
                );
            }
        }
        Command::Rate => {
            let rate = pricing::fetch_blue_rate(&http, &config.quote_url).await;
            if rate.is_fallback() {
                println!(
                    "{} {} ARS (quote unavailable)",
                    "fallback rate:".yellow(),
                    rate.effective()
                );
            } else {
                println!("{} {} ARS", "blue rate:".green(), rate.effective());
            }
        }
        Command::Quote {
            usd,
            method,
            offline,
        } => {
            let rate = if offline {
                ExchangeRate::unresolved()
            } else {
                pricing::fetch_blue_rate(&http, &config.quote_url).await
            };
            println!("rate: {} ARS\n", rate.effective());

            let methods: Vec<PaymentMethod> = match method {
                Some(m) => vec![m],
                None => PaymentMethod::ALL.to_vec(),
            };
            for m in methods {
                let q = pricing::price_for(usd, m, &rate);
                let installment = q
                    .installment
                    .map(|v| format!("  ({v:.0}/cuota)"))
                    .unwrap_or_default();
                println!("{:<26} {} {:.0}{}", m.label().bold(), q.currency, q.total, installment);
            }
        }
    }

    Ok(())
}
