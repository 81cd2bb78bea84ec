//! QvaPay command-line client
//!
//! Calls the QvaPay merchant and peer-to-peer APIs and prints the results as
//! JSON.

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigLoader};
use qvapay_sdk::client::QvaPayApi;
use qvapay_sdk::config::ProcessEnv;
use qvapay_sdk::objects::PageQuery;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// QvaPay - command-line client for the QvaPay payment API
#[derive(Parser, Debug)]
#[command(name = "qvapay")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "QVAPAY_CONFIG")]
    config: Option<PathBuf>,

    /// Client variant: "app" (merchant) or "qvapay" (peer-to-peer)
    #[arg(short, long)]
    mode: Option<String>,

    /// Override the API root (e.g., https://qvapay.com/api)
    #[arg(long)]
    base_url: Option<String>,

    /// Application id
    #[arg(long)]
    app_id: Option<String>,

    /// Application secret
    #[arg(long)]
    app_secret: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, default_value = "false")]
    insecure: bool,

    /// Dump every request and response to stderr
    #[arg(short, long, default_value = "false")]
    debug: bool,

    /// Whole-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the calling application's metadata
    Info,
    /// Create a payment invoice
    Invoice {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: String,
        #[arg(long)]
        remote_id: String,
    },
    /// List the application's transactions
    Transactions {
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one transaction
    Transaction { id: String },
    /// Show the application's balance
    Balance,
    /// List peer-to-peer offers
    Offers {
        #[arg(long)]
        page: Option<u32>,
    },
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            mode: self.mode.clone(),
            base_url: self.base_url.clone(),
            app_id: self.app_id.clone(),
            app_secret: self.app_secret.clone(),
            insecure: self.insecure,
            debug: self.debug,
            timeout: self.timeout,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let loader = ConfigLoader::new(args.config.as_ref(), args.overrides());
    let loaded = loader.load(&ProcessEnv).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::debug!(mode = %loaded.kind, base_url = %loaded.client.base_url, "Configuration loaded");

    let client = loaded.kind.connect(loaded.client).map_err(|e| {
        tracing::error!("Failed to build client: {}", e);
        e
    })?;

    run(client.as_ref(), args.command).await.map_err(|e| {
        tracing::error!("Request failed: {:#}", e);
        e
    })
}

async fn run(client: &dyn QvaPayApi, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Info => print_json(&client.get_info().await?),
        Command::Invoice {
            amount,
            description,
            remote_id,
        } => print_json(
            &client
                .create_invoice(amount, &description, &remote_id)
                .await?,
        ),
        Command::Transactions { page } => {
            print_json(&client.get_transactions(PageQuery { page }).await?)
        }
        Command::Transaction { id } => print_json(&client.get_transaction(&id).await?),
        Command::Balance => {
            println!("{}", client.get_balance().await?);
            Ok(())
        }
        Command::Offers { page } => print_json(&client.list_offers(PageQuery { page }).await?),
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode result")?;
    println!("{json}");
    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so stdout carries only results.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
