//! cointrack - terminal client for the crypto holdings backend

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cointrack_networking::cache::CryptoCache;
use cointrack_networking::ApiClient;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "cointrack",
    about = "Track crypto holdings against a cointrack backend",
    version
)]
struct Cli {
    /// User id to act as (defaults to COINTRACK_USER)
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the crypto catalog
    Cryptos,
    /// Add a crypto to the catalog
    AddCrypto {
        /// Display name, e.g. "Bitcoin"
        name: String,
        /// Ticker symbol, uppercase
        symbol: String,
        /// Current value of one unit
        #[arg(short, long)]
        value: f64,
        /// Creation date (YYYY-MM-DD)
        #[arg(short, long)]
        created: String,
        /// Mark the crypto active
        #[arg(long)]
        active: bool,
    },
    /// Edit fields of an existing crypto
    EditCrypto {
        /// Backend id of the crypto
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        value: Option<f64>,
        /// Creation date (YYYY-MM-DD)
        #[arg(long)]
        created: Option<String>,
        /// true or false
        #[arg(long)]
        active: Option<bool>,
    },
    /// Remove a crypto (refused while any wallet holds it)
    RemoveCrypto { id: String },
    /// List registered users
    Users,
    /// Register a user
    AddUser {
        name: String,
        email: String,
        password: String,
        /// Mark the account active
        #[arg(long)]
        active: bool,
    },
    /// Remove a user and their transaction history
    RemoveUser { id: String },
    /// Show the selected user's wallet
    Wallet,
    /// Buy a crypto for the selected user at its current value
    Buy {
        /// Backend id of the crypto to buy
        crypto_id: String,
        /// Amount to spend
        #[arg(short, long)]
        amount: f64,
    },
    /// List the selected user's transactions
    Transactions,
    /// Delete a transaction record
    RemoveTransaction { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cointrack=debug,cointrack_networking=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config::load()?;

    let cache = Arc::new(CryptoCache::default());
    let client = ApiClient::new_with_cache(&config.token, cache).with_base_url(&config.api_url);

    if let Err(e) = dispatch(cli, &config, &client).await {
        error!("Command failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn dispatch(cli: Cli, config: &config::Config, client: &ApiClient) -> Result<()> {
    match cli.command {
        Command::Cryptos => commands::cryptos::list(client).await?,
        Command::AddCrypto {
            name,
            symbol,
            value,
            created,
            active,
        } => commands::cryptos::add(client, &name, &symbol, value, &created, active).await?,
        Command::EditCrypto {
            id,
            name,
            symbol,
            value,
            created,
            active,
        } => commands::cryptos::edit(client, &id, name, symbol, value, created, active).await?,
        Command::RemoveCrypto { id } => commands::cryptos::remove(client, &id).await?,
        Command::Users => commands::users::list(client).await?,
        Command::AddUser {
            name,
            email,
            password,
            active,
        } => commands::users::add(client, &name, &email, &password, active).await?,
        Command::RemoveUser { id } => commands::users::remove(client, &id).await?,
        Command::Wallet => {
            let user_id = selected_user(&cli.user, config)?;
            commands::wallet::show(client, &user_id).await?
        }
        Command::Buy { crypto_id, amount } => {
            let user_id = selected_user(&cli.user, config)?;
            commands::buy::run(client, &user_id, &crypto_id, amount).await?
        }
        Command::Transactions => {
            let user_id = selected_user(&cli.user, config)?;
            commands::transactions::list(client, &user_id).await?
        }
        Command::RemoveTransaction { id } => commands::transactions::remove(client, &id).await?,
    }

    Ok(())
}

/// The user acted on: `--user` beats `COINTRACK_USER`
fn selected_user(flag: &Option<String>, config: &config::Config) -> Result<String> {
    flag.clone()
        .or_else(|| config.user_id.clone())
        .context("no user selected: pass --user <id> or set COINTRACK_USER")
}
