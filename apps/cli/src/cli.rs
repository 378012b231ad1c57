//! Command-line interface for the dashboard data layer

use anyhow::anyhow;
use chrono::Utc;
use clap::{Parser, Subcommand};
use coindash_market_data::NewWallet;
use serde::Serialize;
use serde_json::json;

use crate::main_lib::Services;

#[derive(Parser)]
#[command(name = "coindash")]
#[command(about = "Crypto portfolio data with multi-provider failover")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List trending coins
    Trending {
        /// Include which providers were tried
        #[arg(long)]
        diagnostics: bool,
    },

    /// Show the 7-day price history of a coin
    History {
        /// Coin id (e.g., "bitcoin")
        coin_id: String,
    },

    /// Show a single coin from the trending list
    Coin {
        /// Coin id (e.g., "ethereum")
        coin_id: String,
    },

    /// Show the portfolio summary
    Portfolio,

    /// List the user's wallets
    Wallets,

    /// Add a wallet with a generated balance
    AddWallet {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        address: String,

        /// Wallet type (e.g., "Hardware", "Exchange")
        #[arg(short = 't', long = "type", default_value = "Software")]
        wallet_type: String,
    },

    /// List recent transactions of a wallet
    Transactions {
        wallet_id: String,
    },

    /// Show provider health
    Providers,
}

pub async fn run_cli(cli: Cli, services: &Services) -> anyhow::Result<()> {
    match cli.command {
        Commands::Trending { diagnostics } => {
            if diagnostics {
                let (result, diag) = services.coins.get_trending_coins_with_diagnostics().await;
                eprintln!("{}", diag.summary());
                print_json(&result?)
            } else {
                print_json(&services.coins.get_trending_coins().await?)
            }
        }
        Commands::History { coin_id } => {
            print_json(&services.coins.get_coin_price_history(&coin_id).await?)
        }
        Commands::Coin { coin_id } => match services.coins.get_coin_by_id(&coin_id).await? {
            Some(coin) => print_json(&coin),
            None => Err(anyhow!("Coin with ID {} not found", coin_id)),
        },
        Commands::Portfolio => print_json(&services.wallets.get_portfolio_summary().await?),
        Commands::Wallets => print_json(&services.wallets.get_user_wallets().await?),
        Commands::AddWallet {
            name,
            address,
            wallet_type,
        } => {
            let wallet = services
                .wallets
                .add_wallet(NewWallet {
                    name,
                    address,
                    wallet_type,
                })
                .await?;
            print_json(&wallet)
        }
        Commands::Transactions { wallet_id } => {
            print_json(&services.wallets.get_wallet_transactions(&wallet_id).await?)
        }
        Commands::Providers => {
            let now = Utc::now();
            let providers: Vec<_> = services
                .coins
                .registry()
                .providers()
                .iter()
                .map(|p| {
                    json!({
                        "name": p.name,
                        "isAvailable": p.is_available,
                        "rateLimitHit": p.rate_limit_hit,
                        "lastUsed": p.last_used,
                        "cooldownSecs": p.cooldown.as_secs(),
                        "cooldownRemainingSecs": p.cooldown_remaining(now).as_secs(),
                    })
                })
                .collect();
            print_json(&providers)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
