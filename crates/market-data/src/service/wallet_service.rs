//! Wallet and portfolio operations over the mock dataset.

use std::sync::Arc;

use chrono::{Duration, Utc};
use log::info;
use num_traits::FromPrimitive;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::errors::CoinDataError;
use crate::models::{
    NewWallet, PortfolioSummary, TransactionKind, TransactionStatus, Wallet, WalletAsset,
    WalletTransaction,
};
use crate::provider::mock::{coins, MockCoinSource};

/// Upper bound (exclusive) of the random balance given to a new wallet.
const NEW_WALLET_MAX_BALANCE: f64 = 10_000.0;

/// Upper bound (exclusive) of the random asset amount given to a new wallet.
const NEW_WALLET_MAX_AMOUNT: f64 = 100.0;

/// Share of the balance reported as the previous balance of a new wallet.
const NEW_WALLET_PREVIOUS_RATIO: Decimal = dec!(0.95);

pub struct WalletService {
    source: Arc<MockCoinSource>,
}

impl WalletService {
    pub fn new(source: Arc<MockCoinSource>) -> Self {
        Self { source }
    }

    /// The user's tracked wallets.
    pub async fn get_user_wallets(&self) -> Result<Vec<Wallet>, CoinDataError> {
        Ok(self.source.user_wallets().await)
    }

    /// Totals across all wallets, with the change against previous balances.
    pub async fn get_portfolio_summary(&self) -> Result<PortfolioSummary, CoinDataError> {
        self.source
            .simulate_latency(self.source.latency().portfolio_summary)
            .await;
        let wallets = self.get_user_wallets().await?;
        Ok(PortfolioSummary::from_wallets(wallets))
    }

    /// Register a wallet. Balance and holdings are generated.
    pub async fn add_wallet(&self, new_wallet: NewWallet) -> Result<Wallet, CoinDataError> {
        if new_wallet.name.trim().is_empty() {
            return Err(CoinDataError::InvalidWallet(
                "wallet name must not be empty".to_string(),
            ));
        }
        if new_wallet.address.trim().is_empty() {
            return Err(CoinDataError::InvalidWallet(
                "wallet address must not be empty".to_string(),
            ));
        }

        self.source
            .simulate_latency(self.source.latency().add_wallet)
            .await;

        let (balance, amount, coin) = {
            let mut rng = rand::thread_rng();
            let balance = decimal(rng.gen_range(0.0..NEW_WALLET_MAX_BALANCE));
            let amount = decimal(rng.gen_range(0.0..NEW_WALLET_MAX_AMOUNT));
            let coin = coins().choose(&mut rng).cloned();
            (balance, amount, coin)
        };

        let wallet = Wallet {
            id: format!("wallet-{}", Uuid::new_v4()),
            name: new_wallet.name,
            address: new_wallet.address,
            wallet_type: new_wallet.wallet_type,
            balance,
            previous_balance: Some((balance * NEW_WALLET_PREVIOUS_RATIO).round_dp(2)),
            assets: coin
                .map(|coin| WalletAsset {
                    coin,
                    amount,
                    value: balance,
                })
                .into_iter()
                .collect(),
        };

        info!("Added wallet '{}' ({})", wallet.name, wallet.id);
        Ok(wallet)
    }

    /// Recent transactions of a wallet.
    pub async fn get_wallet_transactions(
        &self,
        wallet_id: &str,
    ) -> Result<Vec<WalletTransaction>, CoinDataError> {
        self.source
            .simulate_latency(self.source.latency().transactions)
            .await;

        let now = Utc::now();
        let stamp = now.timestamp_millis();
        let tx = |n: u32, coin_id: &str, kind, amount, value, days_ago| WalletTransaction {
            id: format!("tx-{}-{}", stamp, n),
            wallet_id: wallet_id.to_string(),
            coin_id: coin_id.to_string(),
            kind,
            amount,
            value,
            timestamp: now - Duration::days(days_ago),
            status: TransactionStatus::Completed,
        };

        Ok(vec![
            tx(1, "bitcoin", TransactionKind::Buy, dec!(0.05), dec!(3062.27), 2),
            tx(2, "ethereum", TransactionKind::Buy, dec!(1.2), dec!(4226.11), 5),
            tx(3, "bitcoin", TransactionKind::Sell, dec!(0.02), dec!(1224.91), 10),
        ])
    }
}

fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO).round_dp(2)
}
