//! Wallet and portfolio models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::coin::CryptoCoin;
use super::types::CoinId;

/// A holding of a single coin inside a wallet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletAsset {
    pub coin: CryptoCoin,
    pub amount: Decimal,
    pub value: Decimal,
}

/// A tracked wallet (on-chain address or manual portfolio).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub address: String,

    /// Chain or kind: "ETH", "BTC", "BSC", "SOL", "Manual", ...
    #[serde(rename = "type")]
    pub wallet_type: String,

    pub balance: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_balance: Option<Decimal>,

    pub assets: Vec<WalletAsset>,
}

/// User input for adding a wallet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewWallet {
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub wallet_type: String,
}

/// Aggregate value of all wallets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub previous_value: Decimal,
    pub change_percentage: Decimal,
    pub wallets: Vec<Wallet>,
}

impl PortfolioSummary {
    /// Summarize wallets. Wallets without a previous balance count as zero
    /// toward `previous_value`; a zero previous value yields a zero change.
    pub fn from_wallets(wallets: Vec<Wallet>) -> Self {
        let total_value: Decimal = wallets.iter().map(|w| w.balance).sum();
        let previous_value: Decimal = wallets
            .iter()
            .map(|w| w.previous_balance.unwrap_or(Decimal::ZERO))
            .sum();

        let change_percentage = if previous_value.is_zero() {
            Decimal::ZERO
        } else {
            (total_value - previous_value) / previous_value * Decimal::ONE_HUNDRED
        };

        Self {
            total_value,
            previous_value,
            change_percentage,
            wallets,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Buy,
    Sell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

/// A buy or sell recorded against a wallet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: String,
    pub wallet_id: String,
    pub coin_id: CoinId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub value: Decimal,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
}
