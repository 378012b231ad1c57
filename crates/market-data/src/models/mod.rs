//! Coin data models
//!
//! This module contains the core data types for coin data operations:
//! - `types` - Type aliases for common identifiers (ProviderId, CoinId)
//! - `coin` - Listed coins (CryptoCoin)
//! - `price_history` - Generated price/market-cap/volume series (PriceHistory, PricePoint)
//! - `portfolio` - Wallets, holdings, transactions and the portfolio summary

mod coin;
mod portfolio;
mod price_history;
mod types;

pub use coin::CryptoCoin;
pub use portfolio::{
    NewWallet, PortfolioSummary, TransactionKind, TransactionStatus, Wallet, WalletAsset,
    WalletTransaction,
};
pub use price_history::{PriceHistory, PricePoint};
pub use types::{CoinId, ProviderId};
