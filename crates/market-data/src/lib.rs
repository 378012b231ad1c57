//! Coindash Market Data Crate
//!
//! This crate provides the coin data layer of the Coindash portfolio
//! dashboard: coin listings, price histories and wallets, served through
//! several interchangeable data providers.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Multiple named providers in a static priority order
//! - Automatic failover to the next provider when one fails
//! - Rate-limit cooldowns that recover lazily on the next selection
//! - A mock data source with generated price histories
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   CoinService    |  (facade: trending coins, price history)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! | FailoverExecutor | --> | ProviderRegistry |  (health, cooldowns)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |  CoinDataSource  |  (mock dataset, or any other backend)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ProviderRegistry`] - Ordered providers and their health
//! - [`FailoverExecutor`] - Tries providers until one succeeds
//! - [`CoinService`] - Coin operations with failover
//! - [`WalletService`] - Wallets and the portfolio summary
//! - [`CoinDataError`] - Error type with failover classification

pub mod errors;
pub mod failover;
pub mod models;
pub mod provider;
pub mod registry;
pub mod service;

pub use errors::{CoinDataError, RetryClass};

pub use models::{
    CoinId, CryptoCoin, NewWallet, PortfolioSummary, PriceHistory, PricePoint, ProviderId,
    TransactionKind, TransactionStatus, Wallet, WalletAsset, WalletTransaction,
};

pub use provider::mock::{MockCoinSource, MockLatency};
pub use provider::CoinDataSource;

pub use failover::FailoverExecutor;
pub use registry::{
    default_providers, AttemptOutcome, FetchDiagnostics, Provider, ProviderAttempt,
    ProviderConfig, ProviderRegistry, Selection, SkipReason,
};
pub use service::{CoinService, WalletService};
