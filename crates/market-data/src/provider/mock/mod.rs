//! Mock coin data source.
//!
//! Serves a canned coin list and random-walk price histories after an
//! artificial latency, standing in for a real market data API. Every
//! registry provider shares this source unless the coin service is given
//! a dedicated one.

mod dataset;
mod price_walk;

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::errors::CoinDataError;
use crate::models::{CryptoCoin, PriceHistory, Wallet};
use crate::provider::CoinDataSource;

pub use dataset::{coins, find_coin, volatility, wallets};
pub use price_walk::{generate as generate_price_history, PRICE_POINTS};

/// Artificial delay of each mock operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockLatency {
    pub trending: Duration,
    pub price_history: Duration,
    pub wallets: Duration,
    /// Paid before the wallet fetch the summary is built from.
    pub portfolio_summary: Duration,
    pub add_wallet: Duration,
    pub transactions: Duration,
}

impl MockLatency {
    pub const NONE: Self = Self::uniform(Duration::ZERO);

    /// The same delay for every operation.
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            trending: delay,
            price_history: delay,
            wallets: delay,
            portfolio_summary: delay,
            add_wallet: delay,
            transactions: delay,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            trending: Duration::from_millis(500),
            price_history: Duration::from_millis(700),
            wallets: Duration::from_millis(800),
            portfolio_summary: Duration::from_millis(600),
            add_wallet: Duration::from_millis(1000),
            transactions: Duration::from_millis(500),
        }
    }
}

/// Coin data source backed by the canned dataset.
pub struct MockCoinSource {
    latency: MockLatency,
    rng: Mutex<StdRng>,
}

impl MockCoinSource {
    /// Create a source with the given latencies and an entropy-seeded RNG.
    pub fn new(latency: MockLatency) -> Self {
        Self {
            latency,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a source whose price histories are reproducible.
    pub fn with_seed(latency: MockLatency, seed: u64) -> Self {
        Self {
            latency,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Lock the RNG, recovering from poison if necessary.
    fn lock_rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| {
            warn!("Mock source RNG mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn latency(&self) -> &MockLatency {
        &self.latency
    }

    pub(crate) async fn simulate_latency(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// The user's wallets, after the artificial latency.
    pub async fn user_wallets(&self) -> Vec<Wallet> {
        self.simulate_latency(self.latency.wallets).await;
        wallets()
    }
}

impl Default for MockCoinSource {
    fn default() -> Self {
        Self::new(MockLatency::default())
    }
}

#[async_trait]
impl CoinDataSource for MockCoinSource {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn trending_coins(&self) -> Result<Vec<CryptoCoin>, CoinDataError> {
        self.simulate_latency(self.latency.trending).await;
        Ok(coins())
    }

    async fn price_history(&self, coin_id: &str) -> Result<PriceHistory, CoinDataError> {
        self.simulate_latency(self.latency.price_history).await;

        let coin =
            find_coin(coin_id).ok_or_else(|| CoinDataError::CoinNotFound(coin_id.to_string()))?;
        let volatility = volatility(coin_id);
        debug!(
            "Generating price history for '{}' (volatility {})",
            coin_id, volatility
        );

        let history = {
            let mut rng = self.lock_rng();
            generate_price_history(coin.current_price, volatility, Utc::now(), &mut *rng)
        };
        Ok(history)
    }
}
