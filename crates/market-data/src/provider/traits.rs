//! Coin data source trait definition.
//!
//! This module defines the `CoinDataSource` trait that every backend
//! serving coin data implements.

use async_trait::async_trait;

use crate::errors::CoinDataError;
use crate::models::{CryptoCoin, PriceHistory};

/// Trait for coin data sources.
///
/// Implement this trait to back one or more registry providers with data.
/// Failures must be reported with structured variants: a throttled request
/// is [`CoinDataError::RateLimited`], which is what puts the provider into
/// cooldown.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use coindash_market_data::provider::CoinDataSource;
///
/// struct MySource;
///
/// #[async_trait]
/// impl CoinDataSource for MySource {
///     fn id(&self) -> &'static str {
///         "MY_SOURCE"
///     }
///
///     // ... implement trending_coins and price_history
/// }
/// ```
#[async_trait]
pub trait CoinDataSource: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &'static str;

    /// Fetch the trending coin list.
    async fn trending_coins(&self) -> Result<Vec<CryptoCoin>, CoinDataError>;

    /// Fetch the price history of one coin.
    ///
    /// # Arguments
    ///
    /// * `coin_id` - Dataset identifier of the coin (e.g., "bitcoin")
    ///
    /// # Returns
    ///
    /// The series ordered by timestamp ascending, or
    /// [`CoinDataError::CoinNotFound`] for an unknown coin.
    async fn price_history(&self, coin_id: &str) -> Result<PriceHistory, CoinDataError>;
}
