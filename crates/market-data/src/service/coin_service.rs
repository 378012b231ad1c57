//! Coin data facade.
//!
//! Exposes the dashboard's coin operations, each routed through the
//! failover executor with a data source call as the operation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::errors::CoinDataError;
use crate::failover::FailoverExecutor;
use crate::models::{CryptoCoin, PriceHistory, ProviderId};
use crate::provider::CoinDataSource;
use crate::registry::{FetchDiagnostics, ProviderRegistry};

/// Coin data operations with multi-provider failover.
pub struct CoinService {
    executor: FailoverExecutor,
    sources: HashMap<String, Arc<dyn CoinDataSource>>,
    default_source: Arc<dyn CoinDataSource>,
}

impl CoinService {
    /// Create a service where every provider is served by `source`.
    pub fn new(registry: Arc<ProviderRegistry>, source: Arc<dyn CoinDataSource>) -> Self {
        Self::with_sources(registry, HashMap::new(), source)
    }

    /// Create a service with dedicated sources for some providers.
    ///
    /// Providers missing from `sources` fall back to `default_source`.
    pub fn with_sources(
        registry: Arc<ProviderRegistry>,
        sources: HashMap<String, Arc<dyn CoinDataSource>>,
        default_source: Arc<dyn CoinDataSource>,
    ) -> Self {
        Self {
            executor: FailoverExecutor::new(registry),
            sources,
            default_source,
        }
    }

    /// Bound each provider attempt (see [`FailoverExecutor::with_attempt_timeout`]).
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.executor = self.executor.with_attempt_timeout(timeout);
        self
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        self.executor.registry()
    }

    fn source_for(&self, provider: &str) -> Arc<dyn CoinDataSource> {
        self.sources
            .get(provider)
            .unwrap_or(&self.default_source)
            .clone()
    }

    /// Fetch the trending coin list.
    pub async fn get_trending_coins(&self) -> Result<Vec<CryptoCoin>, CoinDataError> {
        self.get_trending_coins_with_diagnostics().await.0
    }

    /// Fetch the trending coin list and report which providers were tried.
    pub async fn get_trending_coins_with_diagnostics(
        &self,
    ) -> (Result<Vec<CryptoCoin>, CoinDataError>, FetchDiagnostics) {
        let (result, diagnostics) = self
            .executor
            .execute_with_diagnostics(
                |_: (), provider: ProviderId| {
                    let source = self.source_for(&provider);
                    async move {
                        debug!(
                            "Fetching trending coins with provider '{}' ({})",
                            provider,
                            source.id()
                        );
                        source.trending_coins().await
                    }
                },
                (),
            )
            .await;
        debug!("Trending coins: {}", diagnostics.summary());
        (result, diagnostics)
    }

    /// Fetch the price history of one coin.
    ///
    /// Fails with [`CoinDataError::CoinNotFound`] when no provider knows the coin.
    pub async fn get_coin_price_history(
        &self,
        coin_id: &str,
    ) -> Result<PriceHistory, CoinDataError> {
        self.executor
            .execute(
                |id: String, provider: ProviderId| {
                    let source = self.source_for(&provider);
                    async move {
                        debug!(
                            "Fetching price history for '{}' with provider '{}'",
                            id, provider
                        );
                        source.price_history(&id).await
                    }
                },
                coin_id.to_string(),
            )
            .await
    }

    /// Find a coin in the trending list.
    pub async fn get_coin_by_id(&self, coin_id: &str) -> Result<Option<CryptoCoin>, CoinDataError> {
        let coins = self.get_trending_coins().await?;
        Ok(coins.into_iter().find(|c| c.id == coin_id))
    }

    /// Put a provider into cooldown, e.g. after the caller saw a 429 elsewhere.
    pub fn mark_provider_rate_limited(&self, name: &str) {
        self.registry().mark_rate_limited(name);
    }
}
