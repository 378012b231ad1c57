//! Failover scenarios with a distinct fake source per provider.
//!
//! The mock dataset is shared by every provider, so these tests wire each
//! provider to its own source to make failover outcomes observable.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use coindash_market_data::{
    CoinDataError, CoinDataSource, CoinService, CryptoCoin, PriceHistory, ProviderConfig,
    ProviderRegistry,
};
use rust_decimal_macros::dec;

// =============================================================================
// Fakes
// =============================================================================

#[derive(Clone)]
enum Behavior {
    Serve(&'static str),
    RateLimit,
    Fail(&'static str),
}

struct FakeSource {
    name: &'static str,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeSource {
    fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name,
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond<T>(&self, value: impl FnOnce(&'static str) -> T) -> Result<T, CoinDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Serve(tag) => Ok(value(*tag)),
            Behavior::RateLimit => Err(CoinDataError::RateLimited {
                provider: self.name.to_string(),
            }),
            Behavior::Fail(message) => Err(CoinDataError::ProviderError {
                provider: self.name.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

fn tagged_coin(tag: &str) -> CryptoCoin {
    CryptoCoin {
        id: tag.to_string(),
        symbol: tag.to_string(),
        name: tag.to_string(),
        image: String::new(),
        current_price: dec!(1),
        price_change_percentage_24h: dec!(0),
        market_cap: dec!(1),
        total_volume: dec!(1),
    }
}

#[async_trait]
impl CoinDataSource for FakeSource {
    fn id(&self) -> &'static str {
        self.name
    }

    async fn trending_coins(&self) -> Result<Vec<CryptoCoin>, CoinDataError> {
        self.respond(|tag| vec![tagged_coin(tag)])
    }

    async fn price_history(&self, coin_id: &str) -> Result<PriceHistory, CoinDataError> {
        if coin_id == "nonexistent-coin" {
            self.calls.fetch_add(1, Ordering::SeqCst);
            return Err(CoinDataError::CoinNotFound(coin_id.to_string()));
        }
        self.respond(|_| PriceHistory::default())
    }
}

struct Setup {
    service: CoinService,
    sources: Vec<Arc<FakeSource>>,
}

fn setup(providers: &[(&'static str, u64, Behavior)]) -> Setup {
    let registry = Arc::new(ProviderRegistry::new(
        providers
            .iter()
            .map(|(name, secs, _)| ProviderConfig::new(*name, Duration::from_secs(*secs)))
            .collect(),
    ));

    let sources: Vec<Arc<FakeSource>> = providers
        .iter()
        .map(|(name, _, behavior)| FakeSource::new(*name, behavior.clone()))
        .collect();

    let by_name: HashMap<String, Arc<dyn CoinDataSource>> = sources
        .iter()
        .map(|s| (s.name.to_string(), s.clone() as Arc<dyn CoinDataSource>))
        .collect();

    let unused = FakeSource::new("unused", Behavior::Fail("default source must not be used"));
    let service = CoinService::with_sources(registry, by_name, unused);

    Setup { service, sources }
}

fn first_id(coins: &[CryptoCoin]) -> &str {
    &coins[0].id
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn rate_limited_primary_fails_over_to_secondary() {
    let s = setup(&[
        ("A", 60, Behavior::RateLimit),
        ("B", 300, Behavior::Serve("from-b")),
    ]);

    let coins = s.service.get_trending_coins().await.unwrap();
    assert_eq!(first_id(&coins), "from-b");

    let registry = s.service.registry();
    assert!(registry.get("A").unwrap().rate_limit_hit);
    assert!(!registry.get("B").unwrap().rate_limit_hit);
}

#[tokio::test]
async fn n_minus_one_rate_limits_then_success() {
    let s = setup(&[
        ("P1", 60, Behavior::RateLimit),
        ("P2", 60, Behavior::RateLimit),
        ("P3", 60, Behavior::RateLimit),
        ("P4", 60, Behavior::Serve("from-p4")),
    ]);

    let coins = s.service.get_trending_coins().await.unwrap();
    assert_eq!(first_id(&coins), "from-p4");

    let marked = s
        .service
        .registry()
        .providers()
        .iter()
        .filter(|p| p.rate_limit_hit)
        .count();
    assert_eq!(marked, 3);
    assert!(s.sources.iter().all(|src| src.calls() == 1));
}

#[tokio::test]
async fn all_failing_surfaces_last_providers_error() {
    let s = setup(&[
        ("A", 60, Behavior::Fail("first")),
        ("B", 60, Behavior::RateLimit),
        ("C", 60, Behavior::Fail("last")),
    ]);

    let err = s.service.get_trending_coins().await.unwrap_err();
    assert_eq!(
        err,
        CoinDataError::ProviderError {
            provider: "C".to_string(),
            message: "last".to_string(),
        }
    );
}

#[tokio::test]
async fn cooled_down_provider_is_not_called_again() {
    let s = setup(&[
        ("A", 3600, Behavior::RateLimit),
        ("B", 3600, Behavior::Serve("from-b")),
    ]);

    s.service.get_trending_coins().await.unwrap();
    s.service.get_trending_coins().await.unwrap();

    assert_eq!(s.sources[0].calls(), 1);
    assert_eq!(s.sources[1].calls(), 2);
}

#[tokio::test]
async fn transient_failure_leaves_provider_eligible() {
    let s = setup(&[
        ("A", 60, Behavior::Fail("502 bad gateway")),
        ("B", 60, Behavior::Serve("from-b")),
    ]);

    s.service.get_trending_coins().await.unwrap();
    s.service.get_trending_coins().await.unwrap();

    assert_eq!(s.sources[0].calls(), 2);
    assert!(!s.service.registry().get("A").unwrap().rate_limit_hit);
}

#[tokio::test]
async fn unknown_coin_is_not_found_on_every_provider() {
    let s = setup(&[
        ("A", 60, Behavior::Serve("a")),
        ("B", 60, Behavior::Serve("b")),
    ]);

    let err = s
        .service
        .get_coin_price_history("nonexistent-coin")
        .await
        .unwrap_err();

    assert_eq!(err, CoinDataError::CoinNotFound("nonexistent-coin".to_string()));
    assert!(s.sources.iter().all(|src| src.calls() == 1));
    assert!(s
        .service
        .registry()
        .providers()
        .iter()
        .all(|p| !p.rate_limit_hit));
}

#[tokio::test]
async fn every_provider_cooling_down_still_tries_the_first() {
    let s = setup(&[
        ("A", 3600, Behavior::Serve("from-a")),
        ("B", 3600, Behavior::Serve("from-b")),
    ]);
    s.service.mark_provider_rate_limited("A");
    s.service.mark_provider_rate_limited("B");

    let coins = s.service.get_trending_coins().await.unwrap();
    assert_eq!(first_id(&coins), "from-a");
}

#[tokio::test]
async fn shared_mock_source_serves_real_dataset() {
    let service = CoinService::new(
        Arc::new(ProviderRegistry::with_defaults()),
        Arc::new(coindash_market_data::MockCoinSource::with_seed(
            coindash_market_data::MockLatency::NONE,
            2024,
        )),
    );

    let history = service.get_coin_price_history("bitcoin").await.unwrap();
    assert_eq!(history.len(), 168);
    assert!(history.latest_price().is_some());
}
