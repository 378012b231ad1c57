use std::sync::Arc;

use coindash_market_data::{
    CoinService, MockCoinSource, MockLatency, ProviderRegistry, WalletService,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub struct Services {
    pub coins: CoinService,
    pub wallets: WalletService,
}

pub fn init_tracing() {
    let log_format = std::env::var("CD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_services(config: &Config) -> Services {
    let registry = Arc::new(ProviderRegistry::new(config.providers.clone()));
    let latency = config
        .mock_latency
        .map(MockLatency::uniform)
        .unwrap_or_default();
    let source = Arc::new(MockCoinSource::new(latency));

    let mut coins = CoinService::new(registry, source.clone());
    if let Some(timeout) = config.attempt_timeout {
        coins = coins.with_attempt_timeout(timeout);
    }

    tracing::debug!(
        "Built coin service with {} providers",
        coins.registry().len()
    );

    Services {
        coins,
        wallets: WalletService::new(source),
    }
}
