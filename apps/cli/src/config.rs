use std::time::Duration;

use anyhow::{anyhow, Context};
use coindash_market_data::{default_providers, ProviderConfig};

pub struct Config {
    pub providers: Vec<ProviderConfig>,
    /// Overrides every mock delay when set.
    pub mock_latency: Option<Duration>,
    pub attempt_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let providers = match var("CD_PROVIDERS") {
            Some(list) if !list.trim().is_empty() => parse_providers(&list)?,
            _ => default_providers(),
        };

        let mock_latency = match var("CD_MOCK_LATENCY_MS") {
            Some(v) => {
                let ms: u64 = v.trim().parse().context("Invalid CD_MOCK_LATENCY_MS")?;
                Some(Duration::from_millis(ms))
            }
            None => None,
        };

        let attempt_timeout = match var("CD_ATTEMPT_TIMEOUT_MS") {
            Some(v) => {
                let ms: u64 = v.trim().parse().context("Invalid CD_ATTEMPT_TIMEOUT_MS")?;
                Some(Duration::from_millis(ms))
            }
            None => None,
        };

        Ok(Self {
            providers,
            mock_latency,
            attempt_timeout,
        })
    }
}

/// Parse `name:cooldown_secs` pairs separated by commas.
fn parse_providers(list: &str) -> anyhow::Result<Vec<ProviderConfig>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (name, secs) = entry
                .split_once(':')
                .ok_or_else(|| anyhow!("Invalid CD_PROVIDERS entry '{}', expected name:cooldown_secs", entry))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(anyhow!("Invalid CD_PROVIDERS entry '{}', empty name", entry));
            }
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid cooldown in CD_PROVIDERS entry '{}'", entry))?;
            Ok(ProviderConfig::new(name, Duration::from_secs(secs)))
        })
        .collect()
}
