//! Per-provider health state and its static configuration.

use std::borrow::Cow;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ProviderId;

/// Default cooldown for the primary provider (60 seconds).
const PRIMARY_COOLDOWN: Duration = Duration::from_secs(60);

/// Static description of a provider, used to build the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,

    /// How long the provider is skipped after a rate-limit signal, in milliseconds.
    pub cooldown_ms: u64,

    /// Administrative switch. Disabled providers are never tried while any
    /// enabled provider is healthy.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>, cooldown: Duration) -> Self {
        Self {
            name: name.into(),
            cooldown_ms: cooldown.as_millis() as u64,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// The built-in provider list, highest priority first.
pub fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new("primary-mock", PRIMARY_COOLDOWN),
        ProviderConfig::new("coingecko", PRIMARY_COOLDOWN * 5),
        ProviderConfig::new("cryptocompare", PRIMARY_COOLDOWN * 10),
        ProviderConfig::new("coinmarketcap", PRIMARY_COOLDOWN * 15),
    ]
}

/// Health state of a single provider.
///
/// Instances handed out by the registry are snapshots; the registry keeps
/// the authoritative copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provider {
    pub name: ProviderId,
    pub is_available: bool,
    pub rate_limit_hit: bool,
    /// Time of the last attempt or rate-limit mark. `None` until first use.
    pub last_used: Option<DateTime<Utc>>,
    /// Start of the current cooldown. Attempts made while cooling down do
    /// not move it.
    pub rate_limited_at: Option<DateTime<Utc>>,
    pub cooldown: Duration,
}

impl Provider {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            name: Cow::Owned(config.name.clone()),
            is_available: config.enabled,
            rate_limit_hit: false,
            last_used: None,
            rate_limited_at: None,
            cooldown: config.cooldown(),
        }
    }

    /// Whether the cooldown started at `rate_limited_at` is over at `now`.
    ///
    /// A provider flagged without a timestamp is treated as recovered. A
    /// timestamp in the future (clock moved backwards) is not.
    pub fn cooldown_elapsed(&self, now: DateTime<Utc>) -> bool {
        match self.rate_limited_at {
            None => true,
            Some(last_used) => (now - last_used)
                .to_std()
                .map(|elapsed| elapsed >= self.cooldown)
                .unwrap_or(false),
        }
    }

    /// Time left before the cooldown is over, zero if it already is.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.rate_limited_at {
            None => Duration::ZERO,
            Some(last_used) => {
                let elapsed = (now - last_used).to_std().unwrap_or(Duration::ZERO);
                self.cooldown.saturating_sub(elapsed)
            }
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.is_available && !self.rate_limit_hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn provider(cooldown_secs: u64) -> Provider {
        Provider::from_config(&ProviderConfig::new(
            "coingecko",
            Duration::from_secs(cooldown_secs),
        ))
    }

    #[test]
    fn test_default_providers_order_and_cooldowns() {
        let providers = default_providers();
        let names: Vec<_> = providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["primary-mock", "coingecko", "cryptocompare", "coinmarketcap"]
        );
        assert_eq!(providers[0].cooldown_ms, 60_000);
        assert_eq!(providers[1].cooldown_ms, 300_000);
        assert_eq!(providers[2].cooldown_ms, 600_000);
        assert_eq!(providers[3].cooldown_ms, 900_000);
        assert!(providers.iter().all(|p| p.enabled));
    }

    #[test]
    fn test_cooldown_boundary() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut p = provider(60);
        p.rate_limit_hit = true;
        p.rate_limited_at = Some(t0);

        assert!(!p.cooldown_elapsed(t0 + chrono::Duration::seconds(59)));
        assert!(p.cooldown_elapsed(t0 + chrono::Duration::seconds(60)));
        assert_eq!(
            p.cooldown_remaining(t0 + chrono::Duration::seconds(45)),
            Duration::from_secs(15)
        );
        assert_eq!(
            p.cooldown_remaining(t0 + chrono::Duration::seconds(90)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_future_timestamp_is_not_elapsed() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut p = provider(60);
        p.rate_limited_at = Some(t0);
        assert!(!p.cooldown_elapsed(t0 - chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_cooldown_ignores_later_attempts() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut p = provider(60);
        p.rate_limit_hit = true;
        p.rate_limited_at = Some(t0);
        p.last_used = Some(t0 + chrono::Duration::seconds(50));

        assert!(p.cooldown_elapsed(t0 + chrono::Duration::seconds(60)));
    }

    #[test]
    fn test_config_enabled_defaults_to_true() {
        let config: ProviderConfig =
            serde_json::from_str(r#"{"name":"coingecko","cooldown_ms":1000}"#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.cooldown(), Duration::from_secs(1));
    }
}
