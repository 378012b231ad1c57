//! Property-based tests for the provider registry.
//!
//! These tests verify the registry's selection and cooldown invariants
//! across generated provider lists and mark sequences, using `proptest`.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use coindash_market_data::{ProviderConfig, ProviderRegistry};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Generates 1..8 providers with distinct names, cooldowns of 1s..1h,
/// and a random enabled flag.
fn arb_configs() -> impl Strategy<Value = Vec<ProviderConfig>> {
    prop::collection::vec((1u64..3_600, any::<bool>()), 1..8).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (secs, enabled))| {
                let config = ProviderConfig::new(format!("p{}", i), Duration::from_secs(secs));
                if enabled {
                    config
                } else {
                    config.disabled()
                }
            })
            .collect()
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Whatever is marked, a non-empty registry always yields a candidate.
    #[test]
    fn list_healthy_never_empty(
        configs in arb_configs(),
        marks in prop::collection::vec(0usize..8, 0..16),
        offset_secs in 0i64..7_200,
    ) {
        let registry = ProviderRegistry::new(configs.clone());
        for idx in marks {
            if let Some(config) = configs.get(idx) {
                registry.mark_rate_limited_at(&config.name, base_time());
            }
        }

        let healthy = registry.list_healthy_at(base_time() + chrono::Duration::seconds(offset_secs));
        prop_assert!(!healthy.is_empty());
    }

    /// A provider marked at T is eligible from T + cooldown on, and not before.
    #[test]
    fn cooldown_boundary(cooldown_secs in 1u64..3_600, probe_secs in 0u64..7_200) {
        let registry = ProviderRegistry::new(vec![
            ProviderConfig::new("marked", Duration::from_secs(cooldown_secs)),
            ProviderConfig::new("other", Duration::from_secs(60)),
        ]);
        registry.mark_rate_limited_at("marked", base_time());

        let probe = base_time() + chrono::Duration::seconds(probe_secs as i64);
        let eligible = registry
            .list_healthy_at(probe)
            .iter()
            .any(|p| p.name == "marked");

        prop_assert_eq!(eligible, probe_secs >= cooldown_secs);
    }

    /// Healthy providers keep their declaration order.
    #[test]
    fn healthy_order_follows_declaration(
        configs in arb_configs(),
        marks in prop::collection::vec(0usize..8, 0..8),
    ) {
        let registry = ProviderRegistry::new(configs.clone());
        for idx in marks {
            if let Some(config) = configs.get(idx) {
                registry.mark_rate_limited_at(&config.name, base_time());
            }
        }

        let positions: Vec<usize> = registry
            .list_healthy_at(base_time())
            .iter()
            .filter_map(|p| configs.iter().position(|c| p.name == c.name.as_str()))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Marking twice leaves the same state as marking once at the later time.
    #[test]
    fn marking_is_idempotent(first_secs in 0i64..1_000, gap_secs in 0i64..1_000) {
        let first = base_time() + chrono::Duration::seconds(first_secs);
        let second = first + chrono::Duration::seconds(gap_secs);

        let once = ProviderRegistry::with_defaults();
        once.mark_rate_limited_at("coingecko", second);

        let twice = ProviderRegistry::with_defaults();
        twice.mark_rate_limited_at("coingecko", first);
        twice.mark_rate_limited_at("coingecko", second);

        prop_assert_eq!(once.providers(), twice.providers());
    }
}
