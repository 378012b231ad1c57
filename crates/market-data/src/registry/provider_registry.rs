//! Provider registry tracking coin data provider health.
//!
//! The registry owns the ordered provider list and handles:
//! - Static priority ordering (earlier-declared providers are preferred)
//! - Rate-limit cooldowns with lazy recovery (no background timer)
//! - The first-provider fallback when every provider is unhealthy
//!
//! Callers receive snapshots; all mutation goes through the registry.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::provider::{default_providers, Provider, ProviderConfig};
use super::skip_reason::SkipReason;

/// Outcome of a selection pass over the registry.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    /// Providers to try, in priority order.
    pub candidates: Vec<Provider>,
    /// Providers left out of the pass and why.
    pub skipped: Vec<(Provider, SkipReason)>,
    /// No provider was healthy and the first declared one was returned anyway.
    pub used_fallback: bool,
}

/// Registry of coin data providers and their health.
pub struct ProviderRegistry {
    providers: Mutex<Vec<Provider>>,
}

impl ProviderRegistry {
    /// Create a registry from provider configurations, keeping their order.
    pub fn new(configs: Vec<ProviderConfig>) -> Self {
        let providers = configs.iter().map(Provider::from_config).collect();
        Self {
            providers: Mutex::new(providers),
        }
    }

    /// Create a registry with the built-in provider list.
    pub fn with_defaults() -> Self {
        Self::new(default_providers())
    }

    /// Lock the provider list, recovering from poison if necessary.
    ///
    /// Every update is a whole-field assignment, so a poisoned list is still
    /// consistent.
    fn lock_providers(&self) -> MutexGuard<'_, Vec<Provider>> {
        self.providers.lock().unwrap_or_else(|poisoned| {
            warn!("Provider registry mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Clear `rate_limit_hit` on every provider whose cooldown is over at `now`.
    fn recover_cooled_down(providers: &mut [Provider], now: DateTime<Utc>) {
        for provider in providers.iter_mut() {
            if provider.rate_limit_hit && provider.cooldown_elapsed(now) {
                provider.rate_limit_hit = false;
                provider.rate_limited_at = None;
                info!(
                    "Provider '{}' cooldown complete, available again",
                    provider.name
                );
            }
        }
    }

    /// Run a selection pass at `now`.
    ///
    /// Recovers cooled-down providers, then splits the list into healthy
    /// candidates and skipped providers. If nothing is healthy, the first
    /// declared provider becomes the only candidate regardless of its status.
    pub fn select_at(&self, now: DateTime<Utc>) -> Selection {
        let mut providers = self.lock_providers();
        Self::recover_cooled_down(&mut providers, now);

        let mut selection = Selection::default();
        for provider in providers.iter() {
            match Self::skip_reason(provider, now) {
                None => selection.candidates.push(provider.clone()),
                Some(reason) => selection.skipped.push((provider.clone(), reason)),
            }
        }

        if selection.candidates.is_empty() {
            if let Some(first) = providers.first() {
                warn!(
                    "All API providers are rate-limited or disabled. Using '{}' regardless of status.",
                    first.name
                );
                selection.skipped.retain(|(p, _)| p.name != first.name);
                selection.candidates.push(first.clone());
                selection.used_fallback = true;
            }
        }

        selection
    }

    fn skip_reason(provider: &Provider, now: DateTime<Utc>) -> Option<SkipReason> {
        if !provider.is_available {
            Some(SkipReason::Disabled)
        } else if provider.rate_limit_hit {
            Some(SkipReason::CoolingDown {
                remaining: provider.cooldown_remaining(now),
            })
        } else {
            None
        }
    }

    /// Why `name` should be skipped at `now`, or `None` if it is healthy.
    ///
    /// Reads the live state, so marks made after a selection pass are seen.
    /// Unknown names are reported healthy.
    pub fn skip_reason_at(&self, name: &str, now: DateTime<Utc>) -> Option<SkipReason> {
        self.lock_providers()
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| Self::skip_reason(p, now))
    }

    /// Healthy providers at `now`, in priority order.
    ///
    /// Never empty unless the registry itself is empty.
    pub fn list_healthy_at(&self, now: DateTime<Utc>) -> Vec<Provider> {
        self.select_at(now).candidates
    }

    /// Healthy providers right now, in priority order.
    pub fn list_healthy(&self) -> Vec<Provider> {
        self.list_healthy_at(Utc::now())
    }

    /// Pick the single best provider at `now` and stamp its `last_used`.
    pub fn next_available_at(&self, now: DateTime<Utc>) -> Option<Provider> {
        let first = self.list_healthy_at(now).into_iter().next()?;
        self.touch_at(&first.name, now);
        self.get(&first.name)
    }

    /// Pick the single best provider right now and stamp its `last_used`.
    pub fn next_available(&self) -> Option<Provider> {
        self.next_available_at(Utc::now())
    }

    /// Put a provider into cooldown starting at `now`.
    ///
    /// Unknown names are ignored. Marking again restarts the cooldown at `now`.
    pub fn mark_rate_limited_at(&self, name: &str, now: DateTime<Utc>) {
        let mut providers = self.lock_providers();
        match providers.iter_mut().find(|p| p.name == name) {
            Some(provider) => {
                provider.rate_limit_hit = true;
                provider.rate_limited_at = Some(now);
                provider.last_used = Some(now);
                warn!(
                    "Provider '{}' marked as rate-limited, cooling down for {} seconds",
                    name,
                    provider.cooldown.as_secs()
                );
            }
            None => debug!("Ignoring rate-limit mark for unknown provider '{}'", name),
        }
    }

    /// Put a provider into cooldown starting now.
    pub fn mark_rate_limited(&self, name: &str) {
        self.mark_rate_limited_at(name, Utc::now());
    }

    /// Record an attempt against a provider at `now`.
    ///
    /// Only `last_used` moves; a running cooldown keeps its start.
    pub fn touch_at(&self, name: &str, now: DateTime<Utc>) {
        let mut providers = self.lock_providers();
        if let Some(provider) = providers.iter_mut().find(|p| p.name == name) {
            provider.last_used = Some(now);
        }
    }

    /// Record an attempt against a provider now.
    pub fn touch(&self, name: &str) {
        self.touch_at(name, Utc::now());
    }

    /// Snapshot of one provider.
    pub fn get(&self, name: &str) -> Option<Provider> {
        self.lock_providers()
            .iter()
            .find(|p| p.name == name)
            .cloned()
    }

    /// Snapshot of every provider in priority order.
    pub fn providers(&self) -> Vec<Provider> {
        self.lock_providers().clone()
    }

    pub fn len(&self) -> usize {
        self.lock_providers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_providers().is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
