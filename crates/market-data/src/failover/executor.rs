//! Failover executor running an operation against providers in priority order.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};

use crate::errors::{CoinDataError, RetryClass};
use crate::models::ProviderId;
use crate::registry::{FetchDiagnostics, ProviderRegistry};

/// Runs a parameterized async operation against the registry's providers
/// until one succeeds.
///
/// The executor never replaces registry entries; it only stamps `last_used`
/// on each attempt and puts providers into cooldown when they report
/// [`CoinDataError::RateLimited`].
pub struct FailoverExecutor {
    registry: Arc<ProviderRegistry>,
    attempt_timeout: Option<Duration>,
}

impl FailoverExecutor {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            attempt_timeout: None,
        }
    }

    /// Bound every single provider attempt. An attempt that runs longer fails
    /// with [`CoinDataError::Timeout`] and the next provider is tried.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Execute `operation` with failover.
    ///
    /// Returns the first successful result. When every candidate fails, the
    /// error of the last provider attempted is returned unchanged; with no
    /// candidate at all the result is [`CoinDataError::AllProvidersFailed`].
    pub async fn execute<T, P, F, Fut>(&self, operation: F, param: P) -> Result<T, CoinDataError>
    where
        P: Clone,
        F: Fn(P, ProviderId) -> Fut,
        Fut: Future<Output = Result<T, CoinDataError>>,
    {
        let (result, diagnostics) = self.execute_with_diagnostics(operation, param).await;
        debug!("Failover pass: {}", diagnostics.summary());
        result
    }

    /// Execute `operation` with failover and report what happened to each provider.
    ///
    /// Steps:
    /// 1. Snapshot the candidates (cooled-down providers recover here)
    /// 2. For each candidate in order, re-check its live health, stamp
    ///    `last_used` and call the operation
    /// 3. Return on the first success, so one provider serves a successful call
    /// 4. On failure, cool the provider down if it rate limited us, then move on
    pub async fn execute_with_diagnostics<T, P, F, Fut>(
        &self,
        operation: F,
        param: P,
    ) -> (Result<T, CoinDataError>, FetchDiagnostics)
    where
        P: Clone,
        F: Fn(P, ProviderId) -> Fut,
        Fut: Future<Output = Result<T, CoinDataError>>,
    {
        // Snapshot so marks made during the loop don't reorder it.
        let selection = self.registry.select_at(Utc::now());

        let used_fallback = selection.used_fallback;
        let mut diagnostics = FetchDiagnostics::new();
        diagnostics.used_fallback = used_fallback;
        for (provider, reason) in selection.skipped {
            debug!("Skipping provider '{}': {:?}", provider.name, reason);
            diagnostics.record_skip(provider.name, reason);
        }

        let mut last_error: Option<CoinDataError> = None;

        for provider in selection.candidates {
            let provider_id = provider.name;

            // A concurrent call may have marked this provider since the snapshot.
            if !used_fallback {
                if let Some(reason) = self.registry.skip_reason_at(&provider_id, Utc::now()) {
                    debug!(
                        "Provider '{}' became unhealthy during the pass: {:?}",
                        provider_id, reason
                    );
                    diagnostics.record_skip(provider_id, reason);
                    continue;
                }
            }

            debug!("Trying API provider '{}'", provider_id);
            self.registry.touch(&provider_id);

            match self
                .attempt(&operation, param.clone(), provider_id.clone())
                .await
            {
                Ok(value) => {
                    info!("Provider '{}' served the request", provider_id);
                    diagnostics.record_success(provider_id);
                    return (Ok(value), diagnostics);
                }
                Err(e) => {
                    match e.retry_class() {
                        RetryClass::FailoverWithPenalty => {
                            self.registry.mark_rate_limited(&provider_id);
                        }
                        RetryClass::NextProvider => {
                            warn!(
                                "Provider '{}' failed with {}, trying next provider",
                                provider_id, e
                            );
                        }
                    }

                    diagnostics.record_error(provider_id, e.to_string());
                    last_error = Some(e);
                }
            }
        }

        let error = last_error.unwrap_or_else(|| {
            warn!("No API provider could be tried");
            CoinDataError::AllProvidersFailed
        });
        (Err(error), diagnostics)
    }

    async fn attempt<T, P, F, Fut>(
        &self,
        operation: &F,
        param: P,
        provider_id: ProviderId,
    ) -> Result<T, CoinDataError>
    where
        F: Fn(P, ProviderId) -> Fut,
        Fut: Future<Output = Result<T, CoinDataError>>,
    {
        let call = operation(param, provider_id.clone());

        match self.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                Err(CoinDataError::Timeout {
                    provider: provider_id.to_string(),
                })
            }),
            None => call.await,
        }
    }
}
