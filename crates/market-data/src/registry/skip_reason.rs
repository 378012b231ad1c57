//! Skip reason tracking for provider selection diagnostics.

use std::time::Duration;

use crate::models::ProviderId;

/// Why a provider was left out of a failover pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Provider is administratively disabled.
    Disabled,

    /// Provider hit a rate limit and its cooldown has not elapsed yet.
    CoolingDown { remaining: Duration },
}

/// What happened to one provider during a failover pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    Skipped(SkipReason),
    Failed(String),
    Served,
}

/// One provider's entry in a failover pass.
#[derive(Clone, Debug)]
pub struct ProviderAttempt {
    pub provider_id: ProviderId,
    pub outcome: AttemptOutcome,
}

/// Per-provider trail of a failover pass, in the order providers were visited.
#[derive(Clone, Debug, Default)]
pub struct FetchDiagnostics {
    pub attempts: Vec<ProviderAttempt>,
    /// Every provider was unhealthy and the first declared one was tried anyway.
    pub used_fallback: bool,
}

impl FetchDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, provider_id: ProviderId, outcome: AttemptOutcome) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            outcome,
        });
    }

    pub fn record_skip(&mut self, provider_id: ProviderId, reason: SkipReason) {
        self.push(provider_id, AttemptOutcome::Skipped(reason));
    }

    pub fn record_error(&mut self, provider_id: ProviderId, error: String) {
        self.push(provider_id, AttemptOutcome::Failed(error));
    }

    pub fn record_success(&mut self, provider_id: ProviderId) {
        self.push(provider_id, AttemptOutcome::Served);
    }

    /// One-line trail such as `a: skipped (disabled) -> b: served`.
    pub fn summary(&self) -> String {
        let trail: Vec<String> = self
            .attempts
            .iter()
            .map(|a| match &a.outcome {
                AttemptOutcome::Skipped(SkipReason::Disabled) => {
                    format!("{}: skipped (disabled)", a.provider_id)
                }
                AttemptOutcome::Skipped(SkipReason::CoolingDown { remaining }) => {
                    format!(
                        "{}: skipped (cooling down, {}s left)",
                        a.provider_id,
                        remaining.as_secs()
                    )
                }
                AttemptOutcome::Failed(err) => format!("{}: failed ({})", a.provider_id, err),
                AttemptOutcome::Served => format!("{}: served", a.provider_id),
            })
            .collect();

        let prefix = if self.used_fallback { "[fallback] " } else { "" };
        format!("{}{}", prefix, trail.join(" -> "))
    }

    pub fn has_success(&self) -> bool {
        self.attempts
            .iter()
            .any(|a| a.outcome == AttemptOutcome::Served)
    }

    /// Providers that were actually called, in order.
    pub fn attempted(&self) -> Vec<&ProviderId> {
        self.attempts
            .iter()
            .filter(|a| !matches!(a.outcome, AttemptOutcome::Skipped(_)))
            .map(|a| &a.provider_id)
            .collect()
    }

    pub fn skip_reasons(&self) -> Vec<(&ProviderId, &SkipReason)> {
        self.attempts
            .iter()
            .filter_map(|a| match &a.outcome {
                AttemptOutcome::Skipped(reason) => Some((&a.provider_id, reason)),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<(&ProviderId, &str)> {
        self.attempts
            .iter()
            .filter_map(|a| match &a.outcome {
                AttemptOutcome::Failed(err) => Some((&a.provider_id, err.as_str())),
                _ => None,
            })
            .collect()
    }
}
