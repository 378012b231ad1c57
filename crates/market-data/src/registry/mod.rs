//! Provider registry module.
//!
//! This module tracks coin data providers, including:
//! - Provider registration and static priority ordering
//! - Rate-limit cooldowns with lazy recovery
//! - Selection diagnostics for debugging failover passes

mod provider;
mod provider_registry;
mod skip_reason;

pub use provider::{default_providers, Provider, ProviderConfig};
pub use provider_registry::{ProviderRegistry, Selection};
pub use skip_reason::{AttemptOutcome, FetchDiagnostics, ProviderAttempt, SkipReason};
