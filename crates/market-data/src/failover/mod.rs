//! Failover across coin data providers.
//!
//! The executor walks the registry's healthy providers in priority order and
//! stops at the first success. Provider health changes it causes (cooldowns,
//! `last_used` stamps) are written back to the shared registry so later calls
//! skip known-bad providers without a separate health check.

mod executor;

pub use executor::FailoverExecutor;
