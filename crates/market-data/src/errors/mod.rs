//! Error types and failover classification for the coin data crate.
//!
//! This module provides:
//! - [`CoinDataError`]: The main error enum for all coin data operations
//! - [`RetryClass`]: Classification for deciding how a failed provider is treated

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during coin data operations.
///
/// Each variant is classified into a [`RetryClass`] via the [`retry_class`](Self::retry_class)
/// method, which determines how the failover executor treats the provider that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinDataError {
    /// The requested coin is not part of the dataset.
    /// Every provider shares the same dataset, so no provider can resolve it.
    #[error("Coin with ID {0} not found")]
    CoinNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    /// The provider is put into cooldown and the next one is tried.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The attempt against the provider exceeded the configured timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    /// Try the next provider in the chain.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// Wallet input was rejected before it reached the data source.
    #[error("Invalid wallet: {0}")]
    InvalidWallet(String),

    /// No provider produced an error to report, because none was attempted.
    #[error("All API providers failed")]
    AllProvidersFailed,
}

impl CoinDataError {
    /// Returns the failover classification for this error.
    ///
    /// - [`RetryClass::FailoverWithPenalty`]: the provider throttled us, cool it down
    /// - [`RetryClass::NextProvider`]: try the next provider, leave this one eligible
    ///
    /// # Examples
    ///
    /// ```
    /// use coindash_market_data::errors::{CoinDataError, RetryClass};
    ///
    /// let error = CoinDataError::RateLimited { provider: "coingecko".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::FailoverWithPenalty);
    ///
    /// let error = CoinDataError::CoinNotFound("nonexistent-coin".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::NextProvider);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::RateLimited { .. } => RetryClass::FailoverWithPenalty,

            // A missing coin fails identically everywhere, but it is not a
            // throttling signal and must not cool the provider down.
            Self::CoinNotFound(_)
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::InvalidWallet(_)
            | Self::AllProvidersFailed => RetryClass::NextProvider,
        }
    }

    /// Whether this error means the provider throttled the request.
    pub fn is_rate_limited(&self) -> bool {
        self.retry_class() == RetryClass::FailoverWithPenalty
    }
}
