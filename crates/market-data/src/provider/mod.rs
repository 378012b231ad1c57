//! Coin data source abstractions and implementations.
//!
//! This module contains:
//! - The `CoinDataSource` trait that all sources implement
//! - The mock source backing every provider in the dashboard
//!
//! Sources are decoupled from registry providers: the coin service maps
//! provider names to sources, so several providers can share one source.

mod traits;

pub mod mock;

pub use traits::CoinDataSource;
