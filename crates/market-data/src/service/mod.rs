//! Dashboard-facing services.

mod coin_service;
mod wallet_service;

pub use coin_service::CoinService;
pub use wallet_service::WalletService;
