//! Coin listing models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::CoinId;

/// A coin as listed in the trending/markets view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CryptoCoin {
    /// Dataset identifier (e.g., "bitcoin")
    pub id: CoinId,

    /// Lowercase ticker (e.g., "btc")
    pub symbol: String,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    /// Logo URL
    pub image: String,

    /// Current price in USD
    pub current_price: Decimal,

    /// Percentage change over the last 24 hours
    pub price_change_percentage_24h: Decimal,

    /// Market capitalization in USD
    pub market_cap: Decimal,

    /// 24h traded volume in USD
    pub total_volume: Decimal,
}

impl CryptoCoin {
    /// Whether the coin gained value over the last 24 hours.
    pub fn is_up_24h(&self) -> bool {
        self.price_change_percentage_24h.is_sign_positive()
            && !self.price_change_percentage_24h.is_zero()
    }
}
