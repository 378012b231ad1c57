use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single timestamped value in a series
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub value: Decimal,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, value: Decimal) -> Self {
        Self { timestamp, value }
    }
}

/// Price, market cap and volume series for a coin, ascending by timestamp
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub prices: Vec<PricePoint>,
    pub market_caps: Vec<PricePoint>,
    pub total_volumes: Vec<PricePoint>,
}

impl PriceHistory {
    /// Number of points in the price series
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Most recent price, if any
    pub fn latest_price(&self) -> Option<Decimal> {
        self.prices.last().map(|p| p.value)
    }
}
