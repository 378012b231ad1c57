//! Random-walk price history generator.

use chrono::{DateTime, Duration, Utc};
use num_traits::FromPrimitive;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{PriceHistory, PricePoint};

/// Hourly points over seven days.
pub const PRICE_POINTS: usize = 24 * 7;

/// Prices never walk below this floor.
const PRICE_FLOOR: Decimal = dec!(0.0000001);

const MARKET_CAP_FACTOR: Decimal = dec!(1000000);
const VOLUME_FACTOR: Decimal = dec!(500000);

/// Decimal places kept for generated prices.
const PRICE_SCALE: u32 = 12;

/// Generate a seven-day hourly series ending at `now`.
///
/// Each step moves the price by `base_price * u` with `u` drawn uniformly
/// from `[-volatility, volatility)`.
pub fn generate<R: Rng + ?Sized>(
    base_price: Decimal,
    volatility: f64,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PriceHistory {
    let start = now - Duration::days(7);
    let step = Duration::hours(1);

    let mut history = PriceHistory {
        prices: Vec::with_capacity(PRICE_POINTS),
        market_caps: Vec::with_capacity(PRICE_POINTS),
        total_volumes: Vec::with_capacity(PRICE_POINTS),
    };

    let mut price = base_price;
    for i in 0..PRICE_POINTS {
        let timestamp = start + step * i as i32;

        let factor = if volatility > 0.0 {
            rng.gen_range(-volatility..volatility)
        } else {
            0.0
        };
        let change = base_price * Decimal::from_f64(factor).unwrap_or(Decimal::ZERO);
        price = (price + change).round_dp(PRICE_SCALE).max(PRICE_FLOOR);

        history.prices.push(PricePoint::new(timestamp, price));
        history
            .market_caps
            .push(PricePoint::new(timestamp, price * MARKET_CAP_FACTOR));
        history
            .total_volumes
            .push(PricePoint::new(timestamp, price * VOLUME_FACTOR));
    }

    history
}
