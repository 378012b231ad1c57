//! Canned coin and wallet data served by the mock source.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{CryptoCoin, Wallet, WalletAsset};

/// Random-walk volatility used when a coin has no specific entry.
const DEFAULT_VOLATILITY: f64 = 0.01;

fn coin(
    id: &str,
    symbol: &str,
    name: &str,
    image: &str,
    current_price: Decimal,
    change_24h: Decimal,
    market_cap: Decimal,
    total_volume: Decimal,
) -> CryptoCoin {
    CryptoCoin {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        current_price,
        price_change_percentage_24h: change_24h,
        market_cap,
        total_volume,
    }
}

/// The trending coin list, in display order.
pub fn coins() -> Vec<CryptoCoin> {
    vec![
        coin(
            "bitcoin",
            "btc",
            "Bitcoin",
            "https://assets.coingecko.com/coins/images/1/large/bitcoin.png?1547033579",
            dec!(61245.32),
            dec!(2.34),
            dec!(1198456789012),
            dec!(38765432198),
        ),
        coin(
            "ethereum",
            "eth",
            "Ethereum",
            "https://assets.coingecko.com/coins/images/279/large/ethereum.png?1595348880",
            dec!(3521.76),
            dec!(1.45),
            dec!(423567890123),
            dec!(21345678901),
        ),
        coin(
            "solana",
            "sol",
            "Solana",
            "https://assets.coingecko.com/coins/images/4128/large/solana.png?1640133422",
            dec!(143.21),
            dec!(-0.87),
            dec!(62345678901),
            dec!(3234567890),
        ),
        coin(
            "binancecoin",
            "bnb",
            "BNB",
            "https://assets.coingecko.com/coins/images/825/large/bnb-icon2_2x.png?1644979850",
            dec!(596.34),
            dec!(-1.23),
            dec!(92345678901),
            dec!(2123456789),
        ),
        coin(
            "cardano",
            "ada",
            "Cardano",
            "https://assets.coingecko.com/coins/images/975/large/cardano.png?1547034860",
            dec!(0.57),
            dec!(5.67),
            dec!(20345678901),
            dec!(987654321),
        ),
        coin(
            "dogecoin",
            "doge",
            "Dogecoin",
            "https://assets.coingecko.com/coins/images/5/large/dogecoin.png?1547792256",
            dec!(0.145),
            dec!(12.34),
            dec!(19876543210),
            dec!(2345678901),
        ),
        coin(
            "shiba-inu",
            "shib",
            "Shiba Inu",
            "https://assets.coingecko.com/coins/images/11939/large/shiba.png?1622619446",
            dec!(0.0000234),
            dec!(15.67),
            dec!(13876543210),
            dec!(1876543210),
        ),
    ]
}

/// Look up a coin of the dataset by id.
pub fn find_coin(coin_id: &str) -> Option<CryptoCoin> {
    coins().into_iter().find(|c| c.id == coin_id)
}

/// Random-walk volatility for a coin; smaller caps swing harder.
pub fn volatility(coin_id: &str) -> f64 {
    match coin_id {
        "bitcoin" => 0.015,
        "ethereum" => 0.02,
        "solana" => 0.03,
        "shiba-inu" | "dogecoin" => 0.05,
        _ => DEFAULT_VOLATILITY,
    }
}

fn asset(coin_id: &str, amount: Decimal, value: Decimal) -> Option<WalletAsset> {
    find_coin(coin_id).map(|coin| WalletAsset {
        coin,
        amount,
        value,
    })
}

/// The user's tracked wallets.
pub fn wallets() -> Vec<Wallet> {
    vec![
        Wallet {
            id: "1".to_string(),
            name: "Main ETH Wallet".to_string(),
            address: "0x1234...5678".to_string(),
            wallet_type: "ETH".to_string(),
            balance: dec!(25690.45),
            previous_balance: Some(dec!(24890.12)),
            assets: [
                asset("ethereum", dec!(7.25), dec!(25532.76)),
                asset("cardano", dec!(276.32), dec!(157.69)),
            ]
            .into_iter()
            .flatten()
            .collect(),
        },
        Wallet {
            id: "2".to_string(),
            name: "BTC Hodl".to_string(),
            address: "bc1q...7ujm".to_string(),
            wallet_type: "BTC".to_string(),
            balance: dec!(122490.64),
            previous_balance: Some(dec!(119876.89)),
            assets: asset("bitcoin", dec!(2), dec!(122490.64))
                .into_iter()
                .collect(),
        },
        Wallet {
            id: "3".to_string(),
            name: "Shitcoin Portfolio".to_string(),
            address: "Manual".to_string(),
            wallet_type: "Manual".to_string(),
            balance: dec!(3507.61),
            previous_balance: Some(dec!(2890.34)),
            assets: [
                asset("dogecoin", dec!(12500), dec!(1812.5)),
                asset("shiba-inu", dec!(72500000), dec!(1695.11)),
            ]
            .into_iter()
            .flatten()
            .collect(),
        },
    ]
}
