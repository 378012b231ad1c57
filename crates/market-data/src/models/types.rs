use std::borrow::Cow;

/// Provider identifier - mostly static constants ("coingecko", "cryptocompare", ...)
pub type ProviderId = Cow<'static, str>;

/// Coin identifier as used by the dataset ("bitcoin", "shiba-inu", ...)
pub type CoinId = String;
