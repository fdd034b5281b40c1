use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::normalize::decimal_or_zero;

/// Point-in-time quote for one token on one venue (or aggregated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInfo {
    pub price: Decimal,
    pub liquidity: Decimal,
}

impl PriceInfo {
    pub fn new(price: Decimal, liquidity: Decimal) -> Self {
        Self { price, liquidity }
    }

    pub fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }
}

/// A field a provider may be structurally unable to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reported<T> {
    Available(T),
    Unavailable,
}

impl<T> Reported<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Reported::Available(value) => Some(value),
            Reported::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Reported::Available(_))
    }
}

/// Extended token metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOverview {
    pub price: Decimal,
    pub symbol: String,
    pub decimals: Reported<u8>,
    #[serde(rename = "lastTradeUnixTime")]
    pub last_trade_unix_time: Reported<i64>,
    pub liquidity: Decimal,
    pub supply: Reported<Decimal>,
}

impl TokenOverview {
    /// Last trade as a UTC timestamp; `None` when unreported or zero.
    pub fn last_trade_at(&self) -> Option<DateTime<Utc>> {
        match self.last_trade_unix_time {
            Reported::Available(secs) if secs > 0 => DateTime::from_timestamp(secs, 0),
            _ => None,
        }
    }
}

/// Tagged "no data" result, distinct from a zero-valued record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn as_ref(&self) -> Lookup<&T> {
        match self {
            Lookup::Found(value) => Lookup::Found(value),
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T: Clone> Lookup<&T> {
    pub fn cloned(self) -> Lookup<T> {
        self.map(T::clone)
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Lookup::NotFound, Lookup::Found)
    }
}

/// DexScreener pair record. Only `dexId` is mandatory; decimals accept
/// numbers, numeric strings or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPair {
    #[serde(rename = "dexId")]
    pub dex_id: String,
    #[serde(rename = "chainId", default)]
    pub chain_id: Option<String>,
    #[serde(rename = "pairAddress", default)]
    pub pair_address: Option<String>,
    #[serde(rename = "baseToken", default, deserialize_with = "null_as_default")]
    pub base_token: PairToken,
    #[serde(rename = "quoteToken", default, deserialize_with = "null_as_default")]
    pub quote_token: PairToken,
    #[serde(rename = "priceUsd", default, deserialize_with = "lenient_decimal")]
    pub price_usd: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liquidity: PairLiquidity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairToken {
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairLiquidity {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usd: Decimal,
}

/// venue (dexId) -> base token symbol -> quote
pub type VenuePrices = BTreeMap<String, BTreeMap<String, PriceInfo>>;

/// venue (dexId) -> base token symbol -> overview
pub type VenueOverviews = BTreeMap<String, BTreeMap<String, TokenOverview>>;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(decimal_or_zero(&value))
}
