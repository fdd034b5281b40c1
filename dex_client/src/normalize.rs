//! Reshapes raw BirdEye / DexScreener payloads into typed records.
//!
//! Missing or non-numeric fields fall back to zero; only a payload with no
//! result at all is reported as [`Lookup::NotFound`].

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{PriceClientError, Result};
use crate::types::{
    Lookup, PriceInfo, Reported, TokenOverview, TradingPair, VenueOverviews, VenuePrices,
};

/// Exact decimal from a JSON number or numeric string, zero otherwise.
///
/// Numbers go through their textual form so `0.1` stays `0.1`.
pub fn decimal_or_zero(value: &Value) -> Decimal {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return Decimal::ZERO,
    };

    match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        Ok(decimal) => decimal,
        Err(e) => {
            debug!("Value '{}' is not a representable decimal ({}), using 0", text, e);
            Decimal::ZERO
        }
    }
}

fn integer_or_zero(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })
            .unwrap_or(0),
        Value::String(text) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn field<'a>(entry: &'a Value, name: &str) -> &'a Value {
    entry.get(name).unwrap_or(&Value::Null)
}

/// BirdEye multi-price payload (`{"data": {<address>: {"value", "priceChange24h"}}}`).
///
/// The multi-price endpoint reports no pool depth; the second figure of each
/// quote is taken from `priceChange24h`. Every requested token gets an entry;
/// tokens the payload omits are zero.
pub fn normalize_prices(tokens: &[String], raw: &Value) -> Result<HashMap<String, PriceInfo>> {
    if tokens.is_empty() {
        return Err(PriceClientError::EmptyInput);
    }

    let data = raw.get("data");
    let mut prices = HashMap::with_capacity(tokens.len());

    for token in tokens {
        let info = match data.and_then(|d| d.get(token)).filter(|entry| entry.is_object()) {
            Some(entry) => PriceInfo::new(
                decimal_or_zero(field(entry, "value")),
                decimal_or_zero(field(entry, "priceChange24h")),
            ),
            None => {
                debug!("No multi-price entry for {}, defaulting to zero", token);
                PriceInfo::zero()
            }
        };
        prices.insert(token.clone(), info);
    }

    Ok(prices)
}

/// BirdEye token overview payload. `data` missing, null or empty is `NotFound`.
pub fn normalize_overview(raw: &Value) -> Lookup<TokenOverview> {
    let data = match raw.get("data").and_then(Value::as_object) {
        Some(data) if !data.is_empty() => data,
        _ => return Lookup::NotFound,
    };
    let get = |name: &str| data.get(name).unwrap_or(&Value::Null);

    let symbol = get("symbol").as_str().unwrap_or_default().to_string();
    let decimals = u8::try_from(integer_or_zero(get("decimals"))).unwrap_or(0);

    Lookup::Found(TokenOverview {
        price: decimal_or_zero(get("price")),
        symbol,
        decimals: Reported::Available(decimals),
        last_trade_unix_time: Reported::Available(integer_or_zero(get("lastTradeUnixTime"))),
        liquidity: decimal_or_zero(get("liquidity")),
        supply: Reported::Available(decimal_or_zero(get("supply"))),
    })
}

/// Parses `raw.pairs` one entry at a time; entries that fail to parse are
/// dropped without affecting the rest.
pub fn parse_pairs(raw: &Value) -> Vec<TradingPair> {
    let Some(entries) = raw.get("pairs").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match TradingPair::deserialize(entry) {
            Ok(pair) => Some(pair),
            Err(e) => {
                warn!("Dropping unparseable pair entry: {}", e);
                None
            }
        })
        .collect()
}

/// Inserts into venue -> symbol, keeping the deeper pool on collisions.
fn insert_by_venue<T>(
    venues: &mut BTreeMap<String, BTreeMap<String, T>>,
    pair: &TradingPair,
    value: T,
    liquidity: impl Fn(&T) -> Decimal,
) {
    let symbols = venues.entry(pair.dex_id.clone()).or_default();
    match symbols.get(&pair.base_token.symbol) {
        Some(existing) if liquidity(existing) >= liquidity(&value) => {}
        _ => {
            symbols.insert(pair.base_token.symbol.clone(), value);
        }
    }
}

/// DexScreener pairs payload, one quote per venue and base symbol.
pub fn normalize_venue_prices(raw: &Value) -> VenuePrices {
    let mut venues = VenuePrices::new();
    for pair in parse_pairs(raw) {
        let quote = PriceInfo::new(pair.price_usd, pair.liquidity.usd);
        insert_by_venue(&mut venues, &pair, quote, |q| q.liquidity);
    }
    venues
}

impl TokenOverview {
    /// Overview from a single pair; the pair listing carries no decimals,
    /// supply or last trade time.
    pub fn from_pair(pair: &TradingPair) -> Self {
        Self {
            price: pair.price_usd,
            symbol: pair.base_token.symbol.clone(),
            decimals: Reported::Unavailable,
            last_trade_unix_time: Reported::Unavailable,
            liquidity: pair.liquidity.usd,
            supply: Reported::Unavailable,
        }
    }
}

/// DexScreener pairs payload as overviews. No usable pairs is `NotFound`.
pub fn normalize_venue_overviews(raw: &Value) -> Lookup<VenueOverviews> {
    let pairs = parse_pairs(raw);
    if pairs.is_empty() {
        return Lookup::NotFound;
    }

    let mut venues = VenueOverviews::new();
    for pair in &pairs {
        insert_by_venue(&mut venues, pair, TokenOverview::from_pair(pair), |o| o.liquidity);
    }
    Lookup::Found(venues)
}
