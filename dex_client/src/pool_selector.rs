use crate::error::{PriceClientError, Result};
use crate::types::{Lookup, TradingPair};

/// Wrapped SOL mint, the canonical quote token
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Deepest `target`/`quote_mint` pool by USD liquidity. Ties keep the pair
/// that appears first.
pub fn select_best_pool<'a>(
    pairs: &'a [TradingPair],
    target: &str,
    quote_mint: &str,
) -> Result<Lookup<&'a TradingPair>> {
    if pairs.is_empty() {
        return Err(PriceClientError::EmptyInput);
    }

    let mut best: Option<&TradingPair> = None;
    for pair in pairs
        .iter()
        .filter(|p| p.base_token.address == target && p.quote_token.address == quote_mint)
    {
        match best {
            Some(current) if current.liquidity.usd >= pair.liquidity.usd => {}
            _ => best = Some(pair),
        }
    }

    Ok(best.into())
}
