use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use crate::birdeye_client::BirdEyeClient;
use crate::dexscreener_client::DexScreenerClient;
use crate::error::Result;
use crate::types::Lookup;

/// One spot price per token, regardless of provider
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Prices for the tokens the provider could price. Tokens that failed
    /// individually are left out.
    async fn spot_prices(&self, token_addresses: &[String]) -> Result<HashMap<String, Decimal>>;
}

#[async_trait]
impl PriceSource for BirdEyeClient {
    fn name(&self) -> &'static str {
        "birdeye"
    }

    async fn spot_prices(&self, token_addresses: &[String]) -> Result<HashMap<String, Decimal>> {
        let prices = self.fetch_prices(token_addresses).await?;

        Ok(prices
            .into_iter()
            .filter_map(|(address, outcome)| match outcome {
                Ok(info) => Some((address, info.price)),
                Err(e) => {
                    debug!("No BirdEye spot price for {}: {}", address, e);
                    None
                }
            })
            .collect())
    }
}

/// Price of the deepest SOL-quoted pool for each token.
#[async_trait]
impl PriceSource for DexScreenerClient {
    fn name(&self) -> &'static str {
        "dexscreener"
    }

    async fn spot_prices(&self, token_addresses: &[String]) -> Result<HashMap<String, Decimal>> {
        let pools = self.find_largest_pools_with_sol(token_addresses).await?;

        Ok(pools
            .into_iter()
            .filter_map(|(address, outcome)| match outcome {
                Ok(Lookup::Found(pair)) => Some((address, pair.price_usd)),
                Ok(Lookup::NotFound) => {
                    debug!("No SOL pool on DexScreener for {}", address);
                    None
                }
                Err(e) => {
                    debug!("No DexScreener spot price for {}: {}", address, e);
                    None
                }
            })
            .collect())
    }
}
