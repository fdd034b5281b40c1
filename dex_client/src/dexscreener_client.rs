use config_manager::DexScreenerConfig;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::address::validate_address;
use crate::error::{PriceClientError, Result, TokenResult};
use crate::normalize::{normalize_venue_overviews, normalize_venue_prices, parse_pairs};
use crate::pool_selector::{select_best_pool, SOL_MINT};
use crate::response::ensure_success;
use crate::types::{Lookup, TradingPair, VenueOverviews, VenuePrices};

/// DexScreener API client for per-token pair listings
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    client: Client,
    config: DexScreenerConfig,
}

impl DexScreenerClient {
    /// Create a new DexScreener client
    pub fn new(config: DexScreenerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| PriceClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn get_config(&self) -> &DexScreenerConfig {
        &self.config
    }

    /// Raw `/latest/dex/tokens/{address}` payload for one token
    pub async fn fetch_pairs(&self, token_address: &str) -> Result<Value> {
        validate_address(token_address)?;

        let url = format!(
            "{}/latest/dex/tokens/{}",
            self.config.api_base_url.trim_end_matches('/'),
            token_address
        );
        debug!("🔍 Fetching DexScreener pairs from: {}", url);

        let response = self.client.get(&url).send().await?;
        ensure_success(response.status().as_u16())?;

        let response_text = response.text().await?;
        serde_json::from_str(&response_text)
            .map_err(|e| PriceClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }

    /// Fetches every distinct token independently, at most
    /// `max_concurrent_requests` at a time. A failing token only fills its
    /// own slot with an error.
    async fn fetch_each<T, F>(
        &self,
        token_addresses: &[String],
        transform: F,
    ) -> Result<HashMap<String, TokenResult<T>>>
    where
        F: Fn(&str, &Value) -> TokenResult<T>,
    {
        if token_addresses.is_empty() {
            return Err(PriceClientError::EmptyInput);
        }

        let unique: BTreeSet<String> = token_addresses.iter().cloned().collect();
        let transform = &transform;

        let results: HashMap<String, TokenResult<T>> = stream::iter(unique)
            .map(|address| async move {
                let outcome = match self.fetch_pairs(&address).await {
                    Ok(payload) => transform(&address, &payload),
                    Err(e) => Err(e),
                };
                if let Err(e) = &outcome {
                    warn!("DexScreener lookup failed for {}: {}", address, e);
                }
                (address, outcome)
            })
            .buffer_unordered(self.config.max_concurrent_requests.max(1))
            .collect()
            .await;

        let succeeded = results.values().filter(|r| r.is_ok()).count();
        info!(
            "📊 DexScreener lookups finished: {}/{} succeeded",
            succeeded,
            results.len()
        );
        Ok(results)
    }

    /// Every venue's quote for each token, keyed venue -> symbol.
    pub async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, TokenResult<VenuePrices>>> {
        self.fetch_each(token_addresses, |_, payload| Ok(normalize_venue_prices(payload)))
            .await
    }

    /// Per-venue overviews for one token; `NotFound` when DexScreener lists
    /// no pairs.
    pub async fn fetch_token_overview(&self, token_address: &str) -> Result<Lookup<VenueOverviews>> {
        let payload = self.fetch_pairs(token_address).await?;
        Ok(normalize_venue_overviews(&payload))
    }

    /// Deepest pool pairing the token against wrapped SOL
    pub async fn find_largest_pool_with_sol(
        &self,
        token_address: &str,
    ) -> Result<Lookup<TradingPair>> {
        let payload = self.fetch_pairs(token_address).await?;
        best_sol_pool(token_address, &payload)
    }

    /// [`find_largest_pool_with_sol`](Self::find_largest_pool_with_sol) for
    /// several tokens, with per-token outcomes.
    pub async fn find_largest_pools_with_sol(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, TokenResult<Lookup<TradingPair>>>> {
        self.fetch_each(token_addresses, best_sol_pool).await
    }
}

fn best_sol_pool(token_address: &str, payload: &Value) -> TokenResult<Lookup<TradingPair>> {
    let pairs = parse_pairs(payload);
    if pairs.is_empty() {
        return Ok(Lookup::NotFound);
    }
    Ok(select_best_pool(&pairs, token_address, SOL_MINT)?.cloned())
}
