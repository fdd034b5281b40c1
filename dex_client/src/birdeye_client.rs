use config_manager::BirdEyeConfig;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::address::{is_valid_address, validate_address};
use crate::error::{PriceClientError, Result, TokenResult};
use crate::normalize::{normalize_overview, normalize_prices};
use crate::response::ensure_authorized_success;
use crate::types::{Lookup, PriceInfo, TokenOverview};

/// BirdEye API client
#[derive(Debug, Clone)]
pub struct BirdEyeClient {
    config: BirdEyeConfig,
    http_client: Client,
}

impl BirdEyeClient {
    pub fn new(config: BirdEyeConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| PriceClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Get the BirdEye client configuration
    pub fn config(&self) -> &BirdEyeConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.config.api_base_url.trim_end_matches('/')
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.http_client
            .get(url)
            .header("accept", "application/json")
            .header("x-chain", &self.config.chain)
            .header("X-API-KEY", &self.config.api_key)
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);

        let response = self.get(url).send().await?;
        ensure_authorized_success(response.status().as_u16())?;

        let response_text = response.text().await?;
        serde_json::from_str(&response_text)
            .map_err(|e| PriceClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }

    /// Prices for a list of tokens via the multi-price endpoint.
    ///
    /// Invalid addresses get an error in their own slot and are left out of
    /// the request; every valid address gets a price, zero when BirdEye has
    /// none. When the multi-price request itself fails, each valid address
    /// carries that failure in its slot.
    pub async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, TokenResult<PriceInfo>>> {
        if token_addresses.is_empty() {
            return Err(PriceClientError::EmptyInput);
        }

        let mut results = HashMap::with_capacity(token_addresses.len());
        let mut seen = HashSet::new();
        let mut valid = Vec::new();

        for address in token_addresses {
            if !seen.insert(address.as_str()) {
                continue;
            }
            if is_valid_address(address) {
                valid.push(address.clone());
            } else {
                warn!("Skipping invalid Solana address in multi-price request: {}", address);
                results.insert(address.clone(), Err(PriceClientError::invalid_address(address)));
            }
        }

        if valid.is_empty() {
            return Ok(results);
        }

        // list_address is sent with literal commas
        let url = format!(
            "{}/defi/multi_price?list_address={}",
            self.base_url(),
            valid.join(",")
        );
        let payload = match self.get_json(&url).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("❌ BirdEye multi-price request failed for {} tokens: {}", valid.len(), e);
                results.extend(valid.into_iter().map(|address| (address, Err(e.for_slot()))));
                return Ok(results);
            }
        };
        let prices = normalize_prices(&valid, &payload)?;

        info!(
            "Retrieved BirdEye prices for {}/{} tokens",
            prices.len(),
            token_addresses.len()
        );
        results.extend(prices.into_iter().map(|(address, price)| (address, Ok(price))));
        Ok(results)
    }

    /// Token overview for a single address
    pub async fn fetch_token_overview(&self, address: &str) -> Result<Lookup<TokenOverview>> {
        validate_address(address)?;

        let url = format!("{}/defi/token_overview?address={}", self.base_url(), address);
        let payload = self.get_json(&url).await?;
        let overview = normalize_overview(&payload);

        if !overview.is_found() {
            debug!("BirdEye returned no overview for {}", address);
        }
        Ok(overview)
    }
}
