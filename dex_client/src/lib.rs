// Solana price clients
// BirdEye multi-price / token overview and DexScreener pair listings,
// normalized into exact-decimal records

pub mod address;
pub mod birdeye_client;
pub mod dexscreener_client;
pub mod error;
pub mod normalize;
pub mod pool_selector;
pub mod price_source;
pub mod response;
pub mod types;

// Re-export configs from config_manager
pub use config_manager::{BirdEyeConfig, DexScreenerConfig};

pub use address::{is_valid_address, validate_address};
pub use birdeye_client::BirdEyeClient;
pub use dexscreener_client::DexScreenerClient;
pub use error::{PriceClientError, Result, TokenResult};
pub use normalize::{
    normalize_overview, normalize_prices, normalize_venue_overviews, normalize_venue_prices,
    parse_pairs,
};
pub use pool_selector::{select_best_pool, SOL_MINT};
pub use price_source::PriceSource;
pub use response::{ensure_authorized_success, ensure_success};
pub use types::{
    Lookup, PairLiquidity, PairToken, PriceInfo, Reported, TokenOverview, TradingPair,
    VenueOverviews, VenuePrices,
};
