use anyhow::Result;
use config_manager::SystemConfig;
use dex_client::{BirdEyeClient, DexScreenerClient, Lookup, PriceSource};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_TOKENS: [&str; 4] = [
    "WskzsKqEW3ZsmrhPAevfVZb6PuuLzWov9mJWZsfDePC",
    "2uvch6aviS6xE3yhWjVZnFrDw7skUtf6ubc7xYJEPpwj",
    "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm",
    "2LxZrcJJhzcAju1FBHuGvw929EVkX7R7Q8yA2cdp8q7b",
];

#[tokio::main]
async fn main() -> Result<()> {
    let config = SystemConfig::read_from_path("config.toml")?;

    let default_filter = if config.system.debug_mode {
        "debug"
    } else {
        config.system.log_filter.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("🚀 Starting price probe");
    info!("Configuration: {}", config.to_json_value());

    config.dexscreener.validate()?;

    let mut tokens: Vec<String> = std::env::args().skip(1).collect();
    if tokens.is_empty() {
        tokens = DEFAULT_TOKENS.iter().map(|t| t.to_string()).collect();
    }
    info!("📋 Probing {} tokens", tokens.len());

    let mut sources: Vec<Box<dyn PriceSource>> = Vec::new();

    match config.birdeye.validate() {
        Ok(()) => {
            let birdeye = BirdEyeClient::new(config.birdeye.clone())?;
            probe_birdeye(&birdeye, &tokens).await;
            sources.push(Box::new(birdeye));
        }
        Err(e) => warn!("⚠️ Skipping BirdEye: {}", e),
    }

    let dexscreener = DexScreenerClient::new(config.dexscreener.clone())?;
    probe_dexscreener(&dexscreener, &tokens).await;
    sources.push(Box::new(dexscreener));

    for source in &sources {
        match source.spot_prices(&tokens).await {
            Ok(prices) => {
                for token in &tokens {
                    match prices.get(token) {
                        Some(price) => println!("{:>12} {} = ${}", source.name(), token, price),
                        None => println!("{:>12} {} = n/a", source.name(), token),
                    }
                }
            }
            Err(e) => warn!("❌ {} spot prices failed: {}", source.name(), e),
        }
    }

    info!("✅ Price probe finished");
    Ok(())
}

async fn probe_birdeye(client: &BirdEyeClient, tokens: &[String]) {
    println!("=== BirdEye multi-price ===");
    match client.fetch_prices(tokens).await {
        Ok(prices) => {
            for (token, outcome) in &prices {
                match outcome {
                    Ok(info) => println!("{}: {}", token, to_json(info)),
                    Err(e) => println!("{}: error: {}", token, e),
                }
            }
        }
        Err(e) => warn!("❌ BirdEye multi-price failed: {}", e),
    }

    println!("=== BirdEye token overview ===");
    for token in tokens {
        match client.fetch_token_overview(token).await {
            Ok(Lookup::Found(overview)) => println!("{}: {}", token, to_json(&overview)),
            Ok(Lookup::NotFound) => println!("{}: not found", token),
            Err(e) => println!("{}: error: {}", token, e),
        }
    }
}

async fn probe_dexscreener(client: &DexScreenerClient, tokens: &[String]) {
    println!("=== DexScreener prices by venue ===");
    match client.fetch_prices(tokens).await {
        Ok(prices) => {
            for (token, outcome) in &prices {
                match outcome {
                    Ok(venues) => println!("{}: {}", token, to_json(venues)),
                    Err(e) => println!("{}: error: {}", token, e),
                }
            }
        }
        Err(e) => warn!("❌ DexScreener prices failed: {}", e),
    }

    println!("=== DexScreener overview and largest SOL pool ===");
    for token in tokens {
        match client.fetch_token_overview(token).await {
            Ok(Lookup::Found(venues)) => println!("{}: {}", token, to_json(&venues)),
            Ok(Lookup::NotFound) => println!("{}: pairs not found", token),
            Err(e) => println!("{}: error: {}", token, e),
        }

        match client.find_largest_pool_with_sol(token).await {
            Ok(Lookup::Found(pair)) => println!(
                "{}: largest SOL pool on {} ({:?}) with ${} liquidity",
                token, pair.dex_id, pair.pair_address, pair.liquidity.usd
            ),
            Ok(Lookup::NotFound) => println!("{}: no SOL pool", token),
            Err(e) => println!("{}: error: {}", token, e),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
