use dex_client::{
    BirdEyeClient, BirdEyeConfig, Lookup, PriceClientError, PriceInfo, PriceSource, Reported,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const BONK: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn client_with_timeout(server: &MockServer, request_timeout_seconds: u64) -> BirdEyeClient {
    BirdEyeClient::new(BirdEyeConfig {
        api_key: "test-key".to_string(),
        api_base_url: server.uri(),
        chain: "solana".to_string(),
        request_timeout_seconds,
    })
    .unwrap()
}

fn client_for(server: &MockServer) -> BirdEyeClient {
    client_with_timeout(server, 5)
}

fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

#[tokio::test]
async fn test_fetch_prices_sends_headers_and_literal_commas() {
    let server = MockServer::start().await;
    let expected_query = format!("list_address={},{}", BONK, USDC);

    Mock::given(method("GET"))
        .and(path("/defi/multi_price"))
        .and(header("accept", "application/json"))
        .and(header("x-chain", "solana"))
        .and(header("X-API-KEY", "test-key"))
        .and(move |request: &Request| request.url.query() == Some(expected_query.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                BONK: { "value": 0.00002137, "priceChange24h": 4.2 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let prices = client
        .fetch_prices(&[BONK.to_string(), USDC.to_string()])
        .await
        .unwrap();

    assert_eq!(prices.len(), 2);
    assert_eq!(
        prices[BONK].as_ref().unwrap(),
        &PriceInfo::new(dec("0.00002137"), dec("4.2"))
    );
    // omitted by the provider, still present as zero
    assert_eq!(prices[USDC].as_ref().unwrap(), &PriceInfo::zero());
}

#[tokio::test]
async fn test_fetch_prices_marks_invalid_addresses_without_aborting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/defi/multi_price"))
        .and(query_param("list_address", BONK))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { BONK: { "value": 1 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let prices = client
        .fetch_prices(&[BONK.to_string(), "not-an-address".to_string(), BONK.to_string()])
        .await
        .unwrap();

    assert_eq!(prices.len(), 2);
    assert_eq!(prices[BONK].as_ref().unwrap().price, Decimal::ONE);
    assert!(matches!(
        prices["not-an-address"],
        Err(PriceClientError::InvalidAddress { .. })
    ));
}

#[tokio::test]
async fn test_fetch_prices_skips_network_when_nothing_is_valid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let prices = client.fetch_prices(&["bad".to_string()]).await.unwrap();

    assert_eq!(prices.len(), 1);
    assert!(prices["bad"].is_err());
}

#[tokio::test]
async fn test_fetch_prices_rejects_empty_input() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    assert!(matches!(
        client.fetch_prices(&[]).await,
        Err(PriceClientError::EmptyInput)
    ));
}

#[tokio::test]
async fn test_fetch_prices_upstream_failure_fills_every_slot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/multi_price"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let prices = client
        .fetch_prices(&[BONK.to_string(), "not-an-address".to_string(), USDC.to_string()])
        .await
        .unwrap();

    assert_eq!(prices.len(), 3);
    for token in [BONK, USDC] {
        let err = prices[token].as_ref().unwrap_err();
        assert!(matches!(err, PriceClientError::Upstream { status: 500 }));
        assert!(err.is_upstream());
    }
    assert!(matches!(
        prices["not-an-address"],
        Err(PriceClientError::InvalidAddress { .. })
    ));
}

#[tokio::test]
async fn test_fetch_prices_timeout_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/multi_price"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": {} }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_with_timeout(&server, 1);
    let prices = client.fetch_prices(&[BONK.to_string()]).await.unwrap();

    let err = prices[BONK].as_ref().unwrap_err();
    assert!(matches!(err, PriceClientError::BatchTransport(_)));
    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_token_overview_timeout_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/token_overview"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = client_with_timeout(&server, 1);
    let err = client.fetch_token_overview(BONK).await.unwrap_err();

    assert!(matches!(err, PriceClientError::Transport(_)));
    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_token_overview_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/token_overview"))
        .and(query_param("address", BONK))
        .and(header("X-API-KEY", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "price": 0.00002137,
                "symbol": "Bonk",
                "decimals": 5,
                "lastTradeUnixTime": 1717171717,
                "liquidity": 12345678.9,
                "supply": 999999999.5
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let overview = client.fetch_token_overview(BONK).await.unwrap().found().unwrap();

    assert_eq!(overview.price, dec("0.00002137"));
    assert_eq!(overview.symbol, "Bonk");
    assert_eq!(overview.decimals, Reported::Available(5));
    assert_eq!(overview.last_trade_unix_time, Reported::Available(1717171717));
    assert_eq!(overview.liquidity, dec("12345678.9"));
    assert_eq!(overview.supply, Reported::Available(dec("999999999.5")));
    assert_eq!(overview.decimals.value(), Some(&5));
    assert_eq!(overview.last_trade_at().unwrap().timestamp(), 1717171717);
    assert_eq!(client.config().chain, "solana");
}

#[tokio::test]
async fn test_token_overview_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/token_overview"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.fetch_token_overview(BONK).await,
        Err(PriceClientError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_token_overview_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/token_overview"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.fetch_token_overview(BONK).await,
        Err(PriceClientError::Upstream { status: 500 })
    ));
}

#[tokio::test]
async fn test_token_overview_invalid_address_never_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.fetch_token_overview("not-an-address").await,
        Err(PriceClientError::InvalidAddress { .. })
    ));
}

#[tokio::test]
async fn test_token_overview_without_data_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/token_overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.fetch_token_overview(BONK).await.unwrap(), Lookup::NotFound);
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/token_overview"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.fetch_token_overview(BONK).await,
        Err(PriceClientError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_spot_prices_drop_invalid_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defi/multi_price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { BONK: { "value": "0.5" } }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let prices = client
        .spot_prices(&[BONK.to_string(), "bad".to_string()])
        .await
        .unwrap();

    assert_eq!(client.name(), "birdeye");
    assert_eq!(prices.len(), 1);
    assert_eq!(prices[BONK], dec("0.5"));
}
