// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the CoinGecko price source
//!
//! Validates the HTTP contract against a mock server: the simple-price
//! endpoint shape, authenticated requests, and the collapse of every
//! failure mode into a single error signal.

use blobwatch::{CoinGeckoPriceSource, EthPriceSource, PriceFeedError};
use httpmock::prelude::*;
use url::Url;

const CG_AUTH_HEADER: &str = "x-cg-pro-api-key";

fn server_url(server: &MockServer) -> Url {
    server.base_url().parse().unwrap()
}

fn add_price_mock(server: &MockServer, status: u16, body: &str) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v3/simple/price")
            .query_param("ids", "ethereum")
            .query_param("vs_currencies", "usd");
        then.status(status).body(body);
    });
}

#[tokio::test]
async fn test_fetch_eth_price_happy_day() {
    let server = MockServer::start();
    add_price_mock(&server, 200, r#"{"ethereum":{"usd":3852.17}}"#);

    let source = CoinGeckoPriceSource::new(server_url(&server), None).unwrap();
    let price = source.fetch_eth_price().await.unwrap();

    assert_eq!(price.as_f64(), 3852.17);
}

#[tokio::test]
async fn test_fetch_eth_price_sends_api_key() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v3/simple/price")
            .query_param("ids", "ethereum")
            .query_param("vs_currencies", "usd")
            .header(CG_AUTH_HEADER, "test-key");
        then.status(200).body(r#"{"ethereum":{"usd":3000.0}}"#);
    });

    let source =
        CoinGeckoPriceSource::new(server_url(&server), Some("test-key".to_string())).unwrap();
    let price = source.fetch_eth_price().await.unwrap();

    assert_eq!(price.as_f64(), 3000.0);
    mock.assert();
}

#[tokio::test]
async fn test_fetch_eth_price_non_success_status() {
    let server = MockServer::start();
    add_price_mock(&server, 429, "");

    let source = CoinGeckoPriceSource::new(server_url(&server), None).unwrap();
    let result = source.fetch_eth_price().await;

    assert!(matches!(
        result,
        Err(PriceFeedError::UnexpectedStatus { status }) if status.as_u16() == 429
    ));
}

#[tokio::test]
async fn test_fetch_eth_price_missing_quote() {
    let server = MockServer::start();
    add_price_mock(&server, 200, "{}");

    let source = CoinGeckoPriceSource::new(server_url(&server), None).unwrap();
    let result = source.fetch_eth_price().await;

    assert!(matches!(result, Err(PriceFeedError::PriceNotFound)));
}

#[tokio::test]
async fn test_fetch_eth_price_malformed_body() {
    let server = MockServer::start();
    add_price_mock(&server, 200, "not json at all");

    let source = CoinGeckoPriceSource::new(server_url(&server), None).unwrap();
    let result = source.fetch_eth_price().await;

    assert!(matches!(result, Err(PriceFeedError::Transport(_))));
}

#[tokio::test]
async fn test_fetch_eth_price_wrong_currency_only() {
    let server = MockServer::start();
    add_price_mock(&server, 200, r#"{"ethereum":{"eur":3600.0}}"#);

    let source = CoinGeckoPriceSource::new(server_url(&server), None).unwrap();
    let result = source.fetch_eth_price().await;

    assert!(matches!(result, Err(PriceFeedError::PriceNotFound)));
}
