use coinbridge::{AccountInfo, AdapterBuilder, DepthOptions, MarketDataSource, Symbol};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_depth_over_real_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/depth"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lastUpdateId": 1,
            "bids": [["100.0", "1.0"]],
            "asks": [["101.0", "2.0"]],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let binance = AdapterBuilder::new()
        .endpoint(server.uri())
        .http_timeout(Duration::from_secs(5))
        .build("binance")
        .unwrap();
    let response = binance
        .get_depth(&Symbol::new("btc", "usdt"), 37, &DepthOptions::default())
        .await;

    assert_eq!(response.code(), 0, "{}", response.error());
    assert_eq!(response.data().unwrap()["lastUpdateId"], 1);
}

#[tokio::test]
async fn test_signed_request_carries_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/account"))
        .and(header("X-MBX-APIKEY", "wiremock-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balances": []})))
        .expect(1)
        .mount(&server)
        .await;

    let binance = AdapterBuilder::new()
        .api_key("wiremock-key")
        .secret_key("wiremock-secret")
        .endpoint(server.uri())
        .build("binance")
        .unwrap();
    let response = binance.get_user_balance().await;

    assert_eq!(response.code(), 0, "{}", response.error());
    assert_eq!(response.data(), Some(&json!({"balances": []})));
}

#[tokio::test]
async fn test_error_status_becomes_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/24hr"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"code":-1121,"msg":"Invalid symbol."}"#),
        )
        .mount(&server)
        .await;

    let binance = AdapterBuilder::new()
        .endpoint(server.uri())
        .build("binance")
        .unwrap();
    let response = binance.get_ticker(&Symbol::new("no", "such")).await;

    assert_eq!(response.code(), 400);
    assert!(response.error().contains("Invalid symbol."));
    assert!(response.data().is_none());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let gate = AdapterBuilder::new()
        .endpoint("http://127.0.0.1:1")
        .http_timeout(Duration::from_secs(2))
        .build("gate")
        .unwrap();
    let response = gate.get_ticker(&Symbol::new("btc", "usdt")).await;

    assert_eq!(response.code(), 1001);
    assert_eq!(response.msg(), "http client internal error");
}
