mod integration_test_config;

use coinbridge::core::errors::ExchangeError;
use coinbridge::{
    DepthOptions, KlineInterval, KlineOptions, LimitOrder, Order, OrderId, OrderSide, Symbol,
};
use integration_test_config::utils::{signed_spot, spot, swap};
use integration_test_config::StubTransport;
use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::json;

fn btc_usdt() -> Symbol {
    Symbol::new("btc", "usdt")
}

#[cfg(test)]
mod market_data_tests {
    use super::*;
    use coinbridge::MarketDataSource;

    #[tokio::test]
    async fn test_biki_depth_unwraps_envelope() {
        let transport = StubTransport::replying(200, r#"{"code":"0","data":{"asks":[],"bids":[]}}"#);
        let biki = spot("biki", &transport);

        let response = biki.get_depth(&btc_usdt(), 20, &DepthOptions::default()).await;

        assert_eq!(response.code(), 0);
        assert_eq!(response.msg(), "");
        assert_eq!(response.error(), "");
        assert_eq!(response.data(), Some(&json!({"asks": [], "bids": []})));
        assert!(response.finished_at_ms() >= response.started_at_ms());

        let request = transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert!(request.url.starts_with("https://openapi.biki.com/open/api/market_dept?"));
        let query = transport.last_query();
        assert!(query.contains("symbol=btcusdt"));
        assert!(query.contains("type=step0"));
    }

    #[tokio::test]
    async fn test_biki_embedded_error() {
        let transport = StubTransport::replying(200, r#"{"code":"10","msg":"bad symbol"}"#);
        let biki = spot("biki", &transport);

        let response = biki.get_ticker(&btc_usdt()).await;

        assert_eq!(response.code(), 1003);
        assert_eq!(response.error(), "code: 10, msg: bad symbol");
        assert!(response.data().is_none());
    }

    #[tokio::test]
    async fn test_binance_depth_rounds_up_to_bucket() {
        let transport = StubTransport::new();
        let binance = spot("binance", &transport);

        binance.get_depth(&btc_usdt(), 37, &DepthOptions::default()).await;
        assert!(transport.last_query().contains("limit=50"));

        binance.get_depth(&btc_usdt(), 5000, &DepthOptions::default()).await;
        assert!(transport.last_query().contains("limit=5000"));

        // above the largest bucket
        binance.get_depth(&btc_usdt(), 9000, &DepthOptions::default()).await;
        assert!(transport.last_query().contains("limit=5000"));
        assert!(transport.last_query().contains("symbol=BTCUSDT"));
    }

    #[tokio::test]
    async fn test_poloniex_kline_falls_back_to_finest_period() {
        let transport = StubTransport::replying(200, "[]");
        let poloniex = spot("poloniex", &transport);

        let response = poloniex
            .get_kline(&btc_usdt(), KlineInterval::Minutes1, 100, &KlineOptions::default())
            .await;

        assert_eq!(response.code(), 0);
        let query = transport.last_query();
        assert!(query.contains("command=returnChartData"));
        assert!(query.contains("currencyPair=USDT_BTC"));
        assert!(query.contains("period=300"));
    }

    #[tokio::test]
    async fn test_poloniex_ticker_picks_symbol() {
        let transport = StubTransport::replying(
            200,
            r#"{"USDT_BTC":{"last":"10000"},"USDT_ETH":{"last":"300"}}"#,
        );
        let poloniex = spot("poloniex", &transport);

        let response = poloniex.get_ticker(&btc_usdt()).await;

        assert_eq!(response.data(), Some(&json!({"last": "10000"})));
        assert!(!transport.last_query().contains("currencyPair"));
    }

    #[tokio::test]
    async fn test_hitbtc_ticker_takes_first_element() {
        let transport = StubTransport::replying(200, r#"[{"symbol":"ETHUSD","last":"300"}]"#);
        let hitbtc = spot("hitbtc", &transport);

        let response = hitbtc.get_ticker(&Symbol::new("eth", "usdt")).await;

        assert_eq!(response.data(), Some(&json!({"symbol": "ETHUSD", "last": "300"})));
        assert_eq!(transport.last_query(), "symbols=ETHUSD");
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_adapter() {
        let transport = StubTransport::new();
        let binance = spot("binance", &transport);
        let symbols = [btc_usdt(), Symbol::new("eth", "usdt"), Symbol::new("bnb", "btc")];
        let options = DepthOptions::default();

        let responses = futures::future::join_all(
            symbols
                .iter()
                .map(|symbol| binance.get_depth(symbol, 10, &options)),
        )
        .await;

        assert!(responses.iter().all(|response| response.code() == 0));
        let mut urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        urls.sort();
        assert_eq!(urls.len(), 3);
        assert!(urls[0].contains("symbol=BNBBTC"));
    }

    #[tokio::test]
    async fn test_http_status_failure() {
        let transport = StubTransport::replying(500, "oops");
        let binance = spot("binance", &transport);

        let response = binance.get_ticker(&btc_usdt()).await;

        assert_eq!(response.code(), 500);
        assert!(response.error().contains("HttpStatusCode:500"));
        assert!(response.error().contains("oops"));
        assert!(response.data().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let transport =
            StubTransport::failing(ExchangeError::Transport("connection refused".to_string()));
        let gate = spot("gate", &transport);

        let response = gate.get_ticker(&btc_usdt()).await;

        assert_eq!(response.code(), 1001);
        assert_eq!(response.error(), "connection refused");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let transport = StubTransport::replying(200, "<html>");
        let gate = spot("gate", &transport);

        let response = gate.get_ticker(&btc_usdt()).await;

        assert_eq!(response.code(), 1002);
        assert!(response.data().is_none());
    }
}

#[cfg(test)]
mod trading_tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use coinbridge::core::kernel::{SignInput, Signature, Signer};
    use coinbridge::exchanges::binance;
    use coinbridge::{AccountInfo, Adapter, ExchangeConfig, OrderPlacer, RawRequest};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unsupported_batch_cancel() {
        let transport = StubTransport::new();
        let binance = signed_spot("binance", &transport);

        let ids = [OrderId::Exchange("1".to_string()), OrderId::Exchange("2".to_string())];
        let response = binance.batch_cancel_order(&btc_usdt(), &ids).await;

        assert_eq!(response.code(), 1004);
        assert!(response.data().is_none());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_market_order_on_mxc() {
        let transport = StubTransport::new();
        let mxc = signed_spot("mxc", &transport);

        let response = mxc
            .place_order(&Order::market(btc_usdt(), Decimal::ONE, OrderSide::Buy))
            .await;

        assert_eq!(response.code(), 1004);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_signed_call_without_credentials() {
        let transport = StubTransport::new();
        let binance = spot("binance", &transport);

        let response = binance.get_user_balance().await;

        assert_eq!(response.code(), 1005);
        assert!(transport.requests().is_empty());
    }

    struct RejectingSigner;

    impl Signer for RejectingSigner {
        fn sign(&self, _input: &SignInput<'_>, _now: DateTime<Utc>) -> Result<Signature, ExchangeError> {
            Err(ExchangeError::Signing("key material rejected".to_string()))
        }
    }

    #[tokio::test]
    async fn test_signing_failure_stops_before_io() {
        let transport = StubTransport::new();
        let config = ExchangeConfig::new("k".to_string(), "s".to_string());
        let mut definition = binance::definition(&config);
        definition.signer = Some(Arc::new(RejectingSigner));
        let binance = Adapter::new(definition, &config, transport.clone()).unwrap();

        let response = binance.get_user_balance().await;

        assert_eq!(response.code(), 1006);
        assert!(response.error().contains("key material rejected"));
        assert!(response.data().is_none());
        assert!(response.finished_at_ms() >= response.started_at_ms());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_binance_signed_order() {
        let transport = StubTransport::replying(200, r#"{"orderId":42}"#);
        let binance = signed_spot("binance", &transport);

        let order = Order::limit(btc_usdt(), Decimal::new(250005, 1), Decimal::new(1, 2), OrderSide::Buy);
        let response = binance.place_order(&order).await;

        assert_eq!(response.code(), 0);
        assert_eq!(response.data(), Some(&json!({"orderId": 42})));

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert!(request
            .headers
            .iter()
            .any(|(name, value)| name == "X-MBX-APIKEY" && value == "test_api_key"));
        assert!(request.body.is_none());
        let query = transport.last_query();
        assert!(query.contains("price=25000.5"));
        assert!(query.contains("quantity=0.01"));
        assert!(query.contains("recvWindow=5000"));
        let (_, signature) = query.rsplit_once('&').unwrap();
        assert!(signature.starts_with("signature="));
    }

    #[tokio::test]
    async fn test_huobi_balance_uses_account_path() {
        let transport = StubTransport::replying(200, r#"{"status":"ok","data":{"list":[]}}"#);
        let huobi = signed_spot("huobi", &transport);

        let response = huobi.get_user_balance().await;

        assert_eq!(response.code(), 0);
        assert_eq!(response.data(), Some(&json!({"list": []})));
        let request = transport.last_request();
        assert!(request
            .url
            .starts_with("https://api.huobi.pro/v1/account/accounts/12345/balance?"));
        assert!(request.url.contains("Signature="));
    }

    #[tokio::test]
    async fn test_bitz_batch_place() {
        let transport = StubTransport::replying(200, r#"{"status":200,"data":{}}"#);
        let bitz = signed_spot("bitz", &transport);

        let orders = [
            LimitOrder::new(btc_usdt(), Decimal::TEN, Decimal::ONE, OrderSide::Buy),
            LimitOrder::new(btc_usdt(), Decimal::TWO, Decimal::ONE, OrderSide::Sell),
        ];
        let response = bitz.batch_place_limit_order(&orders).await;

        assert_eq!(response.code(), 0);
        let body = transport.last_request().body.unwrap_or_default();
        assert!(body.contains("tradeData="));
        assert!(body.contains("sign="));
    }

    #[tokio::test]
    async fn test_biki_batch_with_mixed_pairs_is_rejected() {
        let transport = StubTransport::new();
        let biki = signed_spot("biki", &transport);

        let orders = [
            LimitOrder::new(btc_usdt(), Decimal::TEN, Decimal::ONE, OrderSide::Buy),
            LimitOrder::new(Symbol::new("eth", "usdt"), Decimal::TWO, Decimal::ONE, OrderSide::Sell),
        ];
        let response = biki.batch_place_limit_order(&orders).await;

        assert_eq!(response.code(), 1005);
        assert!(response.data().is_none());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batches_never_reach_the_venue() {
        let transport = StubTransport::new();
        for name in ["biki", "huobi", "bitz"] {
            let exchange = signed_spot(name, &transport);

            let response = exchange.batch_place_limit_order(&[]).await;
            assert_eq!(response.code(), 1005, "{} batch place", name);

            let response = exchange.batch_cancel_order(&btc_usdt(), &[]).await;
            assert_eq!(response.code(), 1005, "{} batch cancel", name);
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_generic_request_passes_through() {
        let transport = StubTransport::replying(200, r#"{"serverTime":1}"#);
        let binance = spot("binance", &transport);

        let response = binance
            .generic_http_request("/api/v3/time", Method::GET, Default::default(), false)
            .await;

        assert_eq!(response.data(), Some(&json!({"serverTime": 1})));
        assert_eq!(transport.last_request().url, "https://api.binance.com/api/v3/time");
    }
}

#[cfg(test)]
mod swap_tests {
    use super::*;

    #[tokio::test]
    async fn test_binance_usdt_premium_index() {
        let transport = StubTransport::replying(200, r#"{"symbol":"BTCUSDT","lastFundingRate":"0.0001"}"#);
        let binance = swap("binance_usdt_swap", &transport);

        let response = binance.get_premium_index(Some(&btc_usdt())).await;

        assert_eq!(response.code(), 0);
        let request = transport.last_request();
        assert!(request.url.starts_with("https://fapi.binance.com/fapi/v1/premiumIndex?"));
        assert!(request.url.contains("symbol=BTCUSDT"));
    }

    #[tokio::test]
    async fn test_okex_swap_premium_index_needs_symbol() {
        let transport = StubTransport::new();
        let okex = swap("okex_swap", &transport);

        let response = okex.get_premium_index(None).await;

        assert_eq!(response.code(), 1005);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_okex_swap_symbol_in_path() {
        let transport = StubTransport::replying(200, r#"{"asks":[],"bids":[]}"#);
        let okex = swap("okex_swap", &transport);

        let response = okex
            .get_depth(&Symbol::new("btc", "usd"), 10, &DepthOptions::default())
            .await;

        assert_eq!(response.code(), 0);
        assert!(transport
            .last_request()
            .url
            .contains("/api/swap/v3/instruments/BTC-USD-SWAP/depth"));
    }
}
