use crate::core::config::ExchangeConfig;
use crate::core::kernel::{BasicAuthSigner, BodyEncoding, ResponseShape, Signer, Unwrap};
use crate::core::types::KlineInterval;
use crate::exchanges::hitbtc::trading::HitbtcDialect;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};
use std::sync::Arc;

pub const NAME: &str = "hitbtc";

const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes1, "M1"),
    (KlineInterval::Minutes3, "M3"),
    (KlineInterval::Minutes5, "M5"),
    (KlineInterval::Minutes15, "M15"),
    (KlineInterval::Minutes30, "M30"),
    (KlineInterval::Minutes60, "H1"),
    (KlineInterval::Hours1, "H1"),
    (KlineInterval::Hours4, "H4"),
    (KlineInterval::Days1, "D1"),
    (KlineInterval::Days7, "D7"),
    (KlineInterval::Weeks1, "D7"),
    (KlineInterval::Months1, "1M"),
]);

fn signer(config: &ExchangeConfig) -> Option<Arc<dyn Signer>> {
    if !config.has_credentials() {
        return None;
    }
    Some(Arc::new(BasicAuthSigner::new(
        config.api_key.clone(),
        config.secret_key.clone(),
    )))
}

/// HitBTC v2. Tether pairs are quoted as `USD`, and the market endpoints take a `symbols` list
/// and answer keyed by symbol.
pub fn definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://api.hitbtc.com",
            symbol_format: SymbolFormat::new("", Case::Upper).quote_aliases(&[("usdt", "USD")]),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                symbol: Some("symbols"),
                depth_size: Some("limit"),
                kline_interval: "period",
                kline_size: Some("limit"),
                kline_start: Some("from"),
                kline_end: Some("till"),
                trade_size: Some("limit"),
                trade_start: Some("from"),
                trade_end: Some("till"),
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Form,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain(),
            endpoints: EndpointTable::new()
                .with(Operation::CoinList, Endpoint::get("/api/2/public/currency"))
                .with(Operation::SymbolList, Endpoint::get("/api/2/public/symbol"))
                .with(
                    Operation::Depth,
                    Endpoint::get("/api/2/public/orderbook").unwrap(Unwrap::SymbolKey),
                )
                .with(
                    Operation::Ticker,
                    Endpoint::get("/api/2/public/ticker").unwrap(Unwrap::FirstElement),
                )
                .with(
                    Operation::Kline,
                    Endpoint::get("/api/2/public/candles").unwrap(Unwrap::SymbolKey),
                )
                .with(
                    Operation::Trade,
                    Endpoint::get("/api/2/public/trades").unwrap(Unwrap::SymbolKey),
                )
                .with(
                    Operation::Balance,
                    Endpoint::get("/api/2/trading/balance").signed(),
                )
                .with(Operation::LimitOrder, Endpoint::post("/api/2/order").signed())
                .with(Operation::MarketOrder, Endpoint::post("/api/2/order").signed())
                .with(
                    Operation::CancelOrder,
                    Endpoint::delete("/api/2/order/{order_id}").signed(),
                )
                .with(Operation::CancelAllOrders, Endpoint::delete("/api/2/order").signed())
                .with(Operation::OpenOrders, Endpoint::get("/api/2/order").signed())
                .with(
                    Operation::OrderInfo,
                    Endpoint::get("/api/2/history/order").signed(),
                )
                .with(
                    Operation::TradeHistory,
                    Endpoint::get("/api/2/history/trades").signed(),
                )
                .with(
                    Operation::OrderHistory,
                    Endpoint::get("/api/2/history/order").signed(),
                )
                .with(
                    Operation::DepositAddress,
                    Endpoint::get("/api/2/account/crypto/address/{coin}").signed(),
                )
                .with(
                    Operation::Withdraw,
                    Endpoint::post("/api/2/account/crypto/withdraw").signed(),
                )
                .with(
                    Operation::DepositRecords,
                    Endpoint::get("/api/2/account/transactions").signed(),
                )
                .with(
                    Operation::WithdrawRecords,
                    Endpoint::get("/api/2/account/transactions").signed(),
                ),
        },
        dialect: Box::new(HitbtcDialect),
        signer: signer(config),
    }
}
