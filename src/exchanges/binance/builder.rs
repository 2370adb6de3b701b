use crate::core::config::ExchangeConfig;
use crate::core::kernel::{
    BodyEncoding, Digest, Injection, PairLayout, Placement, ResponseShape, Signer,
    SortedQuerySigner,
};
use crate::core::types::KlineInterval;
use crate::exchanges::binance::trading::BinanceDialect;
use crate::exchanges::dialect::PublicOnly;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};
use std::sync::Arc;

pub const NAME: &str = "binance";
pub const USDT_SWAP_NAME: &str = "binance_usdt_swap";
pub const COIN_SWAP_NAME: &str = "binance_coin_swap";

const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes1, "1m"),
    (KlineInterval::Minutes3, "3m"),
    (KlineInterval::Minutes5, "5m"),
    (KlineInterval::Minutes15, "15m"),
    (KlineInterval::Minutes30, "30m"),
    (KlineInterval::Minutes60, "1h"),
    (KlineInterval::Hours1, "1h"),
    (KlineInterval::Hours2, "2h"),
    (KlineInterval::Hours4, "4h"),
    (KlineInterval::Hours6, "6h"),
    (KlineInterval::Hours8, "8h"),
    (KlineInterval::Hours12, "12h"),
    (KlineInterval::Days1, "1d"),
    (KlineInterval::Days3, "3d"),
    (KlineInterval::Weeks1, "1w"),
    (KlineInterval::Months1, "1M"),
]);

const SPOT_DEPTHS: &[u32] = &[5, 10, 20, 50, 100, 500, 1000, 5000];
const SWAP_DEPTHS: &[u32] = &[5, 10, 20, 50, 100, 500, 1000];

fn market_params() -> MarketParams {
    MarketParams {
        depth_size: Some("limit"),
        kline_size: Some("limit"),
        kline_start: Some("startTime"),
        kline_end: Some("endTime"),
        trade_size: Some("limit"),
        ..MarketParams::default()
    }
}

/// `HMAC-SHA256(sorted query)` appended as `signature`, key in `X-MBX-APIKEY`.
fn signer(config: &ExchangeConfig) -> Option<Arc<dyn Signer>> {
    if !config.has_credentials() {
        return None;
    }
    let signer = SortedQuerySigner::new(
        config.api_key.clone(),
        config.secret_key.clone(),
        Digest::HmacSha256Hex,
        PairLayout::UrlEncoded,
        Placement::Trailing("signature"),
    )
    .inject(Injection::Fixed("recvWindow", "5000"))
    .inject(Injection::TimestampMs("timestamp"))
    .api_key_header("X-MBX-APIKEY");
    Some(Arc::new(signer))
}

fn spot_endpoints() -> EndpointTable {
    EndpointTable::new()
        .with(
            Operation::CoinList,
            Endpoint::get("/sapi/v1/capital/config/getall").signed(),
        )
        .with(Operation::SymbolList, Endpoint::get("/api/v3/exchangeInfo"))
        .with(Operation::Depth, Endpoint::get("/api/v3/depth"))
        .with(Operation::Ticker, Endpoint::get("/api/v3/ticker/24hr"))
        .with(Operation::Kline, Endpoint::get("/api/v3/klines"))
        .with(Operation::Trade, Endpoint::get("/api/v3/trades"))
        .with(Operation::Balance, Endpoint::get("/api/v3/account").signed())
        .with(Operation::LimitOrder, Endpoint::post("/api/v3/order").signed())
        .with(Operation::MarketOrder, Endpoint::post("/api/v3/order").signed())
        .with(Operation::CancelOrder, Endpoint::delete("/api/v3/order").signed())
        .with(
            Operation::CancelAllOrders,
            Endpoint::delete("/api/v3/openOrders").signed(),
        )
        .with(Operation::OpenOrders, Endpoint::get("/api/v3/openOrders").signed())
        .with(Operation::OrderInfo, Endpoint::get("/api/v3/order").signed())
        .with(Operation::TradeHistory, Endpoint::get("/api/v3/myTrades").signed())
        .with(Operation::OrderHistory, Endpoint::get("/api/v3/allOrders").signed())
        .with(
            Operation::DepositAddress,
            Endpoint::get("/sapi/v1/capital/deposit/address").signed(),
        )
        .with(
            Operation::Withdraw,
            Endpoint::post("/sapi/v1/capital/withdraw/apply").signed(),
        )
        .with(
            Operation::DepositRecords,
            Endpoint::get("/sapi/v1/capital/deposit/hisrec").signed(),
        )
        .with(
            Operation::WithdrawRecords,
            Endpoint::get("/sapi/v1/capital/withdraw/history").signed(),
        )
}

/// Binance spot.
pub fn definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://api.binance.com",
            symbol_format: SymbolFormat::new("", Case::Upper),
            klines: KLINES,
            depth_buckets: SPOT_DEPTHS,
            market: market_params(),
            post_encoding: BodyEncoding::Query,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain(),
            endpoints: spot_endpoints(),
        },
        dialect: Box::new(BinanceDialect),
        signer: signer(config),
    }
}

// contracts, depth, ticker, klines, trades, premium index
const FAPI: [&str; 6] = [
    "/fapi/v1/exchangeInfo",
    "/fapi/v1/depth",
    "/fapi/v1/ticker/24hr",
    "/fapi/v1/klines",
    "/fapi/v1/trades",
    "/fapi/v1/premiumIndex",
];
const DAPI: [&str; 6] = [
    "/dapi/v1/exchangeInfo",
    "/dapi/v1/depth",
    "/dapi/v1/ticker/24hr",
    "/dapi/v1/klines",
    "/dapi/v1/trades",
    "/dapi/v1/premiumIndex",
];

fn swap_definition(
    config: &ExchangeConfig,
    name: &'static str,
    base_url: &'static str,
    paths: [&'static str; 6],
    symbol_format: SymbolFormat,
) -> ExchangeDefinition {
    let [contracts, depth, ticker, kline, trade, premium] = paths;

    ExchangeDefinition {
        profile: ExchangeProfile {
            name,
            base_url,
            symbol_format,
            klines: KLINES,
            depth_buckets: SWAP_DEPTHS,
            market: market_params(),
            post_encoding: BodyEncoding::Query,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain(),
            endpoints: EndpointTable::new()
                .with(Operation::ContractList, Endpoint::get(contracts))
                .with(Operation::Depth, Endpoint::get(depth))
                .with(Operation::Ticker, Endpoint::get(ticker))
                .with(Operation::Kline, Endpoint::get(kline))
                .with(Operation::Trade, Endpoint::get(trade))
                .with(Operation::PremiumIndex, Endpoint::get(premium)),
        },
        dialect: Box::new(PublicOnly),
        signer: signer(config),
    }
}

/// USDT margined perpetuals.
pub fn usdt_swap_definition(config: &ExchangeConfig) -> ExchangeDefinition {
    swap_definition(
        config,
        USDT_SWAP_NAME,
        "https://fapi.binance.com",
        FAPI,
        SymbolFormat::new("", Case::Upper),
    )
}

/// Coin margined perpetuals, `BTCUSD_PERP`.
pub fn coin_swap_definition(config: &ExchangeConfig) -> ExchangeDefinition {
    swap_definition(
        config,
        COIN_SWAP_NAME,
        "https://dapi.binance.com",
        DAPI,
        SymbolFormat::new("", Case::Upper).suffix("_PERP"),
    )
}
