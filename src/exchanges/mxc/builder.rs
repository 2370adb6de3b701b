use crate::core::config::ExchangeConfig;
use crate::core::kernel::{
    BodyEncoding, Encoding, ErrorRule, Injection, MessageSource, RequestLineSigner,
    ResponseShape, Signer,
};
use crate::core::types::KlineInterval;
use crate::exchanges::mxc::trading::MxcDialect;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};
use std::sync::Arc;

pub const NAME: &str = "mxc";

const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes1, "1m"),
    (KlineInterval::Minutes5, "5m"),
    (KlineInterval::Minutes15, "15m"),
    (KlineInterval::Minutes30, "30m"),
    (KlineInterval::Minutes60, "60m"),
    (KlineInterval::Hours1, "1h"),
    (KlineInterval::Days1, "1d"),
    (KlineInterval::Months1, "1M"),
]);

/// `METHOD\npath\nquery` with HMAC-SHA256, hex, appended as `sign`.
/// JSON bodies are not covered; only the query auth parameters are signed.
fn signer(config: &ExchangeConfig) -> Option<Arc<dyn Signer>> {
    if !config.has_credentials() {
        return None;
    }
    let signer = RequestLineSigner::new(
        config.api_key.clone(),
        config.secret_key.clone(),
        Encoding::Hex,
        "sign",
    )
    .without_host()
    .inject(Injection::ApiKey("api_key"))
    .inject(Injection::TimestampSecs("req_time"));
    Some(Arc::new(signer))
}

pub fn definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://www.mxc.ceo",
            symbol_format: SymbolFormat::new("_", Case::Upper),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                depth_size: Some("depth"),
                kline_size: Some("limit"),
                kline_start: Some("start_time"),
                trade_size: Some("limit"),
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Json,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain().rule(ErrorRule::StringStatus {
                field: "error_code",
                success: "0",
                required: false,
                message: MessageSource::Field("error_message"),
            }),
            endpoints: EndpointTable::new()
                .with(Operation::SymbolList, Endpoint::get("/open/api/v2/market/symbols"))
                .with(Operation::Depth, Endpoint::get("/open/api/v2/market/depth"))
                .with(Operation::Ticker, Endpoint::get("/open/api/v2/market/ticker"))
                .with(Operation::Kline, Endpoint::get("/open/api/v2/market/kline"))
                .with(Operation::Trade, Endpoint::get("/open/api/v2/market/deals"))
                .with(Operation::Balance, Endpoint::get("/open/api/v2/account/info").signed())
                .with(Operation::LimitOrder, Endpoint::post("/open/api/v2/order/place").signed())
                .with(
                    Operation::CancelOrder,
                    Endpoint::delete("/open/api/v2/order/cancel").signed(),
                )
                .with(
                    Operation::BatchCancelOrder,
                    Endpoint::delete("/open/api/v2/order/cancel").signed(),
                )
                .with(
                    Operation::OpenOrders,
                    Endpoint::get("/open/api/v2/order/open_orders").signed(),
                )
                .with(Operation::OrderInfo, Endpoint::get("/open/api/v2/order/query").signed())
                .with(Operation::TradeHistory, Endpoint::get("/open/api/v2/order/deals").signed())
                .with(Operation::OrderHistory, Endpoint::get("/open/api/v2/order/list").signed()),
        },
        dialect: Box::new(MxcDialect),
        signer: signer(config),
    }
}
