use crate::core::config::ExchangeConfig;
use crate::core::kernel::{
    BodyEncoding, Digest, ErrorRule, ErrorTable, Injection, MessageSource, PairLayout, Placement,
    ResponseShape, Signer, SortedQuerySigner,
};
use crate::core::types::KlineInterval;
use crate::exchanges::bitz::trading::BitzDialect;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};
use std::sync::Arc;

pub const NAME: &str = "bitz";

const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes1, "1min"),
    (KlineInterval::Minutes5, "5min"),
    (KlineInterval::Minutes15, "15min"),
    (KlineInterval::Minutes30, "30min"),
    (KlineInterval::Minutes60, "60min"),
    (KlineInterval::Hours1, "60min"),
    (KlineInterval::Hours4, "4hour"),
    (KlineInterval::Days1, "1day"),
    (KlineInterval::Days3, "3day"),
    (KlineInterval::Days5, "5day"),
    (KlineInterval::Weeks1, "1week"),
    (KlineInterval::Months1, "1mon"),
]);

/// Bitz only reports a numeric status.
pub const ERRORS: ErrorTable = &[
    (-102, "invalid parameter"),
    (-103, "verification failed"),
    (-104, "network error (1)"),
    (-105, "signature mismatch"),
    (-106, "network error (2)"),
    (-107, "invalid request path"),
    (-109, "invalid secret key"),
    (-110, "rate limit exceeded"),
    (-111, "ip not whitelisted"),
    (-112, "service under maintenance"),
    (-114, "daily request quota reached"),
    (-117, "api key expired"),
    (-100015, "wrong trade password"),
    (-100027, "insufficient assets"),
    (-100044, "request failed"),
    (-100101, "unknown trading pair"),
    (-100201, "unknown trading pair"),
    (-100301, "unknown trading pair"),
    (-100302, "invalid kline type"),
    (-100303, "kline size out of range"),
    (-100401, "unknown trading pair"),
    (-200000, "order already cancelled"),
    (-200001, "unknown currency"),
    (-200003, "trade password not set"),
    (-200005, "account may not trade"),
    (-200025, "trading suspended"),
    (-200027, "invalid price"),
    (-200028, "amount must be positive"),
    (-200029, "amount out of range"),
    (-200030, "price out of range"),
    (-200031, "insufficient assets"),
    (-200033, "order placement failed"),
    (-200034, "order already filled or cancelled"),
    (-200035, "cancel failed, order filled"),
    (-200036, "cancel failed"),
    (-200037, "invalid side"),
    (-200038, "invalid trading pair"),
    (-200053, "deposits suspended"),
    (-200055, "order not found"),
    (-200056, "total out of range"),
    (-300041, "withdrawals suspended"),
    (-300043, "add a withdrawal address first"),
    (-300069, "invalid api key"),
    (-300101, "invalid order type"),
    (-300102, "price and amount must be positive"),
    (-300103, "wrong trade password"),
    (-301001, "network error (3)"),
    (-2001001, "internal error"),
    (-2001003, "invalid parameter"),
    (-2001004, "signature error"),
];

/// `MD5(k=v&k=v + secret)` over the sorted parameters, as `sign`.
fn signer(config: &ExchangeConfig) -> Option<Arc<dyn Signer>> {
    if !config.has_credentials() {
        return None;
    }
    let signer = SortedQuerySigner::new(
        config.api_key.clone(),
        config.secret_key.clone(),
        Digest::Md5WithSecretSuffix,
        PairLayout::Raw,
        Placement::Param("sign"),
    )
    .inject(Injection::ApiKey("apiKey"))
    .inject(Injection::TimestampSecs("timeStamp"))
    .inject(Injection::ShortNonce("nonce"));
    Some(Arc::new(signer))
}

/// Bitz spot. Orders need the trade password, configured as the passphrase.
pub fn definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://apiv2.bitz.com",
            symbol_format: SymbolFormat::new("_", Case::Lower),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                kline_interval: "resolution",
                kline_size: Some("size"),
                kline_end: Some("to"),
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Form,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain()
                .rule(ErrorRule::NumericStatus {
                    field: "status",
                    success: 200,
                    required: true,
                    message: MessageSource::Table(ERRORS),
                })
                .envelope("data"),
            endpoints: EndpointTable::new()
                .with(Operation::CoinList, Endpoint::get("/api2/1/coininfo"))
                .with(Operation::SymbolList, Endpoint::get("/Market/symbolList"))
                .with(Operation::Depth, Endpoint::get("/Market/depth"))
                .with(Operation::Ticker, Endpoint::get("/Market/ticker"))
                .with(Operation::Kline, Endpoint::get("/Market/kline"))
                .with(Operation::Trade, Endpoint::get("/Market/order"))
                .with(Operation::Balance, Endpoint::post("/Assets/getUserAssets").signed())
                .with(
                    Operation::LimitOrder,
                    Endpoint::post("/Trade/addEntrustSheet").signed(),
                )
                .with(Operation::MarketOrder, Endpoint::post("/Trade/MarketTrade").signed())
                .with(
                    Operation::BatchLimitOrder,
                    Endpoint::post("/Trade/addEntrustSheetBatch").signed(),
                )
                .with(
                    Operation::CancelOrder,
                    Endpoint::post("/Trade/cancelEntrustSheet").signed(),
                )
                .with(
                    Operation::BatchCancelOrder,
                    Endpoint::post("/Trade/cancelAllEntrustSheet").signed(),
                )
                .with(
                    Operation::OpenOrders,
                    Endpoint::post("/Trade/getUserNowEntrustSheet").signed(),
                )
                .with(
                    Operation::OrderInfo,
                    Endpoint::post("/Trade/getEntrustSheetInfo").signed(),
                )
                .with(
                    Operation::OrderHistory,
                    Endpoint::post("/Trade/getUserHistoryEntrustSheet").signed(),
                ),
        },
        dialect: Box::new(BitzDialect),
        signer: signer(config),
    }
}
