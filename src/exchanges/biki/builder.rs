use crate::core::config::ExchangeConfig;
use crate::core::kernel::{
    BodyEncoding, Digest, ErrorRule, Injection, MessageSource, PairLayout, Placement,
    ResponseShape, Signer, SortedQuerySigner,
};
use crate::core::types::KlineInterval;
use crate::exchanges::biki::trading::BikiDialect;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};
use std::sync::Arc;

pub const NAME: &str = "biki";

/// Minutes.
const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes1, "1"),
    (KlineInterval::Minutes5, "5"),
    (KlineInterval::Minutes15, "15"),
    (KlineInterval::Minutes30, "30"),
    (KlineInterval::Minutes60, "60"),
    (KlineInterval::Hours1, "60"),
    (KlineInterval::Days1, "1440"),
    (KlineInterval::Weeks1, "10080"),
    (KlineInterval::Months1, "43200"),
]);

/// `MD5(k1v1k2v2... + secret)`, as `sign`.
fn signer(config: &ExchangeConfig) -> Option<Arc<dyn Signer>> {
    if !config.has_credentials() {
        return None;
    }
    let signer = SortedQuerySigner::new(
        config.api_key.clone(),
        config.secret_key.clone(),
        Digest::Md5WithSecretSuffix,
        PairLayout::Concat,
        Placement::Param("sign"),
    )
    .inject(Injection::ApiKey("api_key"))
    .inject(Injection::TimestampSecs("time"));
    Some(Arc::new(signer))
}

pub fn definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://openapi.biki.com",
            symbol_format: SymbolFormat::new("", Case::Lower),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                depth_aggregation: Some("type"),
                depth_aggregation_default: Some("step0"),
                kline_interval: "period",
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Form,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain()
                .rule(ErrorRule::StringStatus {
                    field: "code",
                    success: "0",
                    required: true,
                    message: MessageSource::CodeAndField("msg"),
                })
                .envelope("data"),
            endpoints: EndpointTable::new()
                .with(Operation::SymbolList, Endpoint::get("/open/api/common/symbols"))
                .with(Operation::Depth, Endpoint::get("/open/api/market_dept"))
                .with(Operation::Ticker, Endpoint::get("/open/api/get_ticker"))
                .with(Operation::Kline, Endpoint::get("/open/api/get_records"))
                .with(Operation::Trade, Endpoint::get("/open/api/get_trades"))
                .with(Operation::Balance, Endpoint::get("/open/api/user/account").signed())
                .with(Operation::LimitOrder, Endpoint::post("/open/api/create_order").signed())
                .with(Operation::MarketOrder, Endpoint::post("/open/api/create_order").signed())
                .with(
                    Operation::BatchLimitOrder,
                    Endpoint::post("/open/api/mass_replaceV2").signed(),
                )
                .with(Operation::CancelOrder, Endpoint::post("/open/api/cancel_order").signed())
                .with(
                    Operation::BatchCancelOrder,
                    Endpoint::post("/open/api/mass_replaceV2").signed(),
                )
                .with(
                    Operation::CancelAllOrders,
                    Endpoint::post("/open/api/cancel_order_all").signed(),
                )
                .with(Operation::OpenOrders, Endpoint::get("/open/api/v2/new_order").signed())
                .with(Operation::OrderInfo, Endpoint::get("/open/api/order_info").signed())
                .with(Operation::TradeHistory, Endpoint::get("/open/api/all_trade").signed())
                .with(Operation::OrderHistory, Endpoint::get("/open/api/v2/all_order").signed()),
        },
        dialect: Box::new(BikiDialect),
        signer: signer(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::{HttpResponse, ResponseNormalizer, Unwrap};
    use crate::core::types::Symbol;

    #[test]
    fn test_biki_profile() {
        let profile = definition(&ExchangeConfig::read_only()).profile;
        assert_eq!(profile.symbol_format.apply(&Symbol::new("BTC", "USDT")), "btcusdt");
        assert!(!profile.endpoints.supports(Operation::CoinList));
        assert_eq!(profile.klines.resolve(KlineInterval::Hours4), "1");
    }

    #[test]
    fn test_string_code_error() {
        let normalizer = ResponseNormalizer::new(definition(&ExchangeConfig::read_only()).profile.shape);
        let body = br#"{"code":"100004","msg":"invalid param","data":null}"#.to_vec();
        let err = normalizer
            .evaluate(Ok(HttpResponse::new(200, body)), Unwrap::None, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "code: 100004, msg: invalid param");

        // a numeric code where a string is expected is a decode failure
        let body = br#"{"code":0,"msg":"","data":{}}"#.to_vec();
        let err = normalizer
            .evaluate(Ok(HttpResponse::new(200, body)), Unwrap::None, None)
            .unwrap_err();
        assert!(matches!(err, crate::core::errors::ExchangeError::Decode(_)));
    }
}
