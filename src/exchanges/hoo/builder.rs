use crate::core::config::ExchangeConfig;
use crate::core::kernel::{
    BodyEncoding, Digest, ErrorRule, Injection, MessageSource, PairLayout, Placement,
    ResponseShape, SignScope, Signer, SortedQuerySigner,
};
use crate::core::types::KlineInterval;
use crate::exchanges::hoo::trading::HooDialect;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};
use std::sync::Arc;

pub const NAME: &str = "hoo";

const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes1, "1Min"),
    (KlineInterval::Minutes5, "5Min"),
    (KlineInterval::Minutes15, "15Min"),
    (KlineInterval::Minutes30, "30Min"),
    (KlineInterval::Minutes60, "1Hour"),
    (KlineInterval::Hours1, "1Hour"),
    (KlineInterval::Days1, "1Day"),
]);

/// Only `client_id`, `nonce` and `ts` are signed, never the request parameters.
fn signer(config: &ExchangeConfig) -> Option<Arc<dyn Signer>> {
    if !config.has_credentials() {
        return None;
    }
    let signer = SortedQuerySigner::new(
        config.api_key.clone(),
        config.secret_key.clone(),
        Digest::HmacSha256Hex,
        PairLayout::UrlEncoded,
        Placement::Param("sign"),
    )
    .inject(Injection::ApiKey("client_id"))
    .inject(Injection::ShortNonce("nonce"))
    .inject(Injection::TimestampSecs("ts"))
    .scope(SignScope::InjectedOnly);
    Some(Arc::new(signer))
}

pub fn definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://api.hoolgd.com",
            symbol_format: SymbolFormat::new("-", Case::Upper),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                kline_interval: "type",
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Form,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain()
                .rule(ErrorRule::NumericStatus {
                    field: "code",
                    success: 0,
                    required: false,
                    message: MessageSource::Field("msg"),
                })
                .envelope("data"),
            endpoints: EndpointTable::new()
                .with(Operation::SymbolList, Endpoint::get("/open/v1/tickers/market"))
                .with(Operation::Depth, Endpoint::get("/open/v1/depth/market"))
                // the ticker endpoint answers for every pair at once
                .with(
                    Operation::Ticker,
                    Endpoint::get("/open/v1/tickers/market").without_symbol(),
                )
                .with(Operation::Kline, Endpoint::get("/open/v1/kline/market"))
                .with(Operation::Trade, Endpoint::get("/open/v1/trade/market"))
                .with(Operation::Balance, Endpoint::get("/open/v1/balance").signed())
                .with(Operation::LimitOrder, Endpoint::post("/open/v1/orders/place").signed())
                .with(Operation::CancelOrder, Endpoint::post("/open/v1/orders/cancel").signed())
                .with(Operation::OpenOrders, Endpoint::get("/open/v1/orders/last").signed())
                .with(Operation::OrderInfo, Endpoint::get("/open/v1/orders/detail").signed())
                .with(Operation::OrderHistory, Endpoint::get("/open/v1/orders").signed()),
        },
        dialect: Box::new(HooDialect),
        signer: signer(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hoo_capabilities() {
        let profile = definition(&ExchangeConfig::read_only()).profile;
        for missing in [
            Operation::CoinList,
            Operation::MarketOrder,
            Operation::BatchLimitOrder,
            Operation::BatchCancelOrder,
            Operation::TradeHistory,
        ] {
            assert!(!profile.endpoints.supports(missing), "{:?}", missing);
        }
        assert!(!profile.endpoints.get(Operation::Ticker).unwrap().symbol_param);
    }
}
