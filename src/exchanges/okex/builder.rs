use crate::core::config::ExchangeConfig;
use crate::core::kernel::{
    BodyEncoding, CanonicalHeaderSigner, CanonicalHeaders, ResponseShape, Signer,
};
use crate::core::types::KlineInterval;
use crate::exchanges::dialect::PublicOnly;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};
use std::sync::Arc;

pub const NAME: &str = "okex";
pub const SWAP_NAME: &str = "okex_swap";

/// Granularity in seconds.
const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes1, "60"),
    (KlineInterval::Minutes3, "180"),
    (KlineInterval::Minutes5, "300"),
    (KlineInterval::Minutes15, "900"),
    (KlineInterval::Minutes30, "1800"),
    (KlineInterval::Minutes60, "3600"),
    (KlineInterval::Hours1, "3600"),
    (KlineInterval::Hours2, "7200"),
    (KlineInterval::Hours4, "14400"),
    (KlineInterval::Hours6, "21600"),
    (KlineInterval::Hours12, "43200"),
    (KlineInterval::Days1, "86400"),
    (KlineInterval::Weeks1, "604800"),
]);

const HEADERS: CanonicalHeaders = CanonicalHeaders {
    key: "OK-ACCESS-KEY",
    sign: "OK-ACCESS-SIGN",
    timestamp: "OK-ACCESS-TIMESTAMP",
    passphrase: "OK-ACCESS-PASSPHRASE",
};

/// A missing passphrase surfaces when the first signed call is built.
fn signer(config: &ExchangeConfig) -> Option<Arc<dyn Signer>> {
    if !config.has_credentials() {
        return None;
    }
    Some(Arc::new(CanonicalHeaderSigner::new(
        config.api_key.clone(),
        config.secret_key.clone(),
        config.passphrase.clone(),
        HEADERS,
    )))
}

/// OKEx spot, public market data. The instrument id travels in the path.
pub fn definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://www.okex.com",
            symbol_format: SymbolFormat::new("-", Case::Upper),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                symbol: None,
                depth_size: Some("size"),
                depth_size_required: true,
                depth_aggregation: Some("depth"),
                kline_interval: "granularity",
                kline_size: Some("limit"),
                kline_start: Some("start"),
                kline_end: Some("end"),
                trade_size: Some("limit"),
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Json,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain(),
            endpoints: EndpointTable::new()
                .with(Operation::CoinList, Endpoint::get("/api/account/v3/currencies"))
                .with(Operation::SymbolList, Endpoint::get("/api/spot/v3/instruments"))
                .with(
                    Operation::Depth,
                    Endpoint::get("/api/spot/v3/instruments/{symbol}/book"),
                )
                .with(
                    Operation::Ticker,
                    Endpoint::get("/api/spot/v3/instruments/{symbol}/ticker"),
                )
                .with(
                    Operation::Kline,
                    Endpoint::get("/api/spot/v3/instruments/{symbol}/history/candles"),
                )
                .with(
                    Operation::Trade,
                    Endpoint::get("/api/spot/v3/instruments/{symbol}/trades"),
                ),
        },
        dialect: Box::new(PublicOnly),
        signer: signer(config),
    }
}

/// OKEx perpetual swaps, `BTC-USDT-SWAP`. The premium index needs a symbol.
pub fn swap_definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: SWAP_NAME,
            base_url: "https://www.okex.com",
            symbol_format: SymbolFormat::new("-", Case::Upper).suffix("-SWAP"),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                symbol: Some("instrument_id"),
                depth_size: Some("size"),
                depth_size_required: true,
                depth_aggregation: Some("depth"),
                kline_interval: "granularity",
                kline_start: Some("start"),
                kline_end: Some("end"),
                trade_size: Some("limit"),
                trade_from_id: Some("after"),
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Json,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain(),
            endpoints: EndpointTable::new()
                .with(Operation::ContractList, Endpoint::get("/api/swap/v3/instruments"))
                .with(
                    Operation::Depth,
                    Endpoint::get("/api/swap/v3/instruments/{symbol}/depth"),
                )
                .with(
                    Operation::Ticker,
                    Endpoint::get("/api/swap/v3/instruments/{symbol}/ticker"),
                )
                .with(
                    Operation::Kline,
                    Endpoint::get("/api/swap/v3/instruments/{symbol}/candles"),
                )
                .with(
                    Operation::Trade,
                    Endpoint::get("/api/swap/v3/instruments/{symbol}/trades"),
                )
                .with(
                    Operation::PremiumIndex,
                    Endpoint::get("/api/swap/v3/instruments/{symbol}/index"),
                ),
        },
        dialect: Box::new(PublicOnly),
        signer: signer(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Symbol;
    use crate::exchanges::profile::PathVars;

    #[test]
    fn test_symbol_in_path() {
        let profile = definition(&ExchangeConfig::read_only()).profile;
        let symbol = profile.symbol_format.apply(&Symbol::new("btc", "usdt"));
        let vars = PathVars {
            symbol: Some(&symbol),
            ..PathVars::default()
        };
        let path = profile
            .endpoints
            .get(Operation::Depth)
            .unwrap()
            .render(&vars)
            .unwrap();
        assert_eq!(path, "/api/spot/v3/instruments/BTC-USDT/book");
        assert!(profile.market.symbol.is_none());
        assert!(!profile.endpoints.supports(Operation::LimitOrder));
    }

    #[test]
    fn test_swap_symbol() {
        let profile = swap_definition(&ExchangeConfig::read_only()).profile;
        assert_eq!(
            profile.symbol_format.apply(&Symbol::new("btc", "usdt")),
            "BTC-USDT-SWAP"
        );
        assert_eq!(profile.klines.resolve(KlineInterval::Days3), "60");
    }
}
