use crate::core::config::ExchangeConfig;
use crate::core::kernel::{BodyEncoding, ResponseShape};
use crate::core::types::KlineInterval;
use crate::exchanges::dialect::PublicOnly;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};

pub const NAME: &str = "gate";

const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes1, "1m"),
    (KlineInterval::Minutes5, "5m"),
    (KlineInterval::Minutes15, "15m"),
    (KlineInterval::Minutes30, "30m"),
    (KlineInterval::Minutes60, "1h"),
    (KlineInterval::Hours1, "1h"),
    (KlineInterval::Hours4, "4h"),
    (KlineInterval::Hours8, "8h"),
    (KlineInterval::Days1, "1d"),
    (KlineInterval::Days7, "7d"),
]);

/// Gate.io spot, public market data only. No signer is configured, so a signed
/// request is rejected before it is sent.
pub fn definition(_config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://api.gateio.ws",
            symbol_format: SymbolFormat::new("_", Case::Upper),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                symbol: Some("currency_pair"),
                depth_size: Some("limit"),
                depth_aggregation: Some("interval"),
                kline_size: Some("limit"),
                kline_start: Some("from"),
                kline_end: Some("to"),
                trade_size: Some("limit"),
                trade_from_id: Some("last_id"),
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Json,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain(),
            endpoints: EndpointTable::new()
                .with(Operation::CoinList, Endpoint::get("/api2/1/coininfo"))
                .with(
                    Operation::SymbolList,
                    Endpoint::get("/api/v4/spot/currency_pairs"),
                )
                .with(Operation::Depth, Endpoint::get("/api/v4/spot/order_book"))
                .with(Operation::Ticker, Endpoint::get("/api/v4/spot/tickers"))
                .with(Operation::Kline, Endpoint::get("/api/v4/spot/candlesticks"))
                .with(Operation::Trade, Endpoint::get("/api/v4/spot/trades")),
        },
        dialect: Box::new(PublicOnly),
        signer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Symbol;

    #[test]
    fn test_gate_profile() {
        let definition = definition(&ExchangeConfig::new("k".into(), "s".into()));
        assert!(definition.signer.is_none());
        let profile = definition.profile;
        assert_eq!(profile.symbol_format.apply(&Symbol::new("btc", "usdt")), "BTC_USDT");
        assert_eq!(profile.klines.resolve(KlineInterval::Days7), "7d");
        assert_eq!(profile.klines.resolve(KlineInterval::Weeks1), "1m");
    }
}
