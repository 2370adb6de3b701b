use crate::core::config::ExchangeConfig;
use crate::core::kernel::{
    BodyEncoding, Digest, ErrorRule, Injection, PairLayout, Placement, ResponseShape, Signer,
    SortedQuerySigner, Unwrap,
};
use crate::core::types::KlineInterval;
use crate::exchanges::poloniex::trading::PoloniexDialect;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};
use std::sync::Arc;

pub const NAME: &str = "poloniex";

/// Candle width in seconds. Nothing below five minutes.
const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes5, "300"),
    (KlineInterval::Minutes15, "900"),
    (KlineInterval::Minutes30, "1800"),
    (KlineInterval::Hours2, "7200"),
    (KlineInterval::Hours4, "14400"),
    (KlineInterval::Days1, "86400"),
]);

const PUBLIC: &str = "/public";
const TRADING: &str = "/tradingApi";

fn signer(config: &ExchangeConfig) -> Option<Arc<dyn Signer>> {
    if !config.has_credentials() {
        return None;
    }
    let signer = SortedQuerySigner::new(
        config.api_key.clone(),
        config.secret_key.clone(),
        Digest::HmacSha512Hex,
        PairLayout::UrlEncoded,
        Placement::Headers {
            key_header: "Key",
            sign_header: "Sign",
        },
    )
    .inject(Injection::TimestampMs("nonce"));
    Some(Arc::new(signer))
}

fn public(command: &'static [(&'static str, &'static str)]) -> Endpoint {
    Endpoint::get(PUBLIC).fixed(command)
}

fn private(command: &'static [(&'static str, &'static str)]) -> Endpoint {
    Endpoint::post(TRADING).signed().fixed(command)
}

/// Poloniex. Every call is a `command` against one of two paths; pairs are quote first.
pub fn definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://poloniex.com",
            symbol_format: SymbolFormat::new("_", Case::Upper).reversed(),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                symbol: Some("currencyPair"),
                depth_size: Some("depth"),
                kline_interval: "period",
                kline_start: Some("start"),
                kline_end: Some("end"),
                trade_start: Some("start"),
                trade_end: Some("end"),
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Form,
            delete_encoding: BodyEncoding::Query,
            shape: ResponseShape::plain().rule(ErrorRule::ErrorKey("error")),
            endpoints: EndpointTable::new()
                .with(
                    Operation::CoinList,
                    public(&[("command", "returnCurrencies")]),
                )
                .with(
                    Operation::SymbolList,
                    public(&[("command", "returnTicker")]),
                )
                .with(Operation::Depth, public(&[("command", "returnOrderBook")]))
                .with(
                    Operation::Ticker,
                    public(&[("command", "returnTicker")])
                        .without_symbol()
                        .unwrap(Unwrap::SymbolKey),
                )
                .with(Operation::Kline, public(&[("command", "returnChartData")]))
                .with(
                    Operation::Trade,
                    public(&[("command", "returnTradeHistory")]),
                )
                .with(
                    Operation::Balance,
                    private(&[("command", "returnCompleteBalances")]),
                )
                // buy or sell is chosen per order
                .with(Operation::LimitOrder, private(&[]))
                .with(Operation::CancelOrder, private(&[("command", "cancelOrder")]))
                .with(
                    Operation::OpenOrders,
                    private(&[("command", "returnOpenOrders")]),
                )
                .with(
                    Operation::OrderInfo,
                    private(&[("command", "returnOrderStatus")]),
                )
                .with(
                    Operation::TradeHistory,
                    private(&[("command", "returnTradeHistory")]),
                ),
        },
        dialect: Box::new(PoloniexDialect),
        signer: signer(config),
    }
}
