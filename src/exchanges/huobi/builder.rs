use crate::core::config::ExchangeConfig;
use crate::core::kernel::{
    BodyEncoding, Encoding, ErrorRule, Injection, MessageSource, RequestLineSigner,
    ResponseShape, Signer, Unwrap,
};
use crate::core::types::KlineInterval;
use crate::exchanges::dialect::PublicOnly;
use crate::exchanges::huobi::trading::HuobiDialect;
use crate::exchanges::profile::{
    Case, Endpoint, EndpointTable, ExchangeDefinition, ExchangeProfile, KlineTable, MarketParams,
    Operation, SymbolFormat,
};
use std::sync::Arc;

pub const NAME: &str = "huobi";
pub const COIN_SWAP_NAME: &str = "huobi_coin_swap";

const KLINES: KlineTable = KlineTable::new(&[
    (KlineInterval::Minutes1, "1min"),
    (KlineInterval::Minutes5, "5min"),
    (KlineInterval::Minutes15, "15min"),
    (KlineInterval::Minutes30, "30min"),
    (KlineInterval::Minutes60, "60min"),
    (KlineInterval::Hours1, "60min"),
    (KlineInterval::Hours4, "4hour"),
    (KlineInterval::Days1, "1day"),
    (KlineInterval::Weeks1, "1week"),
    (KlineInterval::Months1, "1mon"),
    (KlineInterval::Years1, "1year"),
]);

const DATA: Unwrap = Unwrap::Field("data");
const TICK: Unwrap = Unwrap::Field("tick");

/// Both generations of the API: v1 answers `status: "ok"`, v2 answers `code: 200`.
fn shape(message_field: &'static str) -> ResponseShape {
    ResponseShape::plain()
        .rule(ErrorRule::StringStatus {
            field: "status",
            success: "ok",
            required: false,
            message: MessageSource::Field(message_field),
        })
        .rule(ErrorRule::NumericStatus {
            field: "code",
            success: 200,
            required: false,
            message: MessageSource::Field("message"),
        })
}

fn signer(config: &ExchangeConfig) -> Option<Arc<dyn Signer>> {
    if !config.has_credentials() {
        return None;
    }
    let signer = RequestLineSigner::new(
        config.api_key.clone(),
        config.secret_key.clone(),
        Encoding::Base64,
        "Signature",
    )
    .inject(Injection::ApiKey("AccessKeyId"))
    .inject(Injection::Fixed("SignatureMethod", "HmacSHA256"))
    .inject(Injection::Fixed("SignatureVersion", "2"))
    .inject(Injection::UtcTimestamp("Timestamp"));
    Some(Arc::new(signer))
}

fn spot_endpoints() -> EndpointTable {
    EndpointTable::new()
        .with(
            Operation::CoinList,
            Endpoint::get("/v2/reference/currencies").unwrap(DATA),
        )
        .with(
            Operation::SymbolList,
            Endpoint::get("/v1/common/symbols").unwrap(DATA),
        )
        .with(Operation::Depth, Endpoint::get("/market/depth").unwrap(TICK))
        .with(
            Operation::Ticker,
            Endpoint::get("/market/detail/merged").unwrap(TICK),
        )
        .with(
            Operation::Kline,
            Endpoint::get("/market/history/kline").unwrap(DATA),
        )
        .with(
            Operation::Trade,
            Endpoint::get("/market/history/trade").unwrap(DATA),
        )
        .with(
            Operation::Balance,
            Endpoint::get("/v1/account/accounts/{account_id}/balance")
                .signed()
                .unwrap(DATA),
        )
        .with(
            Operation::LimitOrder,
            Endpoint::post("/v1/order/orders/place").signed().unwrap(DATA),
        )
        .with(
            Operation::MarketOrder,
            Endpoint::post("/v1/order/orders/place").signed().unwrap(DATA),
        )
        .with(
            Operation::BatchLimitOrder,
            Endpoint::post("/v1/order/batch-orders").signed().unwrap(DATA),
        )
        .with(
            Operation::CancelOrder,
            Endpoint::post("/v1/order/orders/{order_id}/submitcancel")
                .signed()
                .unwrap(DATA),
        )
        .with(
            Operation::BatchCancelOrder,
            Endpoint::post("/v1/order/orders/batchcancel")
                .signed()
                .unwrap(DATA),
        )
        .with(
            Operation::CancelAllOrders,
            Endpoint::post("/v1/order/orders/batchCancelOpenOrders")
                .signed()
                .unwrap(DATA),
        )
        .with(
            Operation::OpenOrders,
            Endpoint::get("/v1/order/openOrders").signed().unwrap(DATA),
        )
        .with(
            Operation::OrderInfo,
            Endpoint::get("/v1/order/orders/{order_id}")
                .signed()
                .unwrap(DATA),
        )
        .with(
            Operation::TradeHistory,
            Endpoint::get("/v1/order/matchresults").signed().unwrap(DATA),
        )
        .with(
            Operation::OrderHistory,
            Endpoint::get("/v1/order/orders").signed().unwrap(DATA),
        )
        .with(
            Operation::DepositAddress,
            Endpoint::get("/v2/account/deposit/address")
                .signed()
                .unwrap(DATA),
        )
        .with(
            Operation::Withdraw,
            Endpoint::post("/v1/dw/withdraw/api/create")
                .signed()
                .unwrap(DATA),
        )
        .with(
            Operation::DepositRecords,
            Endpoint::get("/v1/query/deposit-withdraw")
                .signed()
                .unwrap(DATA),
        )
        .with(
            Operation::WithdrawRecords,
            Endpoint::get("/v1/query/deposit-withdraw")
                .signed()
                .unwrap(DATA),
        )
}

/// Huobi spot. Account scoped calls need `account_id` in the configuration.
pub fn definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: NAME,
            base_url: "https://api.huobi.pro",
            symbol_format: SymbolFormat::new("", Case::Lower),
            klines: KLINES,
            depth_buckets: &[5, 10, 20],
            market: MarketParams {
                depth_size: Some("depth"),
                depth_aggregation: Some("type"),
                depth_aggregation_default: Some("step0"),
                kline_interval: "period",
                kline_size: Some("size"),
                trade_size: Some("size"),
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Json,
            delete_encoding: BodyEncoding::Query,
            shape: shape("err-msg"),
            endpoints: spot_endpoints(),
        },
        dialect: Box::new(HuobiDialect),
        signer: signer(config),
    }
}

/// Coin margined perpetuals on the derivatives host, `BTC-USD`.
pub fn coin_swap_definition(config: &ExchangeConfig) -> ExchangeDefinition {
    ExchangeDefinition {
        profile: ExchangeProfile {
            name: COIN_SWAP_NAME,
            base_url: "https://api.hbdm.com",
            symbol_format: SymbolFormat::new("-", Case::Upper),
            klines: KLINES,
            depth_buckets: &[],
            market: MarketParams {
                symbol: Some("contract_code"),
                depth_aggregation: Some("type"),
                depth_aggregation_default: Some("step0"),
                kline_interval: "period",
                kline_size: Some("size"),
                kline_start: Some("from"),
                kline_end: Some("to"),
                trade_size: Some("size"),
                ..MarketParams::default()
            },
            post_encoding: BodyEncoding::Json,
            delete_encoding: BodyEncoding::Query,
            shape: shape("err_msg"),
            endpoints: EndpointTable::new()
                .with(
                    Operation::ContractList,
                    Endpoint::get("/swap-api/v1/swap_contract_info").unwrap(DATA),
                )
                .with(Operation::Depth, Endpoint::get("/swap-ex/market/depth").unwrap(TICK))
                .with(
                    Operation::Ticker,
                    Endpoint::get("/swap-ex/market/detail/merged").unwrap(TICK),
                )
                .with(
                    Operation::Kline,
                    Endpoint::get("/swap-ex/market/history/kline").unwrap(DATA),
                )
                .with(
                    Operation::Trade,
                    Endpoint::get("/swap-ex/market/history/trade").unwrap(DATA),
                )
                .with(
                    Operation::PremiumIndex,
                    Endpoint::get("/swap-api/v1/swap_index").unwrap(DATA),
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

    #[test]
    fn test_spot_profile() {
        let profile = definition(&ExchangeConfig::read_only()).profile;
        assert_eq!(profile.symbol_format.apply(&Symbol::new("BTC", "USDT")), "btcusdt");
        assert_eq!(profile.klines.resolve(KlineInterval::Hours1), "60min");
        assert_eq!(profile.klines.resolve(KlineInterval::Hours2), "1min");
        assert_eq!(
            profile.endpoints.get(Operation::Depth).unwrap().unwrap,
            Unwrap::Field("tick")
        );
    }

    #[test]
    fn test_swap_profile() {
        let profile = coin_swap_definition(&ExchangeConfig::read_only()).profile;
        assert_eq!(profile.symbol_format.apply(&Symbol::new("btc", "usd")), "BTC-USD");
        assert_eq!(profile.market.symbol, Some("contract_code"));
        assert!(profile.endpoints.supports(Operation::PremiumIndex));
        assert!(!profile.endpoints.supports(Operation::Balance));
    }
}
