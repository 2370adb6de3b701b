use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::errors::{code, ExchangeError};

/// Request parameters, kept sorted by key so every encoding of the same set is identical.
pub type Params = BTreeMap<String, String>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TypesError {
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(&'static str),
}

/// A base/quote currency pair.
///
/// No validation of the currency codes is done; the exchange rejects pairs it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub base: String,
    pub quote: String,
}

impl Symbol {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    #[must_use]
    pub fn to_upper(&self) -> Self {
        Self::new(self.base.to_uppercase(), self.quote.to_uppercase())
    }

    #[must_use]
    pub fn to_lower(&self) -> Self {
        Self::new(self.base.to_lowercase(), self.quote.to_lowercase())
    }

    /// Swap base and quote, for venues that list the quote currency first.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::new(self.quote.clone(), self.base.clone())
    }

    /// `base + separator + quote`; an empty separator concatenates.
    pub fn format(&self, separator: &str) -> String {
        let mut out = String::with_capacity(self.base.len() + separator.len() + self.quote.len());
        out.push_str(&self.base);
        out.push_str(separator);
        out.push_str(&self.quote);
        out
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.base, self.quote)
    }
}

impl FromStr for Symbol {
    type Err = TypesError;

    /// Parses `BASE/QUOTE`, `BASE_QUOTE` or `BASE-QUOTE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once(['/', '_', '-'])
            .ok_or_else(|| TypesError::InvalidSymbol(s.to_string()))?;
        if base.is_empty() || quote.is_empty() {
            return Err(TypesError::InvalidSymbol(s.to_string()));
        }
        Ok(Self::new(base, quote))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_lower(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    pub fn as_upper(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeInForce {
    #[default]
    GTC, // Good Till Canceled
    POC, // Post only (maker only)
    IOC, // Immediate or Cancel
    FOK, // Fill or Kill
    GTX, // Good till crossing
}

/// Unified kline period. Each exchange maps these onto its own tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlineInterval {
    Minutes1,
    Minutes3,
    Minutes5,
    Minutes15,
    Minutes30,
    Minutes60,
    Hours1,
    Hours2,
    Hours3,
    Hours4,
    Hours6,
    Hours8,
    Hours12,
    Days1,
    Days3,
    Days5,
    Days7,
    Weeks1,
    Months1,
    Years1,
}

impl KlineInterval {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Minutes1,
            Self::Minutes3,
            Self::Minutes5,
            Self::Minutes15,
            Self::Minutes30,
            Self::Minutes60,
            Self::Hours1,
            Self::Hours2,
            Self::Hours3,
            Self::Hours4,
            Self::Hours6,
            Self::Hours8,
            Self::Hours12,
            Self::Days1,
            Self::Days3,
            Self::Days5,
            Self::Days7,
            Self::Weeks1,
            Self::Months1,
            Self::Years1,
        ]
    }
}

impl fmt::Display for KlineInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::Minutes1 => "1 minute",
            Self::Minutes3 => "3 minutes",
            Self::Minutes5 => "5 minutes",
            Self::Minutes15 => "15 minutes",
            Self::Minutes30 => "30 minutes",
            Self::Minutes60 => "60 minutes",
            Self::Hours1 => "1 hour",
            Self::Hours2 => "2 hours",
            Self::Hours3 => "3 hours",
            Self::Hours4 => "4 hours",
            Self::Hours6 => "6 hours",
            Self::Hours8 => "8 hours",
            Self::Hours12 => "12 hours",
            Self::Days1 => "1 day",
            Self::Days3 => "3 days",
            Self::Days5 => "5 days",
            Self::Days7 => "7 days",
            Self::Weeks1 => "1 week",
            Self::Months1 => "1 month",
            Self::Years1 => "1 year",
        };
        write!(f, "{}", description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub client_order_id: Option<String>,
    pub price: Decimal,
    pub amount: Decimal,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
}

impl Order {
    pub fn limit(symbol: Symbol, price: Decimal, amount: Decimal, side: OrderSide) -> Self {
        Self {
            symbol,
            client_order_id: None,
            price,
            amount,
            side,
            order_type: OrderType::Limit,
            time_in_force: TimeInForce::GTC,
        }
    }

    /// Market orders carry no price; `amount` is whatever the venue sizes market orders in.
    pub fn market(symbol: Symbol, amount: Decimal, side: OrderSide) -> Self {
        Self {
            symbol,
            client_order_id: None,
            price: Decimal::ZERO,
            amount,
            side,
            order_type: OrderType::Market,
            time_in_force: TimeInForce::GTC,
        }
    }

    #[must_use]
    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = Some(client_order_id.into());
        self
    }

    #[must_use]
    pub const fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }
}

/// One entry of a batch placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrder {
    pub symbol: Symbol,
    pub client_order_id: Option<String>,
    pub price: Decimal,
    pub amount: Decimal,
    pub side: OrderSide,
    pub time_in_force: TimeInForce,
}

impl LimitOrder {
    pub fn new(symbol: Symbol, price: Decimal, amount: Decimal, side: OrderSide) -> Self {
        Self {
            symbol,
            client_order_id: None,
            price,
            amount,
            side,
            time_in_force: TimeInForce::GTC,
        }
    }
}

impl From<LimitOrder> for Order {
    fn from(order: LimitOrder) -> Self {
        Self {
            symbol: order.symbol,
            client_order_id: order.client_order_id,
            price: order.price,
            amount: order.amount,
            side: order.side,
            order_type: OrderType::Limit,
            time_in_force: order.time_in_force,
        }
    }
}

/// Identifies an existing order either by the exchange's id or by the caller's client id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderId {
    Exchange(String),
    Client(String),
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exchange(id) | Self::Client(id) => id,
        }
    }

    pub const fn is_client(&self) -> bool {
        matches!(self, Self::Client(_))
    }
}

/// Splits a mixed id list into `(exchange_ids, client_ids)`.
pub fn partition_ids(ids: &[OrderId]) -> (Vec<&str>, Vec<&str>) {
    let mut exchange = Vec::new();
    let mut client = Vec::new();
    for id in ids {
        match id {
            OrderId::Exchange(v) => exchange.push(v.as_str()),
            OrderId::Client(v) => client.push(v.as_str()),
        }
    }
    (exchange, client)
}

// Timestamps in the option structs are forwarded as-is, in the unit the venue expects.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthOptions {
    /// Price aggregation step (`step0`, a merge interval or a precision level).
    pub aggregation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KlineOptions {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeOptions {
    pub from_id: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQueryOptions {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub from_id: Option<String>,
    pub page: Option<u32>,
    pub offset: Option<u32>,
    pub side: Option<OrderSide>,
    pub direct: Option<String>,
    pub sort: Option<String>,
    /// Order states filter, in the venue's own vocabulary.
    pub status: Option<String>,
    /// Order types filter, in the venue's own vocabulary.
    pub types: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundingOptions {
    pub network: Option<String>,
    pub status: Option<String>,
    pub from_id: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawRequest {
    pub coin: String,
    pub address: String,
    pub amount: Decimal,
    pub address_tag: Option<String>,
    pub network: Option<String>,
    pub fee: Option<Decimal>,
}

impl WithdrawRequest {
    pub fn new(coin: impl Into<String>, address: impl Into<String>, amount: Decimal) -> Self {
        Self {
            coin: coin.into(),
            address: address.into(),
            amount,
            address_tag: None,
            network: None,
            fee: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Deposit,
    Withdraw,
}

/// The canonical response envelope returned by every adapter call.
///
/// `data` is only ever set when `code == 0`, and `et >= st`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEnvelope")]
pub struct ApiResponse {
    code: i64,
    msg: String,
    error: String,
    st: i64,
    et: i64,
    data: Option<Value>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    error: String,
    st: i64,
    et: i64,
    data: Option<Value>,
}

impl TryFrom<RawEnvelope> for ApiResponse {
    type Error = TypesError;

    fn try_from(raw: RawEnvelope) -> Result<Self, Self::Error> {
        if raw.et < raw.st {
            return Err(TypesError::InvalidEnvelope("et precedes st"));
        }
        if raw.code != code::SUCCESS && raw.data.is_some() {
            return Err(TypesError::InvalidEnvelope("failure carries data"));
        }
        Ok(Self {
            code: raw.code,
            msg: raw.msg,
            error: raw.error,
            st: raw.st,
            et: raw.et,
            data: raw.data,
        })
    }
}

impl ApiResponse {
    pub fn success(data: Value, st: i64, et: i64) -> Self {
        Self {
            code: code::SUCCESS,
            msg: String::new(),
            error: String::new(),
            st,
            et: et.max(st),
            data: Some(data),
        }
    }

    pub fn failure(err: &ExchangeError, st: i64, et: i64) -> Self {
        Self {
            code: err.code(),
            msg: err.summary().to_string(),
            error: err.to_string(),
            st,
            et: et.max(st),
            data: None,
        }
    }

    /// Failure that never reached the network; both timestamps are now.
    pub fn from_error(err: &ExchangeError) -> Self {
        let now = Utc::now().timestamp_millis();
        Self::failure(err, now, now)
    }

    pub fn unsupported(operation: &str) -> Self {
        Self::from_error(&ExchangeError::unsupported(operation))
    }

    pub const fn code(&self) -> i64 {
        self.code
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub const fn started_at_ms(&self) -> i64 {
        self.st
    }

    pub const fn finished_at_ms(&self) -> i64 {
        self.et
    }

    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub const fn is_success(&self) -> bool {
        self.code == code::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symbol_format_and_case() {
        let symbol = Symbol::new("btc", "usdt");
        assert_eq!(symbol.format(""), "btcusdt");
        assert_eq!(symbol.to_upper().format("-"), "BTC-USDT");
        assert_eq!(symbol.reverse().to_upper().format("_"), "USDT_BTC");
        assert_eq!(symbol.to_string(), "btc_usdt");
    }

    #[test]
    fn test_symbol_parse() {
        assert_eq!("BTC/USDT".parse::<Symbol>(), Ok(Symbol::new("BTC", "USDT")));
        assert_eq!("eth-btc".parse::<Symbol>(), Ok(Symbol::new("eth", "btc")));
        assert!("BTCUSDT".parse::<Symbol>().is_err());
        assert!("BTC_".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_envelope_wire_shape() {
        let ok = ApiResponse::success(json!({"asks": []}), 10, 12);
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(
            value,
            json!({"code": 0, "msg": "", "error": "", "st": 10, "et": 12, "data": {"asks": []}})
        );
    }

    #[test]
    fn test_envelope_decode_keeps_invariants() {
        let ok: ApiResponse =
            serde_json::from_value(json!({"code": 0, "msg": "", "error": "", "st": 1, "et": 2, "data": [1]}))
                .unwrap();
        assert_eq!(ok.data(), Some(&json!([1])));

        let backwards = json!({"code": 0, "st": 9, "et": 2, "data": null});
        assert!(serde_json::from_value::<ApiResponse>(backwards).is_err());
        let failed_with_data = json!({"code": 1003, "st": 1, "et": 2, "data": {"x": 1}});
        assert!(serde_json::from_value::<ApiResponse>(failed_with_data).is_err());
    }

    #[test]
    fn test_failure_never_carries_data() {
        let err = ExchangeError::Exchange("insufficient balance".into());
        let resp = ApiResponse::failure(&err, 5, 3);
        assert_eq!(resp.code(), code::EXCHANGE);
        assert!(resp.data().is_none());
        assert_eq!(resp.finished_at_ms(), 5);
        assert_eq!(serde_json::to_value(&resp).unwrap()["data"], Value::Null);
    }

    #[test]
    fn test_partition_ids() {
        let ids = vec![
            OrderId::Exchange("1".into()),
            OrderId::Client("a".into()),
            OrderId::Exchange("2".into()),
        ];
        let (exchange, client) = partition_ids(&ids);
        assert_eq!(exchange, vec!["1", "2"]);
        assert_eq!(client, vec!["a"]);
    }
}
