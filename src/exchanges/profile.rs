use crate::core::errors::ExchangeError;
use crate::core::kernel::{BodyEncoding, ResponseShape, Signer, Unwrap};
use crate::core::types::{KlineInterval, Symbol};
use crate::exchanges::dialect::Dialect;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Upper,
    Lower,
    AsIs,
}

/// How a venue spells an instrument.
#[derive(Debug, Clone, Copy)]
pub struct SymbolFormat {
    pub separator: &'static str,
    pub case: Case,
    pub reversed: bool,
    pub suffix: &'static str,
    /// Quote currencies the venue lists under another code, matched case-insensitively.
    pub quote_aliases: &'static [(&'static str, &'static str)],
}

impl SymbolFormat {
    pub const fn new(separator: &'static str, case: Case) -> Self {
        Self {
            separator,
            case,
            reversed: false,
            suffix: "",
            quote_aliases: &[],
        }
    }

    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    #[must_use]
    pub const fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    #[must_use]
    pub const fn quote_aliases(mut self, aliases: &'static [(&'static str, &'static str)]) -> Self {
        self.quote_aliases = aliases;
        self
    }

    pub fn apply(&self, symbol: &Symbol) -> String {
        let mut symbol = match self
            .quote_aliases
            .iter()
            .find(|(from, _)| symbol.quote.eq_ignore_ascii_case(from))
        {
            Some((_, to)) => Symbol::new(symbol.base.clone(), *to),
            None => symbol.clone(),
        };
        symbol = match self.case {
            Case::Upper => symbol.to_upper(),
            Case::Lower => symbol.to_lower(),
            Case::AsIs => symbol,
        };
        if self.reversed {
            symbol = symbol.reverse();
        }
        let mut formatted = symbol.format(self.separator);
        formatted.push_str(self.suffix);
        formatted
    }
}

/// Kline interval tokens. The first entry is the venue's finest granularity and doubles as
/// the fallback for intervals it does not list.
#[derive(Debug, Clone, Copy)]
pub struct KlineTable {
    entries: &'static [(KlineInterval, &'static str)],
}

impl KlineTable {
    pub const fn new(entries: &'static [(KlineInterval, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn resolve(&self, interval: KlineInterval) -> &'static str {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == interval)
            .or_else(|| self.entries.first())
            .map_or("", |(_, token)| *token)
    }

    pub fn supports(&self, interval: KlineInterval) -> bool {
        self.entries.iter().any(|(candidate, _)| *candidate == interval)
    }
}

/// Round `size` up to the next allowed depth; past the top bucket, the largest one.
/// An empty bucket list passes `size` through.
pub fn clamp_depth(size: u32, buckets: &[u32]) -> u32 {
    buckets
        .iter()
        .copied()
        .find(|bucket| *bucket >= size)
        .or_else(|| buckets.last().copied())
        .unwrap_or(size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CoinList,
    SymbolList,
    ContractList,
    Depth,
    Ticker,
    Kline,
    Trade,
    PremiumIndex,
    Balance,
    LimitOrder,
    MarketOrder,
    BatchLimitOrder,
    CancelOrder,
    BatchCancelOrder,
    CancelAllOrders,
    OpenOrders,
    OrderInfo,
    TradeHistory,
    OrderHistory,
    DepositAddress,
    Withdraw,
    DepositRecords,
    WithdrawRecords,
}

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CoinList => "get_coin_list",
            Self::SymbolList => "get_symbol_list",
            Self::ContractList => "get_contract_list",
            Self::Depth => "get_depth",
            Self::Ticker => "get_ticker",
            Self::Kline => "get_kline",
            Self::Trade => "get_trade",
            Self::PremiumIndex => "get_premium_index",
            Self::Balance => "get_user_balance",
            Self::LimitOrder => "place_limit_order",
            Self::MarketOrder => "place_market_order",
            Self::BatchLimitOrder => "batch_place_limit_order",
            Self::CancelOrder => "cancel_order",
            Self::BatchCancelOrder => "batch_cancel_order",
            Self::CancelAllOrders => "cancel_all_orders",
            Self::OpenOrders => "get_user_open_orders",
            Self::OrderInfo => "get_user_order_info",
            Self::TradeHistory => "get_user_trade_history",
            Self::OrderHistory => "get_user_order_history",
            Self::DepositAddress => "get_deposit_address",
            Self::Withdraw => "withdraw",
            Self::DepositRecords => "get_deposit_records",
            Self::WithdrawRecords => "get_withdraw_records",
        }
    }
}

/// One REST endpoint. `path` may hold `{symbol}`, `{order_id}`, `{account_id}` or `{coin}`.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub signed: bool,
    pub unwrap: Unwrap,
    /// Whether market-data calls send the symbol as a parameter.
    pub symbol_param: bool,
    pub fixed: &'static [(&'static str, &'static str)],
}

impl Endpoint {
    fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            signed: false,
            unwrap: Unwrap::None,
            symbol_param: true,
            fixed: &[],
        }
    }

    pub fn get(path: &'static str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &'static str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: &'static str) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub const fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    #[must_use]
    pub const fn unwrap(mut self, unwrap: Unwrap) -> Self {
        self.unwrap = unwrap;
        self
    }

    #[must_use]
    pub const fn without_symbol(mut self) -> Self {
        self.symbol_param = false;
        self
    }

    #[must_use]
    pub const fn fixed(mut self, fixed: &'static [(&'static str, &'static str)]) -> Self {
        self.fixed = fixed;
        self
    }

    /// Substitute path placeholders; a placeholder without a value is a configuration error.
    pub fn render(&self, vars: &PathVars<'_>) -> Result<String, ExchangeError> {
        let mut path = self.path.to_string();
        for (placeholder, value, what) in [
            ("{symbol}", vars.symbol, "symbol"),
            ("{order_id}", vars.order_id, "order id"),
            ("{account_id}", vars.account_id, "account id"),
            ("{coin}", vars.coin, "coin"),
        ] {
            if path.contains(placeholder) {
                let value = value.ok_or_else(|| {
                    ExchangeError::Configuration(format!("{} is required for {}", what, self.path))
                })?;
                path = path.replace(placeholder, value);
            }
        }
        Ok(path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathVars<'a> {
    pub symbol: Option<&'a str>,
    pub order_id: Option<&'a str>,
    pub account_id: Option<&'a str>,
    pub coin: Option<&'a str>,
}

/// Supported operations of a venue. Anything absent is reported as unsupported.
#[derive(Debug, Clone, Default)]
pub struct EndpointTable {
    entries: HashMap<Operation, Endpoint>,
}

impl EndpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, operation: Operation, endpoint: Endpoint) -> Self {
        self.entries.insert(operation, endpoint);
        self
    }

    pub fn get(&self, operation: Operation) -> Option<&Endpoint> {
        self.entries.get(&operation)
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.entries.contains_key(&operation)
    }
}

/// Parameter names used by the market-data calls.
#[derive(Debug, Clone, Copy)]
pub struct MarketParams {
    pub symbol: Option<&'static str>,
    pub depth_size: Option<&'static str>,
    /// Send the depth size even when it is zero.
    pub depth_size_required: bool,
    pub depth_aggregation: Option<&'static str>,
    pub depth_aggregation_default: Option<&'static str>,
    pub kline_interval: &'static str,
    pub kline_size: Option<&'static str>,
    pub kline_start: Option<&'static str>,
    pub kline_end: Option<&'static str>,
    pub trade_size: Option<&'static str>,
    pub trade_from_id: Option<&'static str>,
    pub trade_start: Option<&'static str>,
    pub trade_end: Option<&'static str>,
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            symbol: Some("symbol"),
            depth_size: None,
            depth_size_required: false,
            depth_aggregation: None,
            depth_aggregation_default: None,
            kline_interval: "interval",
            kline_size: None,
            kline_start: None,
            kline_end: None,
            trade_size: None,
            trade_from_id: None,
            trade_start: None,
            trade_end: None,
        }
    }
}

/// Everything data-driven about a venue.
#[derive(Debug, Clone)]
pub struct ExchangeProfile {
    pub name: &'static str,
    pub base_url: &'static str,
    pub symbol_format: SymbolFormat,
    pub klines: KlineTable,
    pub depth_buckets: &'static [u32],
    pub market: MarketParams,
    pub post_encoding: BodyEncoding,
    pub delete_encoding: BodyEncoding,
    pub shape: ResponseShape,
    pub endpoints: EndpointTable,
}

/// A venue ready to be turned into an adapter: its data, its parameter hooks and its signer.
pub struct ExchangeDefinition {
    pub profile: ExchangeProfile,
    pub dialect: Box<dyn Dialect>,
    /// `None` when no credentials were configured; signed calls then fail with a
    /// configuration error.
    pub signer: Option<Arc<dyn Signer>>,
}
