use crate::core::errors::ExchangeError;
use crate::core::types::{
    FundingOptions, LimitOrder, Order, OrderId, OrderQueryOptions, Params, TransferKind,
    WithdrawRequest,
};
use crate::exchanges::profile::Operation;
use serde_json::Value;

/// Account level values a venue may need while marshalling.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialectContext<'a> {
    pub account_id: Option<&'a str>,
    /// Trade password some venues demand on order placement.
    pub trade_password: Option<&'a str>,
}

impl<'a> DialectContext<'a> {
    pub fn require_account_id(&self) -> Result<&'a str, ExchangeError> {
        self.account_id.ok_or_else(|| {
            ExchangeError::Configuration("account id is required for this exchange".to_string())
        })
    }

    pub fn require_trade_password(&self) -> Result<&'a str, ExchangeError> {
        self.trade_password.ok_or_else(|| {
            ExchangeError::Configuration("trade password (passphrase) is required".to_string())
        })
    }
}

/// Venue specific parameters for one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Marshalled {
    pub params: Params,
    pub body: Option<Value>,
    /// Replaces the endpoint's own path (alternative routes keyed on the kind of id).
    pub path: Option<String>,
}

impl Marshalled {
    pub fn params(params: Params) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// An empty batch never reaches the venue.
pub fn require_batch<T>(items: &[T], what: &str) -> Result<(), ExchangeError> {
    if items.is_empty() {
        return Err(ExchangeError::Configuration(format!("{} batch is empty", what)));
    }
    Ok(())
}

/// The one symbol shared by every order of a single-pair batch.
pub fn single_symbol<'a>(orders: &'a [(String, &LimitOrder)]) -> Result<&'a str, ExchangeError> {
    require_batch(orders, "order")?;
    let first = orders[0].0.as_str();
    if let Some((other, _)) = orders.iter().find(|(symbol, _)| symbol.as_str() != first) {
        return Err(ExchangeError::Configuration(format!(
            "batch orders must share one symbol, got {} and {}",
            first, other
        )));
    }
    Ok(first)
}

/// Small helpers for building [`Params`].
pub trait ParamsExt {
    fn put(&mut self, key: &str, value: impl ToString);
    fn put_opt<T: ToString>(&mut self, key: &str, value: Option<T>);
    /// Inserts only when `size` is non-zero.
    fn put_size(&mut self, key: &str, size: u32);
}

impl ParamsExt for Params {
    fn put(&mut self, key: &str, value: impl ToString) {
        self.insert(key.to_string(), value.to_string());
    }

    fn put_opt<T: ToString>(&mut self, key: &str, value: Option<T>) {
        if let Some(value) = value {
            self.put(key, value);
        }
    }

    fn put_size(&mut self, key: &str, size: u32) {
        if size != 0 {
            self.put(key, size);
        }
    }
}

/// Parameter marshalling for trading, account and funding calls.
///
/// The adapter only calls a hook when the venue's endpoint table lists the operation, so a
/// venue implements just the hooks it has endpoints for. Most defaults send no parameters;
/// the batch and cancel-all defaults fail, since those calls are meaningless without a body.
#[allow(unused_variables)]
pub trait Dialect: Send + Sync {
    fn balance(&self, ctx: &DialectContext<'_>) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }

    /// `symbol` is already formatted for the venue.
    fn place_order(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        order: &Order,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }

    /// Each order comes with its formatted symbol.
    fn batch_place_orders(
        &self,
        ctx: &DialectContext<'_>,
        orders: &[(String, &LimitOrder)],
    ) -> Result<Marshalled, ExchangeError> {
        Err(ExchangeError::unsupported(Operation::BatchLimitOrder.name()))
    }

    fn cancel_order(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }

    fn batch_cancel_orders(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        order_ids: &[OrderId],
    ) -> Result<Marshalled, ExchangeError> {
        Err(ExchangeError::unsupported(Operation::BatchCancelOrder.name()))
    }

    fn cancel_all_orders(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
    ) -> Result<Marshalled, ExchangeError> {
        Err(ExchangeError::unsupported(Operation::CancelAllOrders.name()))
    }

    fn open_orders(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }

    fn order_info(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }

    fn trade_history(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }

    fn order_history(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }

    fn deposit_address(
        &self,
        ctx: &DialectContext<'_>,
        coin: &str,
        options: &FundingOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }

    fn withdraw(
        &self,
        ctx: &DialectContext<'_>,
        request: &WithdrawRequest,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }

    fn transfer_records(
        &self,
        ctx: &DialectContext<'_>,
        kind: TransferKind,
        coin: &str,
        size: u32,
        options: &FundingOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default())
    }
}

/// Venues, or venue products, with public market data only.
pub struct PublicOnly;

impl Dialect for PublicOnly {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{OrderSide, Symbol};
    use rust_decimal::Decimal;

    #[test]
    fn test_params_ext() {
        let mut params = Params::new();
        params.put("price", "1.5");
        params.put_opt("from", None::<i64>);
        params.put_opt("to", Some(10));
        params.put_size("limit", 0);
        params.put_size("size", 20);
        assert_eq!(params.len(), 3);
        assert_eq!(params["to"], "10");
        assert_eq!(params["size"], "20");
    }

    #[test]
    fn test_context_requirements() {
        let ctx = DialectContext::default();
        assert!(matches!(ctx.require_account_id(), Err(ExchangeError::Configuration(_))));
        let ctx = DialectContext {
            account_id: Some("42"),
            trade_password: None,
        };
        assert_eq!(ctx.require_account_id().unwrap(), "42");
    }

    fn bid(base: &str) -> LimitOrder {
        LimitOrder::new(
            Symbol::new(base, "usdt"),
            Decimal::TEN,
            Decimal::ONE,
            OrderSide::Buy,
        )
    }

    #[test]
    fn test_single_symbol_batches() {
        let btc = bid("btc");
        let eth = bid("eth");
        let same = vec![("btcusdt".to_string(), &btc), ("btcusdt".to_string(), &btc)];
        assert_eq!(single_symbol(&same).unwrap(), "btcusdt");

        let mixed = vec![("btcusdt".to_string(), &btc), ("ethusdt".to_string(), &eth)];
        assert!(matches!(single_symbol(&mixed), Err(ExchangeError::Configuration(_))));
        assert!(matches!(single_symbol(&[]), Err(ExchangeError::Configuration(_))));
        assert!(matches!(
            require_batch::<OrderId>(&[], "cancel"),
            Err(ExchangeError::Configuration(_))
        ));
    }

    #[test]
    fn test_batch_defaults_are_unsupported() {
        let ctx = DialectContext::default();
        let btc = bid("btc");
        let orders = vec![("btcusdt".to_string(), &btc)];
        let ids = vec![OrderId::Exchange("1".to_string())];

        let err = PublicOnly.batch_place_orders(&ctx, &orders).err().unwrap();
        assert!(matches!(err, ExchangeError::Unsupported(ref op) if op == "batch_place_limit_order"));
        let err = PublicOnly.batch_cancel_orders(&ctx, "btcusdt", &ids).err().unwrap();
        assert!(matches!(err, ExchangeError::Unsupported(ref op) if op == "batch_cancel_order"));
        let err = PublicOnly.cancel_all_orders(&ctx, "btcusdt").err().unwrap();
        assert!(matches!(err, ExchangeError::Unsupported(ref op) if op == "cancel_all_orders"));
    }
}
