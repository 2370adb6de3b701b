use crate::core::errors::ExchangeError;
use crate::core::types::{
    partition_ids, FundingOptions, LimitOrder, Order, OrderId, OrderQueryOptions, OrderSide,
    OrderType, Params, TimeInForce, TransferKind, WithdrawRequest,
};
use crate::exchanges::dialect::{require_batch, Dialect, DialectContext, Marshalled, ParamsExt};
use serde_json::{json, Map, Value};

pub struct HuobiDialect;

const ALL_ORDER_STATES: &str =
    "created,submitted,partial-filled,filled,partial-canceled,canceling,canceled";

fn order_type(side: OrderSide, order_type: OrderType, time_in_force: TimeInForce) -> String {
    let suffix = match (order_type, time_in_force) {
        (OrderType::Market, _) => "market",
        (OrderType::Limit, TimeInForce::IOC) => "ioc",
        (OrderType::Limit, TimeInForce::FOK) => "limit-fok",
        (OrderType::Limit, TimeInForce::POC | TimeInForce::GTX) => "limit-maker",
        (OrderType::Limit, TimeInForce::GTC) => "limit",
    };
    format!("{}-{}", side.as_lower(), suffix)
}

fn order_params(account_id: &str, symbol: &str, order: &Order) -> Params {
    let mut params = Params::new();
    params.put("account-id", account_id);
    params.put("symbol", symbol);
    params.put("type", order_type(order.side, order.order_type, order.time_in_force));
    params.put("amount", order.amount.normalize());
    if order.order_type == OrderType::Limit {
        params.put("price", order.price.normalize());
    }
    params.put("source", "spot-api");
    params.put_opt("client-order-id", order.client_order_id.as_deref());
    params
}

fn query_params(symbol: &str, size: u32, options: &OrderQueryOptions) -> Params {
    let mut params = Params::new();
    params.put("symbol", symbol);
    params.put_size("size", size);
    params.put_opt("types", options.types.as_deref());
    params.put_opt("start-time", options.start_time);
    params.put_opt("end-time", options.end_time);
    params.put_opt("from", options.from_id.as_deref());
    params.put_opt("direct", options.direct.as_deref());
    params
}

impl Dialect for HuobiDialect {
    fn place_order(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        order: &Order,
    ) -> Result<Marshalled, ExchangeError> {
        let account_id = ctx.require_account_id()?;
        Ok(Marshalled::params(order_params(account_id, symbol, order)))
    }

    fn batch_place_orders(
        &self,
        ctx: &DialectContext<'_>,
        orders: &[(String, &LimitOrder)],
    ) -> Result<Marshalled, ExchangeError> {
        require_batch(orders, "order")?;
        let account_id = ctx.require_account_id()?;
        let batch: Vec<Value> = orders
            .iter()
            .map(|(symbol, order)| {
                let order = Order::from((*order).clone());
                let object: Map<String, Value> = order_params(account_id, symbol, &order)
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                Value::Object(object)
            })
            .collect();
        Ok(Marshalled::default().with_body(Value::Array(batch)))
    }

    fn cancel_order(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        match order_id {
            OrderId::Exchange(_) => Ok(Marshalled::default()),
            OrderId::Client(id) => {
                let mut params = Params::new();
                params.put("client-order-id", id);
                params.put("symbol", symbol);
                Ok(Marshalled::params(params)
                    .with_path("/v1/order/orders/submitCancelClientOrder"))
            }
        }
    }

    fn batch_cancel_orders(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_ids: &[OrderId],
    ) -> Result<Marshalled, ExchangeError> {
        require_batch(order_ids, "cancel")?;
        let (exchange, client) = partition_ids(order_ids);
        let mut body = Map::new();
        if !exchange.is_empty() {
            body.insert("order-ids".to_string(), json!(exchange));
        }
        if !client.is_empty() {
            body.insert("client-order-ids".to_string(), json!(client));
        }
        Ok(Marshalled::default().with_body(Value::Object(body)))
    }

    fn cancel_all_orders(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("account-id", ctx.require_account_id()?);
        params.put("symbol", symbol);
        Ok(Marshalled::params(params))
    }

    fn open_orders(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("account-id", ctx.require_account_id()?);
        params.put("symbol", symbol);
        params.put_size("size", size);
        params.put_opt("side", options.side.map(OrderSide::as_lower));
        params.put_opt("from", options.from_id.as_deref());
        params.put_opt("direct", options.direct.as_deref());
        Ok(Marshalled::params(params))
    }

    fn order_info(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        match order_id {
            OrderId::Exchange(_) => Ok(Marshalled::default()),
            OrderId::Client(id) => {
                let mut params = Params::new();
                params.put("clientOrderId", id);
                Ok(Marshalled::params(params).with_path("/v1/order/orders/getClientOrder"))
            }
        }
    }

    fn trade_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(query_params(symbol, size, options)))
    }

    fn order_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = query_params(symbol, size, options);
        params.put(
            "states",
            options.status.as_deref().unwrap_or(ALL_ORDER_STATES),
        );
        Ok(Marshalled::params(params))
    }

    fn deposit_address(
        &self,
        _ctx: &DialectContext<'_>,
        coin: &str,
        _options: &FundingOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("currency", coin.to_lowercase());
        Ok(Marshalled::params(params))
    }

    fn withdraw(
        &self,
        _ctx: &DialectContext<'_>,
        request: &WithdrawRequest,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("address", &request.address);
        params.put("amount", request.amount.normalize());
        params.put("currency", request.coin.to_lowercase());
        params.put_opt("fee", request.fee.map(|fee| fee.normalize()));
        params.put_opt("addr-tag", request.address_tag.as_deref());
        params.put_opt("chain", request.network.as_deref());
        Ok(Marshalled::params(params))
    }

    fn transfer_records(
        &self,
        _ctx: &DialectContext<'_>,
        kind: TransferKind,
        coin: &str,
        size: u32,
        options: &FundingOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put(
            "type",
            match kind {
                TransferKind::Deposit => "deposit",
                TransferKind::Withdraw => "withdraw",
            },
        );
        if !coin.is_empty() {
            params.put("currency", coin.to_lowercase());
        }
        params.put_size("size", size);
        params.put_opt("from", options.from_id.as_deref());
        Ok(Marshalled::params(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Symbol;
    use rust_decimal::Decimal;

    fn ctx() -> DialectContext<'static> {
        DialectContext {
            account_id: Some("100009"),
            trade_password: None,
        }
    }

    #[test]
    fn test_order_type_tokens() {
        assert_eq!(order_type(OrderSide::Buy, OrderType::Market, TimeInForce::GTC), "buy-market");
        assert_eq!(order_type(OrderSide::Sell, OrderType::Limit, TimeInForce::GTC), "sell-limit");
        assert_eq!(order_type(OrderSide::Buy, OrderType::Limit, TimeInForce::FOK), "buy-limit-fok");
        assert_eq!(order_type(OrderSide::Buy, OrderType::Limit, TimeInForce::POC), "buy-limit-maker");
    }

    #[test]
    fn test_place_order_requires_account() {
        let order = Order::market(Symbol::new("btc", "usdt"), Decimal::ONE, OrderSide::Buy);
        let err = HuobiDialect
            .place_order(&DialectContext::default(), "btcusdt", &order)
            .unwrap_err();
        assert!(matches!(err, ExchangeError::Configuration(_)));

        let m = HuobiDialect.place_order(&ctx(), "btcusdt", &order).unwrap();
        assert_eq!(m.params["account-id"], "100009");
        assert_eq!(m.params["source"], "spot-api");
        assert!(!m.params.contains_key("price"));
    }

    #[test]
    fn test_batch_orders_body() {
        let order = LimitOrder::new(
            Symbol::new("eth", "usdt"),
            Decimal::new(15, 1),
            Decimal::TWO,
            OrderSide::Sell,
        );
        let m = HuobiDialect
            .batch_place_orders(&ctx(), &[("ethusdt".to_string(), &order)])
            .unwrap();
        let body = m.body.unwrap();
        assert_eq!(body[0]["type"], "sell-limit");
        assert_eq!(body[0]["price"], "1.5");
        assert_eq!(body[0]["symbol"], "ethusdt");
    }

    #[test]
    fn test_client_id_routes() {
        let m = HuobiDialect
            .cancel_order(&ctx(), "btcusdt", &OrderId::Client("c1".into()))
            .unwrap();
        assert_eq!(m.path.as_deref(), Some("/v1/order/orders/submitCancelClientOrder"));
        assert_eq!(m.params["client-order-id"], "c1");

        let m = HuobiDialect
            .cancel_order(&ctx(), "btcusdt", &OrderId::Exchange("42".into()))
            .unwrap();
        assert!(m.path.is_none());
    }

    #[test]
    fn test_batch_cancel_splits_ids() {
        let ids = [OrderId::Exchange("1".into()), OrderId::Client("c".into())];
        let m = HuobiDialect.batch_cancel_orders(&ctx(), "btcusdt", &ids).unwrap();
        assert_eq!(m.body.unwrap(), json!({"order-ids": ["1"], "client-order-ids": ["c"]}));
    }

    #[test]
    fn test_order_history_default_states() {
        let m = HuobiDialect
            .order_history(&ctx(), "btcusdt", 0, &OrderQueryOptions::default())
            .unwrap();
        assert_eq!(m.params["states"], ALL_ORDER_STATES);
        assert!(!m.params.contains_key("size"));
    }
}
