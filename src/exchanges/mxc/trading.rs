use crate::core::errors::ExchangeError;
use crate::core::types::{
    partition_ids, Order, OrderId, OrderQueryOptions, OrderSide, Params, TimeInForce,
};
use crate::exchanges::dialect::{require_batch, Dialect, DialectContext, Marshalled, ParamsExt};

pub struct MxcDialect;

const fn trade_type(side: OrderSide) -> &'static str {
    match side {
        OrderSide::Buy => "BID",
        OrderSide::Sell => "ASK",
    }
}

fn id_params(order_ids: &[OrderId]) -> Params {
    let (exchange, client) = partition_ids(order_ids);
    let mut params = Params::new();
    if !exchange.is_empty() {
        params.put("order_ids", exchange.join(","));
    }
    if !client.is_empty() {
        params.put("client_order_ids", client.join(","));
    }
    params
}

fn list_params(symbol: &str, size: u32, options: &OrderQueryOptions) -> Params {
    let mut params = Params::new();
    params.put("symbol", symbol);
    params.put_size("limit", size);
    params.put_opt("start_time", options.start_time);
    params.put_opt("trade_type", options.side.map(trade_type));
    params
}

impl Dialect for MxcDialect {
    fn place_order(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order: &Order,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("symbol", symbol);
        params.put("price", order.price.normalize());
        params.put("quantity", order.amount.normalize());
        params.put("trade_type", trade_type(order.side));
        params.put(
            "order_type",
            match order.time_in_force {
                TimeInForce::IOC | TimeInForce::FOK => "IMMEDIATE_OR_CANCEL",
                TimeInForce::POC | TimeInForce::GTX => "POST_ONLY",
                TimeInForce::GTC => "LIMIT_ORDER",
            },
        );
        params.put_opt("client_order_id", order.client_order_id.as_deref());
        Ok(Marshalled::params(params))
    }

    fn cancel_order(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(id_params(std::slice::from_ref(order_id))))
    }

    fn batch_cancel_orders(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_ids: &[OrderId],
    ) -> Result<Marshalled, ExchangeError> {
        require_batch(order_ids, "cancel")?;
        Ok(Marshalled::params(id_params(order_ids)))
    }

    fn open_orders(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(list_params(symbol, size, options)))
    }

    fn order_info(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("order_ids", order_id.as_str());
        Ok(Marshalled::params(params))
    }

    fn trade_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("symbol", symbol);
        params.put_size("limit", size);
        params.put_opt("start_time", options.start_time);
        Ok(Marshalled::params(params))
    }

    fn order_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = list_params(symbol, size, options);
        params.put_opt("state", options.status.as_deref());
        Ok(Marshalled::params(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Symbol;
    use rust_decimal::Decimal;

    #[test]
    fn test_order_type_from_time_in_force() {
        let order = Order::limit(Symbol::new("mx", "usdt"), Decimal::ONE, Decimal::ONE, OrderSide::Sell)
            .with_time_in_force(TimeInForce::POC);
        let m = MxcDialect
            .place_order(&DialectContext::default(), "MX_USDT", &order)
            .unwrap();
        assert_eq!(m.params["order_type"], "POST_ONLY");
        assert_eq!(m.params["trade_type"], "ASK");
    }

    #[test]
    fn test_cancel_ids() {
        let m = MxcDialect
            .cancel_order(&DialectContext::default(), "MX_USDT", &OrderId::Client("c9".into()))
            .unwrap();
        assert_eq!(m.params["client_order_ids"], "c9");
        assert!(!m.params.contains_key("order_ids"));

        let ids = [OrderId::Exchange("a".into()), OrderId::Exchange("b".into())];
        let m = MxcDialect
            .batch_cancel_orders(&DialectContext::default(), "MX_USDT", &ids)
            .unwrap();
        assert_eq!(m.params["order_ids"], "a,b");
    }
}
