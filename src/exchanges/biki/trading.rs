use crate::core::errors::ExchangeError;
use crate::core::types::{LimitOrder, Order, OrderId, OrderQueryOptions, OrderType, Params};
use crate::exchanges::dialect::{
    require_batch, single_symbol, Dialect, DialectContext, Marshalled, ParamsExt,
};
use serde_json::json;

pub struct BikiDialect;

fn symbol_params(symbol: &str) -> Params {
    let mut params = Params::new();
    params.put("symbol", symbol);
    params
}

fn history_params(symbol: &str, size: u32, options: &OrderQueryOptions) -> Params {
    let mut params = symbol_params(symbol);
    params.put_size("pageSize", size);
    params.put_opt("startDate", options.start_time);
    params.put_opt("endDate", options.end_time);
    params.put_opt("page", options.page);
    params
}

impl Dialect for BikiDialect {
    fn place_order(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order: &Order,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        params.put("side", order.side.as_upper());
        params.put("volume", order.amount.normalize());
        match order.order_type {
            OrderType::Limit => {
                params.put("type", "1");
                params.put("price", order.price.normalize());
            }
            OrderType::Market => params.put("type", "2"),
        }
        Ok(Marshalled::params(params))
    }

    fn batch_place_orders(
        &self,
        _ctx: &DialectContext<'_>,
        orders: &[(String, &LimitOrder)],
    ) -> Result<Marshalled, ExchangeError> {
        let symbol = single_symbol(orders)?;
        let batch: Vec<_> = orders
            .iter()
            .map(|(_, order)| {
                json!({
                    "side": order.side.as_upper(),
                    "volume": order.amount.normalize().to_string(),
                    "price": order.price.normalize().to_string(),
                    "type": "1",
                })
            })
            .collect();
        let mut params = symbol_params(symbol);
        params.put("mass_place", serde_json::to_string(&batch)?);
        Ok(Marshalled::params(params))
    }

    fn cancel_order(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        params.put("order_id", order_id.as_str());
        Ok(Marshalled::params(params))
    }

    fn batch_cancel_orders(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order_ids: &[OrderId],
    ) -> Result<Marshalled, ExchangeError> {
        require_batch(order_ids, "cancel")?;
        let ids: Vec<&str> = order_ids.iter().map(OrderId::as_str).collect();
        let mut params = symbol_params(symbol);
        params.put("mass_cancel", format!("[{}]", ids.join(",")));
        Ok(Marshalled::params(params))
    }

    fn cancel_all_orders(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(symbol_params(symbol)))
    }

    fn open_orders(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        params.put_size("pageSize", size);
        params.put_opt("page", options.page);
        Ok(Marshalled::params(params))
    }

    fn order_info(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        params.put("order_id", order_id.as_str());
        Ok(Marshalled::params(params))
    }

    fn trade_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = history_params(symbol, size, options);
        params.put_opt("sort", options.sort.as_deref());
        Ok(Marshalled::params(params))
    }

    fn order_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(history_params(symbol, size, options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{OrderSide, Symbol};
    use rust_decimal::Decimal;

    #[test]
    fn test_order_types() {
        let ctx = DialectContext::default();
        let limit = Order::limit(Symbol::new("btc", "usdt"), Decimal::TEN, Decimal::ONE, OrderSide::Buy);
        let m = BikiDialect.place_order(&ctx, "btcusdt", &limit).unwrap();
        assert_eq!(m.params["type"], "1");
        assert_eq!(m.params["side"], "BUY");
        assert_eq!(m.params["price"], "10");

        let market = Order::market(Symbol::new("btc", "usdt"), Decimal::ONE, OrderSide::Sell);
        let m = BikiDialect.place_order(&ctx, "btcusdt", &market).unwrap();
        assert_eq!(m.params["type"], "2");
        assert!(!m.params.contains_key("price"));
    }

    #[test]
    fn test_mass_cancel_format() {
        let ids = [OrderId::Exchange("11".into()), OrderId::Exchange("12".into())];
        let m = BikiDialect
            .batch_cancel_orders(&DialectContext::default(), "btcusdt", &ids)
            .unwrap();
        assert_eq!(m.params["mass_cancel"], "[11,12]");
        assert_eq!(m.params["symbol"], "btcusdt");
    }

    #[test]
    fn test_mass_place_rejects_mixed_pairs() {
        let ctx = DialectContext::default();
        let btc = LimitOrder::new(Symbol::new("btc", "usdt"), Decimal::TEN, Decimal::ONE, OrderSide::Buy);
        let eth = LimitOrder::new(Symbol::new("eth", "usdt"), Decimal::TWO, Decimal::ONE, OrderSide::Sell);
        let orders = vec![("btcusdt".to_string(), &btc), ("ethusdt".to_string(), &eth)];
        let err = BikiDialect.batch_place_orders(&ctx, &orders).err().unwrap();
        assert!(matches!(err, ExchangeError::Configuration(ref msg) if msg.contains("ethusdt")));

        assert!(BikiDialect.batch_place_orders(&ctx, &[]).is_err());
        assert!(BikiDialect.batch_cancel_orders(&ctx, "btcusdt", &[]).is_err());
    }
}
