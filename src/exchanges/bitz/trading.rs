use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::md5_hex;
use crate::core::types::{
    LimitOrder, Order, OrderId, OrderQueryOptions, OrderSide, OrderType, Params,
};
use crate::exchanges::dialect::{require_batch, Dialect, DialectContext, Marshalled, ParamsExt};
use serde_json::json;

pub struct BitzDialect;

const fn side_code(side: OrderSide) -> &'static str {
    match side {
        OrderSide::Buy => "1",
        OrderSide::Sell => "2",
    }
}

/// Open and historical orders are filtered by `coinFrom`/`coinTo` rather than the pair.
fn order_list_params(symbol: &str, size: u32, options: &OrderQueryOptions) -> Params {
    let mut params = Params::new();
    let (coin_from, coin_to) = symbol.split_once('_').unwrap_or((symbol, ""));
    params.put("coinFrom", coin_from);
    params.put("coinTo", coin_to);
    params.put_size("pageSize", size);
    params.put_opt("type", options.side.map(side_code));
    params.put_opt("page", options.page);
    params.put_opt("startTime", options.start_time);
    params.put_opt("endTime", options.end_time);
    params
}

impl Dialect for BitzDialect {
    fn place_order(
        &self,
        ctx: &DialectContext<'_>,
        symbol: &str,
        order: &Order,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("symbol", symbol);
        params.put("type", side_code(order.side));
        match order.order_type {
            OrderType::Limit => {
                params.put("price", order.price.normalize());
                params.put("number", order.amount.normalize());
            }
            OrderType::Market => params.put("total", order.amount.normalize()),
        }
        params.put("tradePwd", ctx.require_trade_password()?);
        Ok(Marshalled::params(params))
    }

    fn batch_place_orders(
        &self,
        ctx: &DialectContext<'_>,
        orders: &[(String, &LimitOrder)],
    ) -> Result<Marshalled, ExchangeError> {
        require_batch(orders, "order")?;
        // the batch endpoint wants the password hashed
        let trade_password = md5_hex(ctx.require_trade_password()?.as_bytes());
        let batch: Vec<_> = orders
            .iter()
            .map(|(symbol, order)| {
                json!({
                    "coins": symbol,
                    "price": order.price.normalize().to_string(),
                    "number": order.amount.normalize().to_string(),
                    "type": side_code(order.side),
                    "tradepwd": trade_password,
                })
            })
            .collect();
        let mut params = Params::new();
        params.put("tradeData", serde_json::to_string(&batch)?);
        Ok(Marshalled::params(params))
    }

    fn cancel_order(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("entrustSheetId", order_id.as_str());
        Ok(Marshalled::params(params))
    }

    fn batch_cancel_orders(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_ids: &[OrderId],
    ) -> Result<Marshalled, ExchangeError> {
        require_batch(order_ids, "cancel")?;
        let ids: Vec<&str> = order_ids.iter().map(OrderId::as_str).collect();
        let mut params = Params::new();
        params.put("ids", ids.join(","));
        Ok(Marshalled::params(params))
    }

    fn open_orders(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(order_list_params(symbol, size, options)))
    }

    fn order_info(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("entrustSheetId", order_id.as_str());
        Ok(Marshalled::params(params))
    }

    fn order_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(order_list_params(symbol, size, options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Symbol;
    use rust_decimal::Decimal;

    fn ctx() -> DialectContext<'static> {
        DialectContext {
            account_id: None,
            trade_password: Some("123456"),
        }
    }

    #[test]
    fn test_orders_need_trade_password() {
        let order = Order::limit(Symbol::new("eth", "btc"), Decimal::ONE, Decimal::TEN, OrderSide::Sell);
        let err = BitzDialect
            .place_order(&DialectContext::default(), "eth_btc", &order)
            .unwrap_err();
        assert!(matches!(err, ExchangeError::Configuration(_)));

        let m = BitzDialect.place_order(&ctx(), "eth_btc", &order).unwrap();
        assert_eq!(m.params["type"], "2");
        assert_eq!(m.params["number"], "10");
        assert_eq!(m.params["tradePwd"], "123456");
    }

    #[test]
    fn test_market_order_uses_total() {
        let order = Order::market(Symbol::new("eth", "btc"), Decimal::TWO, OrderSide::Buy);
        let m = BitzDialect.place_order(&ctx(), "eth_btc", &order).unwrap();
        assert_eq!(m.params["total"], "2");
        assert!(!m.params.contains_key("price"));
    }

    #[test]
    fn test_batch_hashes_password() {
        let order = LimitOrder::new(Symbol::new("eth", "btc"), Decimal::ONE, Decimal::ONE, OrderSide::Buy);
        let m = BitzDialect
            .batch_place_orders(&ctx(), &[("eth_btc".to_string(), &order)])
            .unwrap();
        let data: serde_json::Value = serde_json::from_str(&m.params["tradeData"]).unwrap();
        assert_eq!(data[0]["coins"], "eth_btc");
        assert_eq!(data[0]["tradepwd"], md5_hex(b"123456"));
    }

    #[test]
    fn test_order_list_splits_pair() {
        let options = OrderQueryOptions {
            page: Some(2),
            ..OrderQueryOptions::default()
        };
        let m = BitzDialect.open_orders(&ctx(), "eth_btc", 20, &options).unwrap();
        assert_eq!(m.params["coinFrom"], "eth");
        assert_eq!(m.params["coinTo"], "btc");
        assert_eq!(m.params["pageSize"], "20");
        assert_eq!(m.params["page"], "2");
    }

    #[test]
    fn test_batch_cancel_joins_ids() {
        let ids = [OrderId::Exchange("1".into()), OrderId::Exchange("2".into())];
        let m = BitzDialect.batch_cancel_orders(&ctx(), "eth_btc", &ids).unwrap();
        assert_eq!(m.params["ids"], "1,2");
    }
}
