use crate::core::errors::ExchangeError;
use crate::core::types::{Order, OrderId, OrderQueryOptions, OrderSide, Params, TimeInForce};
use crate::exchanges::dialect::{Dialect, DialectContext, Marshalled, ParamsExt};

pub struct PoloniexDialect;

fn pair_params(symbol: &str) -> Params {
    let mut params = Params::new();
    params.put("currencyPair", symbol);
    params
}

impl Dialect for PoloniexDialect {
    fn place_order(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order: &Order,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = pair_params(symbol);
        params.put(
            "command",
            match order.side {
                OrderSide::Buy => "buy",
                OrderSide::Sell => "sell",
            },
        );
        params.put("rate", order.price.normalize());
        params.put("amount", order.amount.normalize());
        match order.time_in_force {
            TimeInForce::IOC => params.put("immediateOrCancel", 1),
            TimeInForce::FOK => params.put("fillOrKill", 1),
            TimeInForce::POC | TimeInForce::GTX => params.put("postOnly", 1),
            TimeInForce::GTC => {}
        }
        params.put_opt("clientOrderId", order.client_order_id.as_deref());
        Ok(Marshalled::params(params))
    }

    fn cancel_order(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        match order_id {
            OrderId::Client(id) => params.put("clientOrderId", id),
            OrderId::Exchange(id) => params.put("orderNumber", id),
        }
        Ok(Marshalled::params(params))
    }

    fn open_orders(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        _size: u32,
        _options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(pair_params(symbol)))
    }

    fn order_info(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("orderNumber", order_id.as_str());
        Ok(Marshalled::params(params))
    }

    fn trade_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = pair_params(symbol);
        params.put_size("limit", size);
        params.put_opt("start", options.start_time);
        params.put_opt("end", options.end_time);
        Ok(Marshalled::params(params))
    }
}
