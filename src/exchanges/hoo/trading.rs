use crate::core::errors::ExchangeError;
use crate::core::types::{Order, OrderId, OrderQueryOptions, OrderSide, Params};
use crate::exchanges::dialect::{Dialect, DialectContext, Marshalled, ParamsExt};

pub struct HooDialect;

const fn side_code(side: OrderSide) -> &'static str {
    match side {
        OrderSide::Buy => "1",
        OrderSide::Sell => "-1",
    }
}

fn symbol_params(symbol: &str) -> Params {
    let mut params = Params::new();
    params.put("symbol", symbol);
    params
}

/// Exchange ids go in `order_id`, client ids in `trade_no`.
fn put_order_id(params: &mut Params, order_id: &OrderId) {
    match order_id {
        OrderId::Exchange(id) => params.put("order_id", id),
        OrderId::Client(id) => params.put("trade_no", id),
    }
}

impl Dialect for HooDialect {
    fn place_order(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order: &Order,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        params.put("price", order.price.normalize());
        params.put("quantity", order.amount.normalize());
        params.put("side", side_code(order.side));
        Ok(Marshalled::params(params))
    }

    fn cancel_order(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        put_order_id(&mut params, order_id);
        Ok(Marshalled::params(params))
    }

    fn open_orders(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        _size: u32,
        _options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(symbol_params(symbol)))
    }

    fn order_info(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        put_order_id(&mut params, order_id);
        Ok(Marshalled::params(params))
    }

    fn order_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        params.put_size("pagesize", size);
        params.put_opt("start", options.start_time);
        params.put_opt("end", options.end_time);
        params.put_opt("pagenum", options.page);
        params.put_opt("side", options.side.map(side_code));
        Ok(Marshalled::params(params))
    }
}
