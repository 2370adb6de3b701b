use crate::core::errors::ExchangeError;
use crate::core::types::{
    FundingOptions, Order, OrderId, OrderQueryOptions, OrderType, Params, TimeInForce,
    TransferKind, WithdrawRequest,
};
use crate::exchanges::dialect::{Dialect, DialectContext, Marshalled, ParamsExt};

pub struct BinanceDialect;

fn symbol_params(symbol: &str) -> Params {
    let mut params = Params::new();
    params.put("symbol", symbol);
    params
}

fn put_order_id(params: &mut Params, order_id: &OrderId) {
    match order_id {
        OrderId::Client(id) => params.put("origClientOrderId", id),
        OrderId::Exchange(id) => params.put("orderId", id),
    }
}

impl Dialect for BinanceDialect {
    fn place_order(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order: &Order,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        params.put("side", order.side.as_upper());
        params.put("quantity", order.amount.normalize());
        params.put_opt("newClientOrderId", order.client_order_id.as_deref());

        match order.order_type {
            OrderType::Market => params.put("type", "MARKET"),
            OrderType::Limit => {
                params.put("price", order.price.normalize());
                match order.time_in_force {
                    // maker only orders are a separate type on spot
                    TimeInForce::POC | TimeInForce::GTX => params.put("type", "LIMIT_MAKER"),
                    tif => {
                        params.put("type", "LIMIT");
                        params.put(
                            "timeInForce",
                            match tif {
                                TimeInForce::IOC => "IOC",
                                TimeInForce::FOK => "FOK",
                                _ => "GTC",
                            },
                        );
                    }
                }
            }
        }
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

    fn trade_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        params.put_size("limit", size);
        params.put_opt("startTime", options.start_time);
        params.put_opt("endTime", options.end_time);
        params.put_opt("fromId", options.from_id.as_deref());
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
        params.put_size("limit", size);
        params.put_opt("startTime", options.start_time);
        params.put_opt("endTime", options.end_time);
        params.put_opt("orderId", options.from_id.as_deref());
        Ok(Marshalled::params(params))
    }

    fn deposit_address(
        &self,
        _ctx: &DialectContext<'_>,
        coin: &str,
        options: &FundingOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("coin", coin.to_uppercase());
        params.put_opt("network", options.network.as_deref());
        Ok(Marshalled::params(params))
    }

    fn withdraw(
        &self,
        _ctx: &DialectContext<'_>,
        request: &WithdrawRequest,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("coin", request.coin.to_uppercase());
        params.put("address", &request.address);
        params.put("amount", request.amount.normalize());
        params.put_opt("addressTag", request.address_tag.as_deref());
        params.put_opt("network", request.network.as_deref());
        Ok(Marshalled::params(params))
    }

    fn transfer_records(
        &self,
        _ctx: &DialectContext<'_>,
        _kind: TransferKind,
        coin: &str,
        size: u32,
        options: &FundingOptions,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        if !coin.is_empty() {
            params.put("coin", coin.to_uppercase());
        }
        params.put_size("limit", size);
        params.put_opt("status", options.status.as_deref());
        params.put_opt("startTime", options.start_time);
        params.put_opt("endTime", options.end_time);
        params.put_opt("offset", options.from_id.as_deref());
        Ok(Marshalled::params(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{OrderSide, Symbol};
    use rust_decimal::Decimal;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_limit_order_params() {
        let order = Order::limit(Symbol::new("BTC", "USDT"), dec("25000.50"), dec("0.010"), OrderSide::Buy)
            .with_client_order_id("my-1")
            .with_time_in_force(TimeInForce::IOC);
        let m = BinanceDialect
            .place_order(&DialectContext::default(), "BTCUSDT", &order)
            .unwrap();
        assert_eq!(m.params["symbol"], "BTCUSDT");
        assert_eq!(m.params["side"], "BUY");
        assert_eq!(m.params["type"], "LIMIT");
        assert_eq!(m.params["timeInForce"], "IOC");
        assert_eq!(m.params["price"], "25000.5");
        assert_eq!(m.params["quantity"], "0.01");
        assert_eq!(m.params["newClientOrderId"], "my-1");
    }

    #[test]
    fn test_market_and_maker_orders() {
        let market = Order::market(Symbol::new("BTC", "USDT"), dec("1"), OrderSide::Sell);
        let m = BinanceDialect
            .place_order(&DialectContext::default(), "BTCUSDT", &market)
            .unwrap();
        assert_eq!(m.params["type"], "MARKET");
        assert!(!m.params.contains_key("price"));
        assert!(!m.params.contains_key("timeInForce"));

        let maker = Order::limit(Symbol::new("BTC", "USDT"), dec("1"), dec("1"), OrderSide::Sell)
            .with_time_in_force(TimeInForce::POC);
        let m = BinanceDialect
            .place_order(&DialectContext::default(), "BTCUSDT", &maker)
            .unwrap();
        assert_eq!(m.params["type"], "LIMIT_MAKER");
    }

    #[test]
    fn test_cancel_by_client_id() {
        let m = BinanceDialect
            .cancel_order(
                &DialectContext::default(),
                "ETHUSDT",
                &OrderId::Client("abc".into()),
            )
            .unwrap();
        assert_eq!(m.params["origClientOrderId"], "abc");
        assert!(!m.params.contains_key("orderId"));
    }
}
