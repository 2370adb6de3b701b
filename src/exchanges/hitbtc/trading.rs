use crate::core::errors::ExchangeError;
use crate::core::types::{
    FundingOptions, Order, OrderId, OrderQueryOptions, OrderType, Params, TimeInForce,
    TransferKind, WithdrawRequest,
};
use crate::exchanges::dialect::{Dialect, DialectContext, Marshalled, ParamsExt};

pub struct HitbtcDialect;

fn symbol_params(symbol: &str) -> Params {
    let mut params = Params::new();
    params.put("symbol", symbol);
    params
}

fn history_params(symbol: &str, size: u32, options: &OrderQueryOptions) -> Params {
    let mut params = symbol_params(symbol);
    params.put_size("limit", size);
    params.put_opt("from", options.start_time);
    params.put_opt("till", options.end_time);
    params.put_opt("offset", options.offset);
    params
}

impl Dialect for HitbtcDialect {
    fn place_order(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        order: &Order,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = symbol_params(symbol);
        params.put("side", order.side.as_lower());
        params.put("quantity", order.amount.normalize());
        params.put_opt("clientOrderId", order.client_order_id.as_deref());
        match order.order_type {
            OrderType::Market => {
                params.put("type", "market");
                params.put("timeInForce", "GTC");
            }
            OrderType::Limit => {
                params.put("type", "limit");
                params.put("price", order.price.normalize());
                match order.time_in_force {
                    TimeInForce::IOC => params.put("timeInForce", "IOC"),
                    TimeInForce::FOK => params.put("timeInForce", "FOK"),
                    TimeInForce::POC | TimeInForce::GTX => {
                        params.put("timeInForce", "GTC");
                        params.put("postOnly", true);
                    }
                    TimeInForce::GTC => params.put("timeInForce", "GTC"),
                }
            }
        }
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

    // the history endpoint is keyed on the client order id whichever id is given
    fn order_info(
        &self,
        _ctx: &DialectContext<'_>,
        _symbol: &str,
        order_id: &OrderId,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("clientOrderId", order_id.as_str());
        Ok(Marshalled::params(params))
    }

    fn trade_history(
        &self,
        _ctx: &DialectContext<'_>,
        symbol: &str,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::params(history_params(symbol, size, options)))
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

    fn deposit_address(
        &self,
        _ctx: &DialectContext<'_>,
        coin: &str,
        _options: &FundingOptions,
    ) -> Result<Marshalled, ExchangeError> {
        Ok(Marshalled::default().with_path(format!(
            "/api/2/account/crypto/address/{}",
            coin.to_uppercase()
        )))
    }

    fn withdraw(
        &self,
        _ctx: &DialectContext<'_>,
        request: &WithdrawRequest,
    ) -> Result<Marshalled, ExchangeError> {
        let mut params = Params::new();
        params.put("currency", request.coin.to_uppercase());
        params.put("address", &request.address);
        params.put("amount", request.amount.normalize());
        params.put_opt("paymentId", request.address_tag.as_deref());
        params.put_opt("networkFee", request.fee.map(|fee| fee.normalize()));
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
        params.put("currency", coin.to_uppercase());
        params.put("showSenders", true);
        params.put_size("limit", size);
        params.put_opt("from", options.start_time);
        params.put_opt("till", options.end_time);
        params.put_opt("offset", options.from_id.as_deref());
        Ok(Marshalled::params(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{OrderSide, Symbol};
    use rust_decimal::Decimal;

    #[test]
    fn test_market_order_is_gtc() {
        let order = Order::market(Symbol::new("eth", "usdt"), Decimal::new(25, 1), OrderSide::Sell);
        let m = HitbtcDialect
            .place_order(&DialectContext::default(), "ETHUSD", &order)
            .unwrap();
        assert_eq!(m.params["type"], "market");
        assert_eq!(m.params["timeInForce"], "GTC");
        assert_eq!(m.params["side"], "sell");
        assert_eq!(m.params["quantity"], "2.5");
        assert!(!m.params.contains_key("price"));
    }

    #[test]
    fn test_deposit_address_path_uses_upper_coin() {
        let m = HitbtcDialect
            .deposit_address(&DialectContext::default(), "eth", &FundingOptions::default())
            .unwrap();
        assert_eq!(m.path.as_deref(), Some("/api/2/account/crypto/address/ETH"));
    }
}
