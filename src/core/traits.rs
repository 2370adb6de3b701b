use crate::core::types::{
    ApiResponse, DepthOptions, FundingOptions, KlineInterval, KlineOptions, LimitOrder, Order,
    OrderId, OrderQueryOptions, OrderSide, Params, Symbol, TradeOptions, WithdrawRequest,
};
use async_trait::async_trait;
use reqwest::Method;
use rust_decimal::Decimal;

// Every operation returns the canonical envelope. Failures, including operations a venue
// does not offer, are reported through its `code`.

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    fn exchange_name(&self) -> &str;

    async fn get_coin_list(&self) -> ApiResponse;

    async fn get_symbol_list(&self) -> ApiResponse;

    /// Order book; `size` is rounded up to the venue's nearest allowed depth.
    async fn get_depth(&self, symbol: &Symbol, size: u32, options: &DepthOptions) -> ApiResponse;

    async fn get_ticker(&self, symbol: &Symbol) -> ApiResponse;

    /// Candles; an interval the venue lacks falls back to its smallest one.
    async fn get_kline(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        size: u32,
        options: &KlineOptions,
    ) -> ApiResponse;

    async fn get_trade(&self, symbol: &Symbol, size: u32, options: &TradeOptions) -> ApiResponse;
}

#[async_trait]
pub trait OrderPlacer: Send + Sync {
    async fn place_order(&self, order: &Order) -> ApiResponse;

    async fn place_limit_order(
        &self,
        symbol: &Symbol,
        price: Decimal,
        amount: Decimal,
        side: OrderSide,
        client_order_id: Option<&str>,
    ) -> ApiResponse {
        let mut order = Order::limit(symbol.clone(), price, amount, side);
        order.client_order_id = client_order_id.map(str::to_string);
        self.place_order(&order).await
    }

    async fn place_market_order(
        &self,
        symbol: &Symbol,
        amount: Decimal,
        side: OrderSide,
        client_order_id: Option<&str>,
    ) -> ApiResponse {
        let mut order = Order::market(symbol.clone(), amount, side);
        order.client_order_id = client_order_id.map(str::to_string);
        self.place_order(&order).await
    }

    async fn batch_place_limit_order(&self, orders: &[LimitOrder]) -> ApiResponse;

    async fn cancel_order(&self, symbol: &Symbol, order_id: &OrderId) -> ApiResponse;

    async fn batch_cancel_order(&self, symbol: &Symbol, order_ids: &[OrderId]) -> ApiResponse;

    async fn cancel_all_orders(&self, symbol: &Symbol) -> ApiResponse;
}

#[async_trait]
pub trait AccountInfo: Send + Sync {
    async fn get_user_balance(&self) -> ApiResponse;

    async fn get_user_open_orders(
        &self,
        symbol: &Symbol,
        size: u32,
        options: &OrderQueryOptions,
    ) -> ApiResponse;

    async fn get_user_order_info(&self, symbol: &Symbol, order_id: &OrderId) -> ApiResponse;

    async fn get_user_trade_history(
        &self,
        symbol: &Symbol,
        size: u32,
        options: &OrderQueryOptions,
    ) -> ApiResponse;

    async fn get_user_order_history(
        &self,
        symbol: &Symbol,
        size: u32,
        options: &OrderQueryOptions,
    ) -> ApiResponse;
}

#[async_trait]
pub trait FundingSource: Send + Sync {
    async fn get_deposit_address(&self, coin: &str, options: &FundingOptions) -> ApiResponse;

    async fn withdraw(&self, request: &WithdrawRequest) -> ApiResponse;

    async fn get_deposit_records(&self, coin: &str, size: u32, options: &FundingOptions)
        -> ApiResponse;

    async fn get_withdraw_records(
        &self,
        coin: &str,
        size: u32,
        options: &FundingOptions,
    ) -> ApiResponse;
}

#[async_trait]
pub trait RawRequest: Send + Sync {
    /// Run an endpoint that has no dedicated method through the same sign/send/normalize path.
    async fn generic_http_request(
        &self,
        path: &str,
        method: Method,
        params: Params,
        signed: bool,
    ) -> ApiResponse;
}

/// The full spot trading interface.
pub trait SpotApi: MarketDataSource + OrderPlacer + AccountInfo + FundingSource + RawRequest {}

impl<T> SpotApi for T where T: MarketDataSource + OrderPlacer + AccountInfo + FundingSource + RawRequest
{}

/// Perpetual swap market data.
#[async_trait]
pub trait SwapApi: RawRequest {
    fn exchange_name(&self) -> &str;

    async fn get_contract_list(&self) -> ApiResponse;

    async fn get_depth(&self, symbol: &Symbol, size: u32, options: &DepthOptions) -> ApiResponse;

    async fn get_ticker(&self, symbol: &Symbol) -> ApiResponse;

    async fn get_kline(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        size: u32,
        options: &KlineOptions,
    ) -> ApiResponse;

    async fn get_trade(&self, symbol: &Symbol, size: u32, options: &TradeOptions) -> ApiResponse;

    /// Mark price and funding; `None` asks for every contract where the venue allows it.
    async fn get_premium_index(&self, symbol: Option<&Symbol>) -> ApiResponse;
}
