use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    HttpTransport, ResponseNormalizer, RestCall, RestClient, RestClientBuilder, RestClientConfig,
};
use crate::core::traits::{
    AccountInfo, FundingSource, MarketDataSource, OrderPlacer, RawRequest, SwapApi,
};
use crate::core::types::{
    ApiResponse, DepthOptions, FundingOptions, KlineInterval, KlineOptions, LimitOrder, Order,
    OrderId, OrderQueryOptions, OrderType, Params, Symbol, TradeOptions, TransferKind,
    WithdrawRequest,
};
use crate::exchanges::dialect::{Dialect, DialectContext, Marshalled, ParamsExt};
use crate::exchanges::profile::{
    clamp_depth, Endpoint, ExchangeDefinition, ExchangeProfile, Operation, PathVars,
};
use async_trait::async_trait;
use reqwest::Method;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A call resolved against the endpoint table, ready to send.
struct Plan<'a> {
    endpoint: &'a Endpoint,
    path: String,
    params: Params,
    body: Option<Value>,
    symbol: Option<String>,
}

/// The one adapter behind every venue, driven by an [`ExchangeDefinition`].
pub struct Adapter {
    profile: ExchangeProfile,
    dialect: Box<dyn Dialect>,
    rest: RestClient,
    normalizer: ResponseNormalizer,
    account_id: Option<String>,
    trade_password: Option<Secret<String>>,
}

impl std::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("exchange", &self.profile.name)
            .field("rest", &self.rest)
            .finish_non_exhaustive()
    }
}

impl Adapter {
    pub fn new(
        definition: ExchangeDefinition,
        config: &ExchangeConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ExchangeError> {
        let ExchangeDefinition {
            profile,
            dialect,
            signer,
        } = definition;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| profile.base_url.to_string());
        let rest_config = RestClientConfig::new(base_url, profile.name.to_string())
            .with_post_encoding(profile.post_encoding)
            .with_delete_encoding(profile.delete_encoding);
        let mut builder = RestClientBuilder::new(rest_config).with_transport(transport);
        if let Some(signer) = signer {
            builder = builder.with_signer(signer);
        }

        Ok(Self {
            normalizer: ResponseNormalizer::new(profile.shape.clone()),
            rest: builder.build()?,
            profile,
            dialect,
            account_id: config.account_id.clone(),
            trade_password: config.passphrase.clone(),
        })
    }

    pub const fn profile(&self) -> &ExchangeProfile {
        &self.profile
    }

    /// The instrument id this venue uses for `symbol`.
    pub fn format_symbol(&self, symbol: &Symbol) -> String {
        self.profile.symbol_format.apply(symbol)
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.profile.endpoints.supports(operation)
    }

    fn context(&self) -> DialectContext<'_> {
        DialectContext {
            account_id: self.account_id.as_deref(),
            trade_password: self.trade_password.as_ref().map(|p| p.expose_secret().as_str()),
        }
    }

    fn endpoint(&self, operation: Operation) -> Result<&Endpoint, ExchangeError> {
        self.profile.endpoints.get(operation).ok_or_else(|| {
            debug!(exchange = self.profile.name, operation = operation.name(), "unsupported operation");
            ExchangeError::unsupported(operation.name())
        })
    }

    fn plan<'a>(
        &self,
        endpoint: &'a Endpoint,
        vars: PathVars<'_>,
        marshalled: Marshalled,
    ) -> Result<Plan<'a>, ExchangeError> {
        let path = match marshalled.path {
            Some(path) => path,
            None => endpoint.render(&vars)?,
        };
        let mut params: Params = endpoint
            .fixed
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        params.extend(marshalled.params);

        Ok(Plan {
            endpoint,
            path,
            params,
            body: marshalled.body,
            symbol: vars.symbol.map(str::to_string),
        })
    }

    async fn run(&self, plan: Result<Plan<'_>, ExchangeError>) -> ApiResponse {
        let plan = match plan {
            Ok(plan) => plan,
            Err(err) => return ApiResponse::from_error(&err),
        };
        let mut call = RestCall::new(
            plan.endpoint.method.clone(),
            plan.path,
            plan.params,
            plan.endpoint.signed,
        );
        call.body = plan.body;

        let timed = self.rest.send(call).await;
        self.normalizer.normalize(
            timed.outcome,
            plan.endpoint.unwrap,
            plan.symbol.as_deref(),
            timed.started_at_ms,
            timed.finished_at_ms,
        )
    }

    fn symbol_params(&self, endpoint: &Endpoint, symbol: &str) -> Params {
        let mut params = Params::new();
        if let (true, Some(key)) = (endpoint.symbol_param, self.profile.market.symbol) {
            params.put(key, symbol);
        }
        params
    }

    // market data

    fn plan_listing(&self, operation: Operation) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(operation)?;
        self.plan(endpoint, PathVars::default(), Marshalled::default())
    }

    fn plan_depth(
        &self,
        symbol: &Symbol,
        size: u32,
        options: &DepthOptions,
    ) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::Depth)?;
        let formatted = self.format_symbol(symbol);
        let market = &self.profile.market;
        let mut params = self.symbol_params(endpoint, &formatted);
        if let Some(key) = market.depth_size {
            if !self.profile.depth_buckets.is_empty() {
                params.put(key, clamp_depth(size, self.profile.depth_buckets));
            } else if market.depth_size_required {
                params.put(key, size);
            } else {
                params.put_size(key, size);
            }
        }
        if let Some(key) = market.depth_aggregation {
            let aggregation = options
                .aggregation
                .as_deref()
                .or(market.depth_aggregation_default);
            params.put_opt(key, aggregation);
        }
        self.plan(endpoint, symbol_vars(&formatted), Marshalled::params(params))
    }

    fn plan_ticker(&self, symbol: &Symbol) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::Ticker)?;
        let formatted = self.format_symbol(symbol);
        let params = self.symbol_params(endpoint, &formatted);
        self.plan(endpoint, symbol_vars(&formatted), Marshalled::params(params))
    }

    fn plan_kline(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        size: u32,
        options: &KlineOptions,
    ) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::Kline)?;
        let formatted = self.format_symbol(symbol);
        let market = &self.profile.market;
        let mut params = self.symbol_params(endpoint, &formatted);
        params.put(market.kline_interval, self.profile.klines.resolve(interval));
        if let Some(key) = market.kline_size {
            params.put_size(key, size);
        }
        if let Some(key) = market.kline_start {
            params.put_opt(key, options.start_time);
        }
        if let Some(key) = market.kline_end {
            params.put_opt(key, options.end_time);
        }
        self.plan(endpoint, symbol_vars(&formatted), Marshalled::params(params))
    }

    fn plan_trade(
        &self,
        symbol: &Symbol,
        size: u32,
        options: &TradeOptions,
    ) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::Trade)?;
        let formatted = self.format_symbol(symbol);
        let market = &self.profile.market;
        let mut params = self.symbol_params(endpoint, &formatted);
        if let Some(key) = market.trade_size {
            params.put_size(key, size);
        }
        if let Some(key) = market.trade_from_id {
            params.put_opt(key, options.from_id.as_deref());
        }
        if let Some(key) = market.trade_start {
            params.put_opt(key, options.start_time);
        }
        if let Some(key) = market.trade_end {
            params.put_opt(key, options.end_time);
        }
        self.plan(endpoint, symbol_vars(&formatted), Marshalled::params(params))
    }

    fn plan_premium_index(&self, symbol: Option<&Symbol>) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::PremiumIndex)?;
        let formatted = symbol.map(|s| self.format_symbol(s));
        let params = formatted
            .as_deref()
            .map(|s| self.symbol_params(endpoint, s))
            .unwrap_or_default();
        let vars = PathVars {
            symbol: formatted.as_deref(),
            ..PathVars::default()
        };
        self.plan(endpoint, vars, Marshalled::params(params))
    }

    // trading and account

    fn plan_balance(&self) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::Balance)?;
        let ctx = self.context();
        let marshalled = self.dialect.balance(&ctx)?;
        let vars = PathVars {
            account_id: ctx.account_id,
            ..PathVars::default()
        };
        self.plan(endpoint, vars, marshalled)
    }

    fn plan_order(&self, order: &Order) -> Result<Plan<'_>, ExchangeError> {
        let operation = match order.order_type {
            OrderType::Limit => Operation::LimitOrder,
            OrderType::Market => Operation::MarketOrder,
        };
        let endpoint = self.endpoint(operation)?;
        let formatted = self.format_symbol(&order.symbol);
        let marshalled = self.dialect.place_order(&self.context(), &formatted, order)?;
        self.plan(endpoint, symbol_vars(&formatted), marshalled)
    }

    fn plan_batch_orders(&self, orders: &[LimitOrder]) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::BatchLimitOrder)?;
        let formatted: Vec<(String, &LimitOrder)> = orders
            .iter()
            .map(|order| (self.format_symbol(&order.symbol), order))
            .collect();
        let marshalled = self.dialect.batch_place_orders(&self.context(), &formatted)?;
        let first = formatted.first().map(|(symbol, _)| symbol.as_str());
        let vars = PathVars {
            symbol: first,
            ..PathVars::default()
        };
        self.plan(endpoint, vars, marshalled)
    }

    fn plan_cancel(&self, symbol: &Symbol, order_id: &OrderId) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::CancelOrder)?;
        let formatted = self.format_symbol(symbol);
        let marshalled = self
            .dialect
            .cancel_order(&self.context(), &formatted, order_id)?;
        self.plan(endpoint, order_vars(&formatted, order_id), marshalled)
    }

    fn plan_batch_cancel(
        &self,
        symbol: &Symbol,
        order_ids: &[OrderId],
    ) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::BatchCancelOrder)?;
        let formatted = self.format_symbol(symbol);
        let marshalled = self
            .dialect
            .batch_cancel_orders(&self.context(), &formatted, order_ids)?;
        self.plan(endpoint, symbol_vars(&formatted), marshalled)
    }

    fn plan_cancel_all(&self, symbol: &Symbol) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::CancelAllOrders)?;
        let formatted = self.format_symbol(symbol);
        let marshalled = self.dialect.cancel_all_orders(&self.context(), &formatted)?;
        self.plan(endpoint, symbol_vars(&formatted), marshalled)
    }

    fn plan_order_query(
        &self,
        operation: Operation,
        symbol: &Symbol,
        size: u32,
        options: &OrderQueryOptions,
    ) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(operation)?;
        let formatted = self.format_symbol(symbol);
        let ctx = self.context();
        let marshalled = match operation {
            Operation::OpenOrders => self.dialect.open_orders(&ctx, &formatted, size, options)?,
            Operation::TradeHistory => {
                self.dialect
                    .trade_history(&ctx, &formatted, size, options)?
            }
            _ => self
                .dialect
                .order_history(&ctx, &formatted, size, options)?,
        };
        self.plan(endpoint, symbol_vars(&formatted), marshalled)
    }

    fn plan_order_info(
        &self,
        symbol: &Symbol,
        order_id: &OrderId,
    ) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::OrderInfo)?;
        let formatted = self.format_symbol(symbol);
        let marshalled = self
            .dialect
            .order_info(&self.context(), &formatted, order_id)?;
        self.plan(endpoint, order_vars(&formatted, order_id), marshalled)
    }

    // funding

    fn plan_deposit_address(
        &self,
        coin: &str,
        options: &FundingOptions,
    ) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::DepositAddress)?;
        let marshalled = self
            .dialect
            .deposit_address(&self.context(), coin, options)?;
        self.plan(endpoint, coin_vars(coin), marshalled)
    }

    fn plan_withdraw(&self, request: &WithdrawRequest) -> Result<Plan<'_>, ExchangeError> {
        let endpoint = self.endpoint(Operation::Withdraw)?;
        let marshalled = self.dialect.withdraw(&self.context(), request)?;
        self.plan(endpoint, coin_vars(&request.coin), marshalled)
    }

    fn plan_transfers(
        &self,
        kind: TransferKind,
        coin: &str,
        size: u32,
        options: &FundingOptions,
    ) -> Result<Plan<'_>, ExchangeError> {
        let operation = match kind {
            TransferKind::Deposit => Operation::DepositRecords,
            TransferKind::Withdraw => Operation::WithdrawRecords,
        };
        let endpoint = self.endpoint(operation)?;
        let marshalled = self
            .dialect
            .transfer_records(&self.context(), kind, coin, size, options)?;
        self.plan(endpoint, coin_vars(coin), marshalled)
    }

    /// Send an arbitrary endpoint through the sign/send/normalize pipeline.
    #[instrument(skip(self, params), fields(exchange = %self.profile.name))]
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        params: Params,
        signed: bool,
    ) -> ApiResponse {
        let timed = self.rest.send(RestCall::new(method, path, params, signed)).await;
        self.normalizer.normalize(
            timed.outcome,
            crate::core::kernel::Unwrap::None,
            None,
            timed.started_at_ms,
            timed.finished_at_ms,
        )
    }
}

fn symbol_vars(symbol: &str) -> PathVars<'_> {
    PathVars {
        symbol: Some(symbol),
        ..PathVars::default()
    }
}

fn order_vars<'a>(symbol: &'a str, order_id: &'a OrderId) -> PathVars<'a> {
    PathVars {
        symbol: Some(symbol),
        order_id: Some(order_id.as_str()),
        ..PathVars::default()
    }
}

fn coin_vars(coin: &str) -> PathVars<'_> {
    PathVars {
        coin: Some(coin),
        ..PathVars::default()
    }
}

#[async_trait]
impl MarketDataSource for Adapter {
    fn exchange_name(&self) -> &str {
        self.profile.name
    }

    async fn get_coin_list(&self) -> ApiResponse {
        self.run(self.plan_listing(Operation::CoinList)).await
    }

    async fn get_symbol_list(&self) -> ApiResponse {
        self.run(self.plan_listing(Operation::SymbolList)).await
    }

    async fn get_depth(&self, symbol: &Symbol, size: u32, options: &DepthOptions) -> ApiResponse {
        self.run(self.plan_depth(symbol, size, options)).await
    }

    async fn get_ticker(&self, symbol: &Symbol) -> ApiResponse {
        self.run(self.plan_ticker(symbol)).await
    }

    async fn get_kline(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        size: u32,
        options: &KlineOptions,
    ) -> ApiResponse {
        self.run(self.plan_kline(symbol, interval, size, options))
            .await
    }

    async fn get_trade(&self, symbol: &Symbol, size: u32, options: &TradeOptions) -> ApiResponse {
        self.run(self.plan_trade(symbol, size, options)).await
    }
}

#[async_trait]
impl OrderPlacer for Adapter {
    async fn place_order(&self, order: &Order) -> ApiResponse {
        self.run(self.plan_order(order)).await
    }

    async fn batch_place_limit_order(&self, orders: &[LimitOrder]) -> ApiResponse {
        self.run(self.plan_batch_orders(orders)).await
    }

    async fn cancel_order(&self, symbol: &Symbol, order_id: &OrderId) -> ApiResponse {
        self.run(self.plan_cancel(symbol, order_id)).await
    }

    async fn batch_cancel_order(&self, symbol: &Symbol, order_ids: &[OrderId]) -> ApiResponse {
        self.run(self.plan_batch_cancel(symbol, order_ids)).await
    }

    async fn cancel_all_orders(&self, symbol: &Symbol) -> ApiResponse {
        self.run(self.plan_cancel_all(symbol)).await
    }
}

#[async_trait]
impl AccountInfo for Adapter {
    async fn get_user_balance(&self) -> ApiResponse {
        self.run(self.plan_balance()).await
    }

    async fn get_user_open_orders(
        &self,
        symbol: &Symbol,
        size: u32,
        options: &OrderQueryOptions,
    ) -> ApiResponse {
        self.run(self.plan_order_query(Operation::OpenOrders, symbol, size, options))
            .await
    }

    async fn get_user_order_info(&self, symbol: &Symbol, order_id: &OrderId) -> ApiResponse {
        self.run(self.plan_order_info(symbol, order_id)).await
    }

    async fn get_user_trade_history(
        &self,
        symbol: &Symbol,
        size: u32,
        options: &OrderQueryOptions,
    ) -> ApiResponse {
        self.run(self.plan_order_query(Operation::TradeHistory, symbol, size, options))
            .await
    }

    async fn get_user_order_history(
        &self,
        symbol: &Symbol,
        size: u32,
        options: &OrderQueryOptions,
    ) -> ApiResponse {
        self.run(self.plan_order_query(Operation::OrderHistory, symbol, size, options))
            .await
    }
}

#[async_trait]
impl FundingSource for Adapter {
    async fn get_deposit_address(&self, coin: &str, options: &FundingOptions) -> ApiResponse {
        self.run(self.plan_deposit_address(coin, options)).await
    }

    async fn withdraw(&self, request: &WithdrawRequest) -> ApiResponse {
        self.run(self.plan_withdraw(request)).await
    }

    async fn get_deposit_records(
        &self,
        coin: &str,
        size: u32,
        options: &FundingOptions,
    ) -> ApiResponse {
        self.run(self.plan_transfers(TransferKind::Deposit, coin, size, options))
            .await
    }

    async fn get_withdraw_records(
        &self,
        coin: &str,
        size: u32,
        options: &FundingOptions,
    ) -> ApiResponse {
        self.run(self.plan_transfers(TransferKind::Withdraw, coin, size, options))
            .await
    }
}

#[async_trait]
impl RawRequest for Adapter {
    async fn generic_http_request(
        &self,
        path: &str,
        method: Method,
        params: Params,
        signed: bool,
    ) -> ApiResponse {
        self.request(path, method, params, signed).await
    }
}

#[async_trait]
impl SwapApi for Adapter {
    fn exchange_name(&self) -> &str {
        self.profile.name
    }

    async fn get_contract_list(&self) -> ApiResponse {
        self.run(self.plan_listing(Operation::ContractList)).await
    }

    async fn get_depth(&self, symbol: &Symbol, size: u32, options: &DepthOptions) -> ApiResponse {
        self.run(self.plan_depth(symbol, size, options)).await
    }

    async fn get_ticker(&self, symbol: &Symbol) -> ApiResponse {
        self.run(self.plan_ticker(symbol)).await
    }

    async fn get_kline(
        &self,
        symbol: &Symbol,
        interval: KlineInterval,
        size: u32,
        options: &KlineOptions,
    ) -> ApiResponse {
        self.run(self.plan_kline(symbol, interval, size, options))
            .await
    }

    async fn get_trade(&self, symbol: &Symbol, size: u32, options: &TradeOptions) -> ApiResponse {
        self.run(self.plan_trade(symbol, size, options)).await
    }

    async fn get_premium_index(&self, symbol: Option<&Symbol>) -> ApiResponse {
        self.run(self.plan_premium_index(symbol)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::{HttpRequest, HttpResponse};
    use crate::exchanges::{binance, gate, huobi, okex, poloniex};

    struct Offline;

    #[async_trait]
    impl HttpTransport for Offline {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ExchangeError> {
            Err(ExchangeError::Transport("offline".to_string()))
        }
    }

    fn adapter(definition: ExchangeDefinition, config: &ExchangeConfig) -> Adapter {
        Adapter::new(definition, config, Arc::new(Offline)).unwrap()
    }

    #[test]
    fn test_missing_endpoint_is_unsupported() {
        let config = ExchangeConfig::read_only();
        let binance = adapter(binance::definition(&config), &config);
        let err = binance.plan_batch_cancel(&Symbol::new("btc", "usdt"), &[]).err().unwrap();
        assert!(matches!(err, ExchangeError::Unsupported(ref op) if op == "batch_cancel_order"));
        assert!(!binance.supports(Operation::BatchCancelOrder));
    }

    #[test]
    fn test_depth_plan_fills_aggregation_default() {
        let config = ExchangeConfig::read_only();
        let huobi = adapter(huobi::definition(&config), &config);
        let plan = huobi
            .plan_depth(&Symbol::new("BTC", "USDT"), 7, &DepthOptions::default())
            .unwrap();
        assert_eq!(plan.params["symbol"], "btcusdt");
        assert_eq!(plan.params["depth"], "10");
        assert_eq!(plan.params["type"], "step0");

        let options = DepthOptions {
            aggregation: Some("step2".to_string()),
        };
        let plan = huobi.plan_depth(&Symbol::new("BTC", "USDT"), 7, &options).unwrap();
        assert_eq!(plan.params["type"], "step2");
    }

    #[test]
    fn test_zero_depth_without_buckets_sends_no_size() {
        let config = ExchangeConfig::read_only();
        let gate = adapter(gate::definition(&config), &config);
        let btc = Symbol::new("btc", "usdt");
        let plan = gate.plan_depth(&btc, 0, &DepthOptions::default()).unwrap();
        assert!(!plan.params.contains_key("limit"));
        let plan = gate.plan_depth(&btc, 30, &DepthOptions::default()).unwrap();
        assert_eq!(plan.params["limit"], "30");
    }

    #[test]
    fn test_okex_always_sends_depth_size() {
        let config = ExchangeConfig::read_only();
        let okex = adapter(okex::definition(&config), &config);
        let plan = okex
            .plan_depth(&Symbol::new("btc", "usdt"), 0, &DepthOptions::default())
            .unwrap();
        assert_eq!(plan.params["size"], "0");
    }

    #[test]
    fn test_symbol_in_path_not_params() {
        let config = ExchangeConfig::read_only();
        let okex = adapter(okex::definition(&config), &config);
        let plan = okex.plan_ticker(&Symbol::new("btc", "usdt")).unwrap();
        assert_eq!(plan.path, "/api/spot/v3/instruments/BTC-USDT/ticker");
        assert!(plan.params.is_empty());
    }

    #[test]
    fn test_fixed_params_merge_with_dialect_params() {
        let config = ExchangeConfig::new("k".to_string(), "s".to_string());
        let poloniex = adapter(poloniex::definition(&config), &config);
        let plan = poloniex
            .plan_cancel(&Symbol::new("btc", "usdt"), &OrderId::Exchange("77".to_string()))
            .unwrap();
        assert_eq!(plan.params["command"], "cancelOrder");
        assert_eq!(plan.params["orderNumber"], "77");
        assert_eq!(plan.symbol.as_deref(), Some("USDT_BTC"));
    }

    #[test]
    fn test_balance_without_account_id() {
        let config = ExchangeConfig::new("k".to_string(), "s".to_string());
        let huobi = adapter(huobi::definition(&config), &config);
        let err = huobi.plan_balance().err().unwrap();
        assert!(matches!(err, ExchangeError::Configuration(_)));
    }

    #[test]
    fn test_every_interval_resolves() {
        let config = ExchangeConfig::read_only();
        for definition in [
            binance::definition(&config),
            huobi::definition(&config),
            okex::definition(&config),
            poloniex::definition(&config),
        ] {
            let klines = definition.profile.klines;
            for interval in KlineInterval::all() {
                assert!(!klines.resolve(interval).is_empty(), "{} {}", definition.profile.name, interval);
            }
        }
    }

    #[tokio::test]
    async fn test_transport_failure_envelope() {
        let config = ExchangeConfig::read_only();
        let binance = adapter(binance::definition(&config), &config);
        let response = MarketDataSource::get_ticker(&binance, &Symbol::new("btc", "usdt")).await;
        assert_eq!(response.code(), 1001);
        assert_eq!(response.error(), "offline");
    }
}
