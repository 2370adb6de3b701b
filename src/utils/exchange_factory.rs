use crate::core::config::{ConfigError, ExchangeConfig, HttpConfig};
use crate::core::kernel::{HttpTransport, ReqwestTransport};
use crate::core::traits::{SpotApi, SwapApi};
use crate::exchanges::profile::ExchangeDefinition;
use crate::exchanges::{
    biki, binance, bitz, gate, hitbtc, hoo, huobi, mxc, okex, poloniex, Adapter,
};
use secrecy::Secret;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Supported spot exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeType {
    Binance,
    Huobi,
    Okex,
    Gate,
    Bitz,
    Biki,
    Mxc,
    Hoo,
    Poloniex,
    Hitbtc,
}

impl ExchangeType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Binance => binance::builder::NAME,
            Self::Huobi => huobi::builder::NAME,
            Self::Okex => okex::builder::NAME,
            Self::Gate => gate::builder::NAME,
            Self::Bitz => bitz::builder::NAME,
            Self::Biki => biki::builder::NAME,
            Self::Mxc => mxc::builder::NAME,
            Self::Hoo => hoo::builder::NAME,
            Self::Poloniex => poloniex::builder::NAME,
            Self::Hitbtc => hitbtc::builder::NAME,
        }
    }

    fn definition(self, config: &ExchangeConfig) -> ExchangeDefinition {
        match self {
            Self::Binance => binance::definition(config),
            Self::Huobi => huobi::definition(config),
            Self::Okex => okex::definition(config),
            Self::Gate => gate::definition(config),
            Self::Bitz => bitz::definition(config),
            Self::Biki => biki::definition(config),
            Self::Mxc => mxc::definition(config),
            Self::Hoo => hoo::definition(config),
            Self::Poloniex => poloniex::definition(config),
            Self::Hitbtc => hitbtc::definition(config),
        }
    }
}

impl fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExchangeType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExchangeFactory::get_available_exchanges()
            .into_iter()
            .find(|exchange| exchange.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownExchange(s.to_string()))
    }
}

/// Supported perpetual swap products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapExchangeType {
    BinanceUsdt,
    BinanceCoin,
    HuobiCoin,
    Okex,
}

impl SwapExchangeType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::BinanceUsdt => binance::builder::USDT_SWAP_NAME,
            Self::BinanceCoin => binance::builder::COIN_SWAP_NAME,
            Self::HuobiCoin => huobi::builder::COIN_SWAP_NAME,
            Self::Okex => okex::builder::SWAP_NAME,
        }
    }

    fn definition(self, config: &ExchangeConfig) -> ExchangeDefinition {
        match self {
            Self::BinanceUsdt => binance::usdt_swap_definition(config),
            Self::BinanceCoin => binance::coin_swap_definition(config),
            Self::HuobiCoin => huobi::coin_swap_definition(config),
            Self::Okex => okex::swap_definition(config),
        }
    }
}

impl fmt::Display for SwapExchangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SwapExchangeType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExchangeFactory::get_available_swaps()
            .into_iter()
            .find(|exchange| exchange.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownExchange(s.to_string()))
    }
}

/// Factory for listing what can be built
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Get available spot exchange types
    pub fn get_available_exchanges() -> Vec<ExchangeType> {
        vec![
            ExchangeType::Binance,
            ExchangeType::Huobi,
            ExchangeType::Okex,
            ExchangeType::Gate,
            ExchangeType::Bitz,
            ExchangeType::Biki,
            ExchangeType::Mxc,
            ExchangeType::Hoo,
            ExchangeType::Poloniex,
            ExchangeType::Hitbtc,
        ]
    }

    /// Get available swap products
    pub fn get_available_swaps() -> Vec<SwapExchangeType> {
        vec![
            SwapExchangeType::BinanceUsdt,
            SwapExchangeType::BinanceCoin,
            SwapExchangeType::HuobiCoin,
            SwapExchangeType::Okex,
        ]
    }
}

/// Collects credentials and HTTP settings, then builds adapters by exchange name.
///
/// ```no_run
/// use coinbridge::AdapterBuilder;
///
/// let spot = AdapterBuilder::new()
///     .api_key("key")
///     .secret_key("secret")
///     .build("binance")?;
/// # Ok::<(), coinbridge::core::config::ConfigError>(())
/// ```
pub struct AdapterBuilder {
    config: ExchangeConfig,
    http: HttpConfig,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl fmt::Debug for AdapterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterBuilder")
            .field("config", &self.config)
            .field("http", &self.http)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

impl Default for AdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::read_only(),
            http: HttpConfig::default(),
            transport: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Secret::new(api_key.into());
        self
    }

    #[must_use]
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.config.secret_key = Secret::new(secret_key.into());
        self
    }

    #[must_use]
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.config.passphrase = Some(Secret::new(passphrase.into()));
        self
    }

    #[must_use]
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.config.account_id = Some(account_id.into());
        self
    }

    /// Overrides the exchange's default base URL.
    #[must_use]
    pub fn endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    #[must_use]
    pub fn http_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.http = self.http.with_proxy(proxy.into());
        self
    }

    #[must_use]
    pub fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Replaces the reqwest transport, mostly for tests.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(&self, name: &str) -> Result<Box<dyn SpotApi>, ConfigError> {
        let exchange: ExchangeType = name.parse()?;
        let adapter = self.adapter(exchange.definition(&self.config))?;
        Ok(Box::new(adapter))
    }

    pub fn build_swap(&self, name: &str) -> Result<Box<dyn SwapApi>, ConfigError> {
        let exchange: SwapExchangeType = name.parse()?;
        let adapter = self.adapter(exchange.definition(&self.config))?;
        Ok(Box::new(adapter))
    }

    fn adapter(&self, definition: ExchangeDefinition) -> Result<Adapter, ConfigError> {
        let transport: Arc<dyn HttpTransport> = match &self.transport {
            Some(transport) => Arc::clone(transport),
            None => Arc::new(
                ReqwestTransport::new(&self.http)
                    .map_err(|e| ConfigError::InvalidConfiguration(e.to_string()))?,
            ),
        };
        Adapter::new(definition, &self.config, transport)
            .map_err(|e| ConfigError::InvalidConfiguration(e.to_string()))
    }
}
