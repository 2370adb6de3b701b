pub mod core;
pub mod exchanges;
pub mod utils;

pub use crate::core::{
    config::{ConfigError, ExchangeConfig, HttpConfig},
    errors::ExchangeError,
    traits::{AccountInfo, FundingSource, MarketDataSource, OrderPlacer, RawRequest, SpotApi, SwapApi},
    types::*,
};
pub use exchanges::Adapter;
pub use utils::exchange_factory::{AdapterBuilder, ExchangeFactory, ExchangeType, SwapExchangeType};
