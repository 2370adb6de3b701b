pub mod exchange_factory;

pub use exchange_factory::{AdapterBuilder, ExchangeFactory, ExchangeType, SwapExchangeType};
