pub mod adapter;
pub mod dialect;
pub mod profile;

pub mod biki;
pub mod binance;
pub mod bitz;
pub mod gate;
pub mod hitbtc;
pub mod hoo;
pub mod huobi;
pub mod mxc;
pub mod okex;
pub mod poloniex;

pub use adapter::Adapter;
