pub mod builder;
pub mod trading;

pub use builder::{coin_swap_definition, definition, usdt_swap_definition};
pub use trading::BinanceDialect;
