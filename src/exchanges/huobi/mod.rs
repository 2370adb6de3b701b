pub mod builder;
pub mod trading;

pub use builder::{coin_swap_definition, definition};
pub use trading::HuobiDialect;
