pub mod builder;
pub mod trading;

pub use builder::definition;
pub use trading::MxcDialect;
