pub mod builder;

pub use builder::definition;
