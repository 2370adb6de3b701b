pub mod builder;

pub use builder::{definition, swap_definition};
