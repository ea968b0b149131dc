//! Test spec templates
pub mod manager;

pub use manager::*;
