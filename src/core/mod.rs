//! Core types and constants for the location calculator

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
