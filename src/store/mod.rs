//! Persistence boundary for verification state
//!
//! The calculator never owns storage. It writes verification stamps through
//! the `LocationStore` trait; `MemoryLocationStore` is provided for tests and
//! the demo binary.

pub mod error;
pub mod location_store;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use location_store::{LocationStore, StoreEditor, write_batch};
pub use memory::MemoryLocationStore;
