//! Trust decisions over clustered fixes

pub mod trust;

pub use trust::{PolicyBranch, TrustAction, TrustDecision, TrustPolicy};
