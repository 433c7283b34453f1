//! Verifying Wi-Fi Location Calculator
//!
//! Estimates a single position from a set of noisy access point fixes.
//! Fixes are grouped into classes of mutually consistent observations, the
//! largest class is checked against a trust policy backed by previously
//! verified fixes, and a trusted class is collapsed into one signal- and
//! accuracy-weighted fix.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod store;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{Fix, Cluster, ACCURACY_WEIGHT, MAX_WIFI_RADIUS_M, MIN_SIGNAL_LEVEL, TRUST_WINDOW_MS};
pub use algorithms::{cluster, compatible, great_circle_distance, MemberWeight, WeightedCombiner};
pub use validation::{PolicyBranch, TrustAction, TrustDecision, TrustPolicy};
pub use store::{LocationStore, StoreEditor, StoreError, StoreResult, MemoryLocationStore};
pub use utils::{CalculatorConfig, ConfigError};
pub use api::{
    VerifyingLocationCalculator, Calculation, CalculationReport, VerificationOutcome,
    Clock, SystemClock, FixedClock
};
