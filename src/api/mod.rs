//! Public calculation API
//!
//! `VerifyingLocationCalculator` is the entry point. It takes a slice of
//! fixes and a location store, and returns a `Calculation` carrying the
//! estimated fix (if any), the verification outcome and a diagnostics report.

pub mod calculator;
pub mod clock;
pub mod types;

pub use calculator::VerifyingLocationCalculator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use types::{Calculation, CalculationReport, VerificationOutcome};
