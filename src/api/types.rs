//! Result types returned by the calculator

use serde::Serialize;
use crate::algorithms::MemberWeight;
use crate::core::Fix;
use crate::store::StoreError;
use crate::validation::PolicyBranch;

/// What happened to the verification write-back of a call
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    /// The policy did not ask for verification
    NotRequired,
    /// All members were stamped and written in one session
    Persisted { count: usize },
    /// The store failed; the result of the call is still valid
    Failed(StoreError),
}

impl VerificationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, VerificationOutcome::Failed(_))
    }
}

/// Per-call diagnostics, mirrored by the emitted tracing events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationReport {
    /// Time the call was evaluated at (milliseconds since epoch)
    pub timestamp_ms: u64,
    /// Sizes of all classes, largest first
    pub class_sizes: Vec<usize>,
    /// Source ids of the class handed to the trust policy
    pub chosen_class: Vec<String>,
    /// Policy tier applied to the chosen class, if there was one
    pub branch: Option<PolicyBranch>,
    /// Weights used during combination; empty when nothing was combined
    pub member_weights: Vec<MemberWeight>,
}

impl CalculationReport {
    pub fn new(timestamp_ms: u64, class_sizes: Vec<usize>) -> Self {
        Self {
            timestamp_ms,
            class_sizes,
            chosen_class: Vec::new(),
            branch: None,
            member_weights: Vec::new(),
        }
    }
}

/// Outcome of one calculation
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// The estimated position, or `None` when the fixes were not trustworthy
    pub fix: Option<Fix>,
    pub verification: VerificationOutcome,
    pub report: CalculationReport,
}

impl Calculation {
    pub fn no_result(report: CalculationReport) -> Self {
        Self {
            fix: None,
            verification: VerificationOutcome::NotRequired,
            report,
        }
    }

    pub fn has_result(&self) -> bool {
        self.fix.is_some()
    }

    pub fn into_fix(self) -> Option<Fix> {
        self.fix
    }
}
