//! Verifying location calculator
//!
//! Turns a set of access point fixes into at most one position: cluster the
//! fixes, hand the largest class to the trust policy, persist verification
//! stamps when the policy asks for it, and combine the class into a single
//! weighted fix.

use tracing::{debug, warn};
use crate::algorithms::{cluster, WeightedCombiner};
use crate::api::clock::{Clock, SystemClock};
use crate::api::types::{Calculation, CalculationReport, VerificationOutcome};
use crate::core::{Cluster, Fix};
use crate::store::{write_batch, LocationStore};
use crate::utils::{CalculatorConfig, ConfigError};
use crate::validation::{TrustAction, TrustPolicy};

/// Estimates a position from a set of possibly inconsistent fixes
pub struct VerifyingLocationCalculator {
    config: CalculatorConfig,
    policy: TrustPolicy,
    combiner: WeightedCombiner,
    clock: Box<dyn Clock>,
}

impl VerifyingLocationCalculator {
    /// Create a calculator, rejecting invalid configuration
    pub fn new(config: CalculatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: CalculatorConfig) -> Self {
        Self {
            policy: TrustPolicy::new(config.trust_window_ms),
            combiner: WeightedCombiner::with_parameters(
                config.accuracy_weight,
                config.min_signal_level,
                config.provider.clone(),
            ),
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Calculate a position at the current time of the configured clock
    pub fn calculate(&self, fixes: &[Fix], store: &mut dyn LocationStore) -> Calculation {
        self.calculate_at(fixes, self.clock.now_ms(), store)
    }

    /// Calculate a position as if the call happened at `now_ms`
    pub fn calculate_at(&self, fixes: &[Fix], now_ms: u64, store: &mut dyn LocationStore) -> Calculation {
        let classes = cluster(fixes, self.config.max_wifi_radius_m);
        let class_sizes: Vec<usize> = classes.iter().map(Cluster::len).collect();
        debug!(?class_sizes, "built classes");

        let mut report = CalculationReport::new(now_ms, class_sizes);
        let Some(largest) = classes.into_iter().next() else {
            return Calculation::no_result(report);
        };

        report.chosen_class = largest.members().iter().map(|f| f.source_id.clone()).collect();
        let decision = self.policy.decide(&largest, now_ms);
        report.branch = Some(decision.branch);
        debug!(branch = %decision.branch, size = largest.len(), "applied trust policy");

        match decision.action {
            TrustAction::Reject => Calculation::no_result(report),
            TrustAction::PassThrough => Calculation {
                fix: largest.into_members().into_iter().next(),
                verification: VerificationOutcome::NotRequired,
                report,
            },
            TrustAction::VerifyAndCombine => {
                let mut members = largest.into_members();
                let verification = self.verify(&mut members, now_ms, store);
                let (fix, weights) = self.combiner.combine_with_weights(&members);
                report.member_weights = weights;
                Calculation {
                    fix: Some(fix),
                    verification,
                    report,
                }
            }
        }
    }

    /// Stamp `members` verified at `now_ms` and persist them in one session.
    /// Store failures are reported, never propagated.
    fn verify(&self, members: &mut [Fix], now_ms: u64, store: &mut dyn LocationStore) -> VerificationOutcome {
        for fix in members.iter_mut() {
            fix.verified_at = Some(now_ms);
        }
        match write_batch(store, members) {
            Ok(count) => VerificationOutcome::Persisted { count },
            Err(e) => {
                warn!(error = %e, recoverable = e.is_recoverable(), "failed to persist verification");
                VerificationOutcome::Failed(e)
            }
        }
    }
}

impl Default for VerifyingLocationCalculator {
    fn default() -> Self {
        Self::from_validated(CalculatorConfig::default())
    }
}
