//! Trust policy for the winning class of fixes
//!
//! A class is only turned into a result when it is corroborated: either by
//! size (three or more agreeing fixes) or by a recent verification of one of
//! its members. Corroborated classes are re-verified so they can vouch for
//! themselves on later calls.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::core::{Cluster, TRUST_WINDOW_MS};

/// Which tier of the policy handled a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyBranch {
    /// Single fix with a verification inside the trust window
    VerifiedSingleton,
    /// Single fix without a recent verification
    UnverifiedSingleton,
    /// Two fixes, at least one recently verified
    DualVerified,
    /// Two fixes, none recently verified
    DualUnverified,
    /// Three or more fixes, self-corroborating
    Multi,
}

impl fmt::Display for PolicyBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyBranch::VerifiedSingleton => "verified-singleton",
            PolicyBranch::UnverifiedSingleton => "unverified-singleton",
            PolicyBranch::DualVerified => "dual-verified",
            PolicyBranch::DualUnverified => "dual-unverified",
            PolicyBranch::Multi => "multi",
        };
        f.write_str(name)
    }
}

/// What to do with a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustAction {
    /// Produce no result
    Reject,
    /// Return the single member unchanged
    PassThrough,
    /// Stamp all members verified, persist them, then combine
    VerifyAndCombine,
}

/// Outcome of applying the trust policy to a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustDecision {
    pub branch: PolicyBranch,
    pub action: TrustAction,
}

impl TrustDecision {
    pub fn produces_result(&self) -> bool {
        self.action != TrustAction::Reject
    }

    pub fn should_verify(&self) -> bool {
        self.action == TrustAction::VerifyAndCombine
    }
}

/// Decides whether a class is trustworthy
#[derive(Debug, Clone)]
pub struct TrustPolicy {
    /// How long a verification remains valid (milliseconds)
    pub trust_window_ms: u64,
}

impl Default for TrustPolicy {
    fn default() -> Self {
        Self {
            trust_window_ms: TRUST_WINDOW_MS,
        }
    }
}

impl TrustPolicy {
    pub fn new(trust_window_ms: u64) -> Self {
        Self { trust_window_ms }
    }

    /// Apply the size tiers to `class` at time `now_ms`
    pub fn decide(&self, class: &Cluster, now_ms: u64) -> TrustDecision {
        let verified = class.verified_count(now_ms, self.trust_window_ms);
        let (branch, action) = match class.len() {
            0 => (PolicyBranch::UnverifiedSingleton, TrustAction::Reject),
            1 if verified > 0 => (PolicyBranch::VerifiedSingleton, TrustAction::PassThrough),
            1 => (PolicyBranch::UnverifiedSingleton, TrustAction::Reject),
            // A verified member vouches for its partner as well
            2 if verified > 0 => (PolicyBranch::DualVerified, TrustAction::VerifyAndCombine),
            2 => (PolicyBranch::DualUnverified, TrustAction::Reject),
            _ => (PolicyBranch::Multi, TrustAction::VerifyAndCombine),
        };
        TrustDecision { branch, action }
    }
}
