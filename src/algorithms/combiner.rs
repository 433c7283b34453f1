//! Signal- and accuracy-weighted combination of a class of fixes

use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::core::{Fix, ACCURACY_WEIGHT, DEFAULT_PROVIDER, MIN_SIGNAL_LEVEL};

/// Weight assigned to one member during combination, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberWeight {
    pub source_id: String,
    pub signal_level: i32,
    pub accuracy: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Relative signal strength term (0.0 to 1.0)
    pub signal_term: f64,
    /// Saturating accuracy term (0.0 to 1.0)
    pub accuracy_term: f64,
    pub weight: f64,
}

/// Collapses a class of fixes into one weighted centroid
#[derive(Debug, Clone)]
pub struct WeightedCombiner {
    /// Accuracy (meters) at or below which a fix gets the full accuracy term
    pub accuracy_weight: f64,
    /// Floor used to map raw signal levels onto a non-negative scale
    pub min_signal_level: i32,
    /// Provider stamped on the synthesized fix
    pub provider: String,
}

impl Default for WeightedCombiner {
    fn default() -> Self {
        Self {
            accuracy_weight: ACCURACY_WEIGHT,
            min_signal_level: MIN_SIGNAL_LEVEL,
            provider: DEFAULT_PROVIDER.to_string(),
        }
    }
}

impl WeightedCombiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(accuracy_weight: f64, min_signal_level: i32, provider: impl Into<String>) -> Self {
        Self {
            accuracy_weight,
            min_signal_level,
            provider: provider.into(),
        }
    }

    /// Distance of the raw signal level from the floor
    pub fn normalized_signal(&self, fix: &Fix) -> f64 {
        (i64::from(fix.signal_level) - i64::from(self.min_signal_level)).abs() as f64
    }

    /// Per-member weights for `members`, in member order
    pub fn weights(&self, members: &[Fix]) -> Vec<MemberWeight> {
        let (min_signal, max_signal) = members.iter().map(|f| self.normalized_signal(f)).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), s| (lo.min(s), hi.max(s)),
        );
        let signal_span = max_signal - min_signal;

        members
            .iter()
            .map(|fix| {
                let signal_term = if signal_span > 0.0 {
                    (self.normalized_signal(fix) - min_signal) / signal_span
                } else {
                    0.0
                };
                let accuracy_term = self.accuracy_weight / fix.accuracy.max(self.accuracy_weight);
                MemberWeight {
                    source_id: fix.source_id.clone(),
                    signal_level: fix.signal_level,
                    accuracy: fix.accuracy,
                    latitude: fix.latitude,
                    longitude: fix.longitude,
                    signal_term,
                    accuracy_term,
                    weight: signal_term + accuracy_term,
                }
            })
            .collect()
    }

    /// Combine `members` into one fix
    ///
    /// # Panics
    /// Panics if `members` is empty; clustering never produces empty classes.
    pub fn combine(&self, members: &[Fix]) -> Fix {
        self.combine_with_weights(members).0
    }

    /// Combine `members` and also return the weight each member received
    pub fn combine_with_weights(&self, members: &[Fix]) -> (Fix, Vec<MemberWeight>) {
        assert!(!members.is_empty(), "cannot combine an empty class of fixes");

        let weights = self.weights(members);

        let mut total_weight = 0.0;
        let mut latitude = 0.0;
        let mut longitude = 0.0;
        let mut accuracy = 0.0;
        let mut altitude = 0.0;
        let mut altitude_weight = 0.0;
        let mut verified_at: Option<u64> = None;

        for (fix, member) in members.iter().zip(&weights) {
            debug!(
                weight = member.weight,
                source_id = %fix.source_id,
                signal = fix.signal_level,
                accuracy = fix.accuracy,
                latitude = fix.latitude,
                longitude = fix.longitude,
                "combining member"
            );
            let weight = member.weight;
            total_weight += weight;
            latitude += fix.latitude * weight;
            longitude += fix.longitude * weight;
            accuracy += fix.accuracy * weight;
            if let Some(alt) = fix.altitude {
                altitude += alt * weight;
                altitude_weight += weight;
            }
            if let Some(stamp) = fix.verified_at {
                verified_at = Some(verified_at.map_or(stamp, |current| current.max(stamp)));
            }
        }

        let combined = Fix {
            latitude: latitude / total_weight,
            longitude: longitude / total_weight,
            accuracy: accuracy / total_weight,
            altitude: if altitude_weight > 0.0 {
                Some(altitude / altitude_weight)
            } else {
                None
            },
            signal_level: 0,
            source_id: format!("combined:{}", members.len()),
            verified_at,
            provider: self.provider.clone(),
            combined_of: Some(members.len()),
        };

        (combined, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_signal_prefers_tighter_accuracy() {
        let tight = Fix::new("tight", 10.0, 20.0, 10.0).with_signal_level(-70);
        let loose = Fix::new("loose", 10.002, 20.002, 1000.0).with_signal_level(-70);
        let combiner = WeightedCombiner::new();

        let (combined, weights) = combiner.combine_with_weights(&[tight.clone(), loose.clone()]);

        assert_eq!(weights[0].signal_term, 0.0);
        assert_eq!(weights[1].signal_term, 0.0);
        assert!((weights[0].weight - 1.0).abs() < 1e-12);
        assert!((weights[1].weight - 0.05).abs() < 1e-12);
        assert!(weights[0].weight > weights[1].weight);

        for (value, a, b) in [
            (combined.latitude, tight.latitude, loose.latitude),
            (combined.longitude, tight.longitude, loose.longitude),
            (combined.accuracy, tight.accuracy, loose.accuracy),
        ] {
            assert!(value > a && value < b, "{} not between {} and {}", value, a, b);
            assert!((value - a).abs() < (value - b).abs());
        }
    }

    #[test]
    fn test_signal_term_spans_zero_to_one() {
        let combiner = WeightedCombiner::new();
        let members = vec![
            Fix::new("weak", 0.0, 0.0, 100.0).with_signal_level(-90),
            Fix::new("mid", 0.0, 0.0, 100.0).with_signal_level(-70),
            Fix::new("strong", 0.0, 0.0, 100.0).with_signal_level(-50),
        ];
        let weights = combiner.weights(&members);
        assert_eq!(weights[0].signal_term, 0.0);
        assert!((weights[1].signal_term - 0.5).abs() < 1e-12);
        assert_eq!(weights[2].signal_term, 1.0);
        assert!((weights[0].accuracy_term - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy_term_saturates() {
        let combiner = WeightedCombiner::new();
        let members = vec![
            Fix::new("a", 0.0, 0.0, 1.0),
            Fix::new("b", 0.0, 0.0, 50.0),
        ];
        let weights = combiner.weights(&members);
        assert_eq!(weights[0].accuracy_term, 1.0);
        assert_eq!(weights[1].accuracy_term, 1.0);
    }

    #[test]
    fn test_altitude_only_from_reporting_members() {
        let combiner = WeightedCombiner::new();
        let members = vec![
            Fix::new("a", 1.0, 1.0, 20.0).with_signal_level(-40),
            Fix::new("b", 1.0, 1.0, 30.0).with_signal_level(-80).with_altitude(312.5),
            Fix::new("c", 1.0, 1.0, 40.0).with_signal_level(-60),
        ];
        let combined = combiner.combine(&members);
        assert_eq!(combined.altitude, Some(312.5));

        let flat = combiner.combine(&[Fix::new("a", 1.0, 1.0, 20.0), Fix::new("b", 1.0, 1.0, 20.0)]);
        assert_eq!(flat.altitude, None);
    }

    #[test]
    fn test_marker_and_latest_verification() {
        let combiner = WeightedCombiner::with_parameters(50.0, -200, "test");
        let members = vec![
            Fix::new("a", 1.0, 1.0, 20.0).with_verified_at(100),
            Fix::new("b", 1.0, 1.0, 20.0),
            Fix::new("c", 1.0, 1.0, 20.0).with_verified_at(300),
        ];
        let combined = combiner.combine(&members);
        assert_eq!(combined.verified_at, Some(300));
        assert_eq!(combined.combined_of, Some(3));
        assert_eq!(combined.source_id, "combined:3");
        assert_eq!(combined.provider, "test");

        let unverified = combiner.combine(&members[1..2]);
        assert_eq!(unverified.verified_at, None);
    }

    #[test]
    #[should_panic(expected = "empty class")]
    fn test_empty_class_is_rejected() {
        WeightedCombiner::new().combine(&[]);
    }
}
