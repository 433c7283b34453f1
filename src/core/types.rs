//! Core data types for the location calculator

use serde::{Deserialize, Serialize};

/// A single position observation attributed to one wireless source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// 68% confidence radius (meters)
    pub accuracy: f64,
    /// Altitude above the ellipsoid (meters), if the source reported one
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Raw signal level as reported by the scanner (dBm, more negative is weaker)
    pub signal_level: i32,
    /// Originating source, usually the access point MAC address
    pub source_id: String,
    /// Last time this fix was verified (milliseconds since epoch)
    #[serde(default)]
    pub verified_at: Option<u64>,
    /// Name of the provider that produced the fix
    #[serde(default)]
    pub provider: String,
    /// Number of raw fixes merged into this one, set on synthesized fixes only
    #[serde(default)]
    pub combined_of: Option<usize>,
}

impl Fix {
    pub fn new(source_id: impl Into<String>, latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            altitude: None,
            signal_level: 0,
            source_id: source_id.into(),
            verified_at: None,
            provider: String::new(),
            combined_of: None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_signal_level(mut self, signal_level: i32) -> Self {
        self.signal_level = signal_level;
        self
    }

    pub fn with_verified_at(mut self, verified_at_ms: u64) -> Self {
        self.verified_at = Some(verified_at_ms);
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn has_altitude(&self) -> bool {
        self.altitude.is_some()
    }

    /// Whether this fix was verified inside the trailing window ending at `now_ms`
    pub fn is_verified_within(&self, now_ms: u64, window_ms: u64) -> bool {
        match self.verified_at {
            Some(verified_at) => verified_at > now_ms.saturating_sub(window_ms),
            None => false,
        }
    }
}

/// A group of fixes believed to describe the same physical location
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    members: Vec<Fix>,
}

impl Cluster {
    pub(crate) fn from_members(members: Vec<Fix>) -> Self {
        debug_assert!(!members.is_empty(), "clusters are never empty");
        Self { members }
    }

    pub fn members(&self) -> &[Fix] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Fix> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of members verified inside the trailing window ending at `now_ms`
    pub fn verified_count(&self, now_ms: u64, window_ms: u64) -> usize {
        self.members
            .iter()
            .filter(|fix| fix.is_verified_within(now_ms, window_ms))
            .count()
    }
}
