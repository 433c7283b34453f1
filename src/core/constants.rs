//! Policy constants and physical parameters

/// Mean Earth radius used for great-circle distances (meters)
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Assumed maximum range of a Wi-Fi access point (meters)
pub const MAX_WIFI_RADIUS_M: f64 = 500.0;

/// How long a verification stays trusted (milliseconds)
pub const TRUST_WINDOW_MS: u64 = 24 * 60 * 60 * 1000;

/// Accuracy at or below which a fix gets the full accuracy weight (meters)
pub const ACCURACY_WEIGHT: f64 = 50.0;

/// Signal level floor used to normalize raw signal levels (dBm)
pub const MIN_SIGNAL_LEVEL: i32 = -200;

/// Provider name stamped on synthesized fixes by default
pub const DEFAULT_PROVIDER: &str = "wifi";
