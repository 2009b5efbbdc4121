use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Recognized configuration options.
///
/// Every field carries a serde default so payloads written by older versions
/// still load; unknown future fields are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    /// Bound on the history collection; the oldest entries beyond it are
    /// evicted silently.
    #[serde(default = "defaults::max_history_items")]
    pub max_history_items: usize,

    /// Clipboard poll cadence in milliseconds.
    #[serde(default = "defaults::monitoring_interval_ms")]
    pub monitoring_interval_ms: u64,

    #[serde(default = "defaults::enabled")]
    pub auto_start_monitoring: bool,

    #[serde(default = "defaults::enabled")]
    pub enable_auto_sync: bool,

    #[serde(default)]
    pub enable_background_sync: bool,

    /// Cosmetic only; carried for the UI shell, no core effect.
    #[serde(default = "defaults::enabled")]
    pub show_char_count: bool,

    #[serde(default)]
    pub device_name: Option<String>,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

mod defaults {
    pub fn max_history_items() -> usize {
        100
    }

    pub fn monitoring_interval_ms() -> u64 {
        2000
    }

    pub fn enabled() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_history_items, 100);
        assert_eq!(settings.monitoring_interval_ms, 2000);
        assert!(settings.auto_start_monitoring);
        assert!(settings.enable_auto_sync);
        assert!(!settings.enable_background_sync);
        assert!(settings.show_char_count);
    }

    #[test]
    fn partial_payload_falls_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"maxHistoryItems": 25}"#).unwrap();
        assert_eq!(settings.max_history_items, 25);
        assert_eq!(settings.monitoring_interval_ms, 2000);
        assert_eq!(settings.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn settings_round_trip_with_camel_case_keys() {
        let settings = Settings::default();
        let json = serde_json::to_value(&settings).unwrap();
        assert!(json.get("maxHistoryItems").is_some());
        assert!(json.get("monitoringIntervalMs").is_some());
        assert!(json.get("enableBackgroundSync").is_some());

        let back: Settings = serde_json::from_value(json).unwrap();
        assert_eq!(back, settings);
    }
}
