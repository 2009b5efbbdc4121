use super::model::*;

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            max_history_items: 100,
            monitoring_interval_ms: 2000,
            auto_start_monitoring: true,
            enable_auto_sync: true,
            enable_background_sync: false,
            show_char_count: true,
            device_name: None,
        }
    }
}
