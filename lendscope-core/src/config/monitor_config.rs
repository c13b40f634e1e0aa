//! Monitoring configuration.

use serde::{Deserialize, Serialize};

/// A custom keyword signature supplied through config, merged into the
/// built-in catalogue when the monitor starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSignatureConfig {
    /// Signature id (e.g. "custom-bait-language").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Category name: "dark_pattern", "manipulation", "legal_violation",
    /// or "hidden_cost".
    pub category: String,
    /// Severity name: "low", "medium", "high", or "critical".
    pub severity: String,
    /// Keywords matched case-insensitively against node text.
    pub keywords: Vec<String>,
    /// One-line description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Configuration for the monitoring session subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Maximum number of events kept in visible history. Default: 10.
    pub history_cap: Option<usize>,
    /// Vulnerability score delta for a critical detection. Default: 15.
    pub critical_delta: Option<u32>,
    /// Vulnerability score delta for a high detection. Default: 10.
    pub high_delta: Option<u32>,
    /// Vulnerability score delta for any other detection. Default: 5.
    pub base_delta: Option<u32>,
    /// Behavior-statistics re-derivation interval in milliseconds.
    /// Default: 5000.
    pub behavior_tick_ms: Option<u64>,
    /// Auto-surface critical detections. Default: true.
    pub auto_surface: Option<bool>,
    /// Extra keyword signatures beyond the built-in catalogue.
    #[serde(default)]
    pub extra_signatures: Vec<KeywordSignatureConfig>,
}

impl MonitorConfig {
    /// Returns the effective history cap, defaulting to 10.
    pub fn effective_history_cap(&self) -> usize {
        self.history_cap.unwrap_or(10)
    }

    /// Returns the effective critical delta, defaulting to 15.
    pub fn effective_critical_delta(&self) -> u32 {
        self.critical_delta.unwrap_or(15)
    }

    /// Returns the effective high delta, defaulting to 10.
    pub fn effective_high_delta(&self) -> u32 {
        self.high_delta.unwrap_or(10)
    }

    /// Returns the effective base delta, defaulting to 5.
    pub fn effective_base_delta(&self) -> u32 {
        self.base_delta.unwrap_or(5)
    }

    /// Returns the effective behavior tick interval, defaulting to 5000 ms.
    pub fn effective_behavior_tick_ms(&self) -> u64 {
        self.behavior_tick_ms.unwrap_or(5_000)
    }

    /// Returns whether critical detections auto-surface, defaulting to true.
    pub fn effective_auto_surface(&self) -> bool {
        self.auto_surface.unwrap_or(true)
    }

    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.effective_history_cap(), 10);
        assert_eq!(config.effective_critical_delta(), 15);
        assert_eq!(config.effective_high_delta(), 10);
        assert_eq!(config.effective_base_delta(), 5);
        assert_eq!(config.effective_behavior_tick_ms(), 5_000);
        assert!(config.effective_auto_surface());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = MonitorConfig::from_toml(
            r#"
            history_cap = 5
            auto_surface = false

            [[extra_signatures]]
            id = "custom-bait"
            name = "Bait language"
            category = "dark_pattern"
            severity = "medium"
            keywords = ["guaranteed approval"]
            "#,
        )
        .unwrap();
        assert_eq!(config.effective_history_cap(), 5);
        assert!(!config.effective_auto_surface());
        assert_eq!(config.extra_signatures.len(), 1);
        assert_eq!(config.extra_signatures[0].id, "custom-bait");
    }
}
