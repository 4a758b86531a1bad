//! Configuration types for the autopermit monitor.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::action::ButtonAction;
use crate::{Error, Result};

/// Monitor configuration loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Per-button configuration, keyed by button name.
    ///
    /// A `BTreeMap` keeps the per-cycle scan order fixed and deterministic.
    pub buttons: BTreeMap<String, ButtonConfig>,
    /// Timing and matching settings
    pub settings: Settings,
    /// Allow-list settings
    pub allow_list: AllowListSettings,
    /// Action journal settings
    pub journal: JournalSettings,
    /// Candidate window titles; the first one located wins
    pub window_titles: Vec<String>,
    /// Directory holding the reference button images
    pub assets_dir: PathBuf,
}

impl MonitorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: MonitorConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to YAML, for writing the default config file.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.settings.check_interval_ms == 0 {
            return Err(Error::Config(
                "settings.check_interval_ms must be > 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.settings.confidence) {
            return Err(Error::Config(
                "settings.confidence must be within [0, 1]".to_string(),
            ));
        }

        if self.allow_list.refresh_interval_ms == 0 {
            return Err(Error::Config(
                "allow_list.refresh_interval_ms must be > 0".to_string(),
            ));
        }

        for (name, button) in &self.buttons {
            button
                .validate()
                .map_err(|e| Error::Config(format!("button '{name}': {e}")))?;
        }

        Ok(())
    }

    /// Confidence threshold for a button, falling back to the global default.
    pub fn button_confidence(&self, button: &ButtonConfig) -> f32 {
        button.confidence.unwrap_or(self.settings.confidence)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        let mut buttons = BTreeMap::new();
        buttons.insert(
            "confirm".to_string(),
            ButtonConfig::new("confirm.png", ButtonAction::Approve, "Confirm button"),
        );
        buttons.insert(
            "deny".to_string(),
            ButtonConfig::new("deny.png", ButtonAction::Skip, "Deny button"),
        );
        buttons.insert(
            "accept".to_string(),
            ButtonConfig::new("accept.png", ButtonAction::Skip, "Accept button"),
        );
        buttons.insert(
            "reject".to_string(),
            ButtonConfig::new("reject.png", ButtonAction::Skip, "Reject button"),
        );
        buttons.insert(
            "deny_confirm_combo".to_string(),
            ButtonConfig::new(
                "deny_confirm.png",
                ButtonAction::Approve,
                "Deny/Confirm combo",
            ),
        );
        buttons.insert(
            "accept_reject_combo".to_string(),
            ButtonConfig::new(
                "accept_reject.png",
                ButtonAction::Skip,
                "Accept/Reject combo",
            ),
        );

        Self {
            buttons,
            settings: Settings::default(),
            allow_list: AllowListSettings::default(),
            journal: JournalSettings::default(),
            window_titles: vec![
                "Antigravity".to_string(),
                "Open Agent Manager".to_string(),
            ],
            assets_dir: PathBuf::from("assets"),
        }
    }
}

/// Per-button configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonConfig {
    /// Reference image filename, relative to the assets directory
    pub image: String,
    /// Action performed when this button is detected
    pub action: ButtonAction,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Per-button confidence threshold; `None` uses the global default
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl ButtonConfig {
    /// Create a button configuration.
    pub fn new(image: &str, action: ButtonAction, description: &str) -> Self {
        Self {
            image: image.to_string(),
            action,
            description: description.to_string(),
            confidence: None,
        }
    }

    /// Validate button configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.image.trim().is_empty() {
            return Err(Error::Config("image filename cannot be empty".to_string()));
        }
        if let Some(confidence) = self.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(Error::Config(
                    "confidence must be within [0, 1]".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Timing and matching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sleep between detection cycles, in milliseconds
    pub check_interval_ms: u64,
    /// Delay inserted before dispatching an input event, in milliseconds
    pub action_delay_ms: u64,
    /// Minimum elapsed time between any two dispatched actions, in milliseconds
    pub cooldown_ms: u64,
    /// Default confidence threshold for buttons without their own
    pub confidence: f32,
    /// Ring the terminal bell when a button is skipped
    pub sound_alert_on_skip: bool,
}

impl Settings {
    /// Sleep between detection cycles.
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    /// Delay inserted before dispatching an input event.
    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }

    /// Minimum elapsed time between any two dispatched actions.
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_interval_ms: 500,
            action_delay_ms: 300,
            cooldown_ms: 2000,
            confidence: 0.8,
            sound_alert_on_skip: true,
        }
    }
}

/// Allow-list settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowListSettings {
    /// Whether the allow-list restriction is active
    pub enabled: bool,
    /// Path to the line-oriented allow-list text file
    pub path: PathBuf,
    /// Minimum interval between file re-reads, in milliseconds
    pub refresh_interval_ms: u64,
    /// When the list is empty, fall back to configured actions instead of
    /// suppressing everything
    pub fallback_on_empty: bool,
}

impl AllowListSettings {
    /// Minimum interval between file re-reads.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

impl Default for AllowListSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("allow_list.txt"),
            refresh_interval_ms: 5000,
            fallback_on_empty: true,
        }
    }
}

/// Action journal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    /// Whether decisions are appended to the journal file
    pub log_actions: bool,
    /// Path of the journal file
    pub path: PathBuf,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            log_actions: true,
            path: PathBuf::from("permission_log.txt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.settings.check_interval_ms, 500);
        assert_eq!(config.settings.action_delay_ms, 300);
        assert_eq!(config.settings.cooldown_ms, 2000);
        assert_eq!(config.settings.confidence, 0.8);
        assert!(config.settings.sound_alert_on_skip);
        assert_eq!(config.buttons.len(), 6);
        assert_eq!(
            config.buttons["confirm"].action,
            ButtonAction::Approve
        );
        assert_eq!(config.buttons["accept"].action, ButtonAction::Skip);
        assert!(!config.allow_list.enabled);
        assert!(config.allow_list.fallback_on_empty);
    }

    #[test]
    fn test_config_validation() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_check_interval() {
        let mut config = MonitorConfig::default();
        config.settings.check_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_confidence() {
        let mut config = MonitorConfig::default();
        config.settings.confidence = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_button_confidence() {
        let mut config = MonitorConfig::default();
        config
            .buttons
            .get_mut("confirm")
            .unwrap()
            .confidence = Some(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_image_rejected() {
        let mut config = MonitorConfig::default();
        config.buttons.get_mut("deny").unwrap().image = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("button 'deny'"));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
buttons:
  confirm:
    image: confirm.png
    action: approve
    description: Confirm button
  deny:
    image: deny.png
    action: skip
    confidence: 0.9

settings:
  check_interval_ms: 250
  action_delay_ms: 100
  cooldown_ms: 1000
  confidence: 0.75

allow_list:
  enabled: true
  path: allowed.txt
  refresh_interval_ms: 2000
  fallback_on_empty: false

window_titles:
  - Antigravity
"#;

        let config = MonitorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.buttons.len(), 2);
        assert_eq!(config.settings.check_interval_ms, 250);
        assert_eq!(config.settings.cooldown(), Duration::from_secs(1));
        assert!(config.allow_list.enabled);
        assert!(!config.allow_list.fallback_on_empty);
        assert_eq!(config.allow_list.path, PathBuf::from("allowed.txt"));
        assert_eq!(config.window_titles, vec!["Antigravity".to_string()]);
        // Defaults fill the omitted sections
        assert!(config.journal.log_actions);
    }

    #[test]
    fn test_button_confidence_fallback() {
        let config = MonitorConfig::default();
        let with_own = ButtonConfig {
            confidence: Some(0.95),
            ..config.buttons["confirm"].clone()
        };
        assert_eq!(config.button_confidence(&with_own), 0.95);
        assert_eq!(
            config.button_confidence(&config.buttons["confirm"]),
            0.8
        );
    }

    #[test]
    fn test_button_order_is_deterministic() {
        let config = MonitorConfig::default();
        let names: Vec<&String> = config.buttons.keys().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = MonitorConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = MonitorConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.buttons.len(), config.buttons.len());
        assert_eq!(parsed.settings.cooldown_ms, config.settings.cooldown_ms);
    }
}
