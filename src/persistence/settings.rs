use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

fn default_reminder_check_secs() -> u64 {
    60
}

fn default_hour() -> u32 {
    9
}

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds between reminder scans
    #[serde(default = "default_reminder_check_secs")]
    pub reminder_check_secs: u64,
    /// Hour preselected in the add-task form
    #[serde(default = "default_hour")]
    pub default_hour: u32,
    /// Also send a desktop notification when a reminder fires
    #[serde(default)]
    pub desktop_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminder_check_secs: default_reminder_check_secs(),
            default_hour: default_hour(),
            desktop_notifications: false,
        }
    }
}

impl Settings {
    /// Interval of the reminder check loop (never shorter than one second)
    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_check_secs.max(1))
    }
}

/// Load settings from settings.json; a missing file means defaults
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let mut settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file: {}", path.display()))?;
    settings.default_hour %= 24;
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.reminder_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            reminder_check_secs: 30,
            default_hour: 14,
            desktop_notifications: true,
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_hour": 30}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.reminder_check_secs, 60);
        assert_eq!(settings.default_hour, 6);
        assert!(!settings.desktop_notifications);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let settings = Settings {
            reminder_check_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.reminder_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_settings_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "nope").unwrap();
        assert!(load_settings(&path).is_err());
    }
}
