//! Desktop notifications for fired reminders
//! Implemented for macOS (osascript) and Linux (notify-send); no-op elsewhere

#[cfg(any(target_os = "macos", target_os = "linux"))]
use std::process::Command;

/// Escape text for an AppleScript string literal (backslash first, then quote)
#[cfg(any(target_os = "macos", test))]
fn applescript_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Send a desktop notification that a reminder fired
pub fn notify_reminder(task_text: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "studycal - Reminder""#,
            applescript_string(task_text)
        );

        let result = Command::new("osascript").arg("-e").arg(&script).output();
        if let Err(e) = result {
            tracing::debug!(error = %e, "osascript notification failed");
        }
    }

    #[cfg(target_os = "linux")]
    {
        let result = Command::new("notify-send")
            .arg("studycal - Reminder")
            .arg(task_text)
            .output();
        if let Err(e) = result {
            tracing::debug!(error = %e, "notify-send notification failed");
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        let _ = task_text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_applescript_string_escapes_backslash_and_quote() {
        assert_eq!(applescript_string("Read \"SICP\""), r#"Read \"SICP\""#);
        assert_eq!(applescript_string(r#"a\"b\"#), r#"a\\\"b\\"#);
        assert_eq!(applescript_string("plain"), "plain");
    }
}
