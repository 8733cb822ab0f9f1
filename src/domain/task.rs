use super::category::Category;
use chrono::{DateTime, Duration, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a "HH:MM" slot can't be parsed
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid time slot '{0}', expected HH:MM")]
pub struct ParseTimeSlotError(String);

/// Time of day a task is scheduled at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    hour: u32,
    minute: u32,
}

impl TimeSlot {
    /// Build a slot, wrapping out-of-range values into the day
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }

    /// Whole-hour slot ("HH:00")
    pub const fn on_the_hour(hour: u32) -> Self {
        Self::new(hour, 0)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Whole-hour slot `delta` hours away, wrapping around midnight
    pub fn shift_hours(&self, delta: i32) -> Self {
        let hour = (self.hour as i32 + delta).rem_euclid(24) as u32;
        Self::on_the_hour(hour)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeSlot {
    type Err = ParseTimeSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeSlotError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        let hour: u32 = h.parse().map_err(|_| err())?;
        let minute: u32 = m.parse().map_err(|_| err())?;
        if hour >= 24 || minute >= 60 {
            return Err(err());
        }
        Ok(Self { hour, minute })
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// A single scheduled task on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique within the day's list
    pub id: String,
    /// Free-form label, also the classification key
    pub text: String,
    pub time: TimeSlot,
    #[serde(default)]
    pub completed: bool,
    /// Absolute time the reminder fires; cleared once it has fired
    #[serde(default)]
    pub reminder: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resource_link: String,
}

impl Task {
    /// New user task with a fresh random id
    pub fn new(text: impl Into<String>, time: TimeSlot, resource_link: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), text, time, resource_link)
    }

    pub fn with_id(
        id: impl Into<String>,
        text: impl Into<String>,
        time: TimeSlot,
        resource_link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            time,
            completed: false,
            reminder: None,
            resource_link: resource_link.into(),
        }
    }

    pub fn category(&self) -> Category {
        Category::of(&self.text)
    }

    /// Check if the reminder is set and has been reached
    pub fn reminder_due(&self, now: DateTime<Utc>) -> bool {
        self.reminder.map_or(false, |at| at <= now)
    }

    /// Time left until the reminder fires (None if unset or already due)
    pub fn reminder_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.reminder
            .map(|at| at.signed_duration_since(now))
            .filter(|left| *left > Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_time_slot_display_and_parse() {
        assert_eq!(TimeSlot::new(13, 30).to_string(), "13:30");
        assert_eq!(TimeSlot::on_the_hour(9).to_string(), "09:00");
        assert_eq!("21:30".parse::<TimeSlot>().unwrap(), TimeSlot::new(21, 30));
        assert!("24:00".parse::<TimeSlot>().is_err());
        assert!("9am".parse::<TimeSlot>().is_err());
        assert!("10:75".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_time_slot_shift_hours_wraps() {
        assert_eq!(TimeSlot::new(13, 30).shift_hours(1), TimeSlot::on_the_hour(14));
        assert_eq!(TimeSlot::on_the_hour(23).shift_hours(1), TimeSlot::on_the_hour(0));
        assert_eq!(TimeSlot::on_the_hour(0).shift_hours(-1), TimeSlot::on_the_hour(23));
    }

    #[test]
    fn test_task_new_defaults() {
        let task = Task::new("Read paper", TimeSlot::on_the_hour(14), "");
        assert!(!task.completed);
        assert!(task.reminder.is_none());
        assert!(task.resource_link.is_empty());
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn test_task_json_layout() {
        let mut task = Task::with_id("2024-06-10-4", "Algorithms (Light revision)", TimeSlot::new(21, 0), "https://x");
        task.reminder = Some(Utc.with_ymd_and_hms(2024, 6, 10, 20, 45, 0).unwrap());

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["time"], "21:00");
        assert_eq!(value["resourceLink"], "https://x");
        assert_eq!(value["completed"], false);
        assert_eq!(value["reminder"], "2024-06-10T20:45:00Z");
    }

    #[test]
    fn test_task_json_missing_optional_fields() {
        let json = r#"{"id":"a","text":"GATE: Mathematics","time":"21:30"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task, Task::with_id("a", "GATE: Mathematics", TimeSlot::new(21, 30), ""));

        let json = r#"{"id":"a","text":"x","time":"10:00","completed":true,"reminder":null,"resourceLink":""}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.completed);
        assert!(task.reminder.is_none());
    }

    #[test]
    fn test_reminder_due() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let mut task = Task::new("x", TimeSlot::on_the_hour(9), "");
        assert!(!task.reminder_due(now));

        task.reminder = Some(now + Duration::minutes(15));
        assert!(!task.reminder_due(now));
        assert_eq!(task.reminder_remaining(now), Some(Duration::minutes(15)));

        assert!(task.reminder_due(now + Duration::minutes(15)));
        assert_eq!(task.reminder_remaining(now + Duration::minutes(15)), None);
    }
}
