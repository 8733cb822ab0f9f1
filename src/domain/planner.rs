use super::date_key::DateKey;
use super::task::{Task, TimeSlot};
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Day key -> tasks in display order
pub type TaskMap = BTreeMap<DateKey, Vec<Task>>;

/// Days marked unavailable
pub type UnavailableDays = BTreeSet<DateKey>;

/// Hard cap on tasks per day; appends beyond it are dropped
pub const MAX_TASKS_PER_DAY: usize = 15;

/// Reminder shortcuts offered by the day panel, in minutes
pub const REMINDER_SHORTCUTS: [i64; 2] = [15, 30];

/// A reminder that was due at scan time and has been cleared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredReminder {
    pub day: DateKey,
    pub task_id: String,
    pub text: String,
}

/// The task map and unavailable-day set, plus every operation that mutates them.
///
/// Task edits are copy-on-write per day: the day's list is cloned, changed and
/// put back, leaving every other day untouched. Operations on days with no list
/// behave as if the list were empty and never create an entry.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    tasks: TaskMap,
    unavailable: UnavailableDays,
}

impl Planner {
    pub fn new(tasks: TaskMap, unavailable: UnavailableDays) -> Self {
        Self { tasks, unavailable }
    }

    pub fn tasks(&self) -> &TaskMap {
        &self.tasks
    }

    pub fn unavailable_days(&self) -> &UnavailableDays {
        &self.unavailable
    }

    /// Tasks for a day (empty if the day has none)
    pub fn tasks_for(&self, day: DateKey) -> &[Task] {
        self.tasks.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_unavailable(&self, day: DateKey) -> bool {
        self.unavailable.contains(&day)
    }

    /// Append a task to a day. Blank text is ignored, and a full day drops the
    /// newcomer. Returns the new id if the task was kept.
    pub fn add_task(&mut self, day: DateKey, text: &str, time: TimeSlot, resource_link: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        let task = Task::new(text, time, resource_link);
        let id = task.id.clone();

        let mut next = self.tasks_for(day).to_vec();
        next.push(task);
        next.truncate(MAX_TASKS_PER_DAY);

        let kept = next.iter().any(|t| t.id == id);
        self.tasks.insert(day, next);

        if kept {
            debug!(%day, %id, "added task");
            Some(id)
        } else {
            debug!(%day, "day is full, task dropped");
            None
        }
    }

    /// Flip the completed flag
    pub fn toggle_task(&mut self, day: DateKey, id: &str) -> bool {
        self.update_task(day, id, |task| task.completed = !task.completed)
    }

    pub fn delete_task(&mut self, day: DateKey, id: &str) -> bool {
        let Some(current) = self.tasks.get(&day) else {
            return false;
        };
        if !current.iter().any(|t| t.id == id) {
            return false;
        }

        let next: Vec<Task> = current.iter().filter(|t| t.id != id).cloned().collect();
        self.tasks.insert(day, next);
        debug!(%day, %id, "deleted task");
        true
    }

    /// Set the reminder to `now + minutes`
    pub fn set_reminder(&mut self, day: DateKey, id: &str, minutes: i64, now: DateTime<Utc>) -> bool {
        let at = now + Duration::minutes(minutes);
        self.update_task(day, id, |task| task.reminder = Some(at))
    }

    pub fn shift_task_time(&mut self, day: DateKey, id: &str, time: TimeSlot) -> bool {
        self.update_task(day, id, |task| task.time = time)
    }

    pub fn update_resource_link(&mut self, day: DateKey, id: &str, link: &str) -> bool {
        self.update_task(day, id, |task| task.resource_link = link.to_string())
    }

    /// Toggle a day's membership in the unavailable set. Returns true if the day
    /// is now unavailable.
    pub fn toggle_day_availability(&mut self, day: DateKey) -> bool {
        if self.unavailable.remove(&day) {
            false
        } else {
            self.unavailable.insert(day);
            true
        }
    }

    /// Clear every reminder that is due at `now` and report them, in day order.
    /// A cleared reminder can't fire again.
    pub fn take_due_reminders(&mut self, now: DateTime<Utc>) -> Vec<FiredReminder> {
        let due: Vec<FiredReminder> = self
            .tasks
            .iter()
            .flat_map(|(day, tasks)| {
                tasks
                    .iter()
                    .filter(|task| task.reminder_due(now))
                    .map(|task| FiredReminder {
                        day: *day,
                        task_id: task.id.clone(),
                        text: task.text.clone(),
                    })
            })
            .collect();

        for fired in &due {
            self.update_task(fired.day, &fired.task_id, |task| task.reminder = None);
        }

        due
    }

    /// Replace one task on a day with an edited copy
    fn update_task<F: FnOnce(&mut Task)>(&mut self, day: DateKey, id: &str, edit: F) -> bool {
        let Some(current) = self.tasks.get(&day) else {
            return false;
        };
        let Some(pos) = current.iter().position(|t| t.id == id) else {
            return false;
        };

        let mut next = current.clone();
        edit(&mut next[pos]);
        self.tasks.insert(day, next);
        true
    }
}
