use crate::domain::calendar::first_of_month;
use crate::domain::{
    generate_initial_plan, next_month, previous_month, DateKey, FiredReminder, Focus, MonthGrid, Planner,
    Task, TaskMap, TimeSlot, UiMode, UnavailableDays,
};
use crate::notifications;
use crate::persistence::{store, Settings, Store, TASKS_KEY, UNAVAILABLE_DAYS_KEY};
use crate::ticker::IntervalTimer;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, error, info};

/// Field of the input form that receives typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Hour,
    Link,
}

/// Input form state for adding a task or editing a task's link
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub text: String,
    pub hour: u32,
    pub link: String,
    pub editing_field: FormField,
    /// Task whose link is being edited (None when adding)
    pub task_id: Option<String>,
}

/// Main application state
pub struct AppState {
    pub planner: Planner,
    storage: Box<dyn Store>,
    pub settings: Settings,
    pub today: DateKey,
    /// Displayed month, always day 1
    pub current_month: NaiveDate,
    pub selected_date: DateKey,
    /// Row selected in the day panel
    pub selected_task: usize,
    pub focus: Focus,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// Fired reminders waiting to be acknowledged, oldest first
    pub alerts: VecDeque<FiredReminder>,
    /// Mode to return to once every alert is dismissed
    resume_mode: UiMode,
    reminder_timer: IntervalTimer,
}

impl AppState {
    /// Restore state from `storage`, generating the study plan on first run
    pub fn new(mut storage: Box<dyn Store>, settings: Settings, today: DateKey) -> Self {
        let planner_tasks = match store::load::<TaskMap>(storage.as_ref(), TASKS_KEY) {
            Ok(Some(tasks)) => {
                info!(days = tasks.len(), "restored tasks");
                tasks
            }
            Ok(None) => {
                info!(start = %today, "no stored tasks, generating study plan");
                let plan = generate_initial_plan(today);
                // Persist right away so the plan stays anchored to the first run
                store::write(storage.as_mut(), TASKS_KEY, &plan);
                plan
            }
            Err(e) => {
                // The next mutation overwrites the stored map
                error!(
                    location = %storage.location(TASKS_KEY),
                    error = %e,
                    "stored tasks unreadable, starting from a fresh plan"
                );
                generate_initial_plan(today)
            }
        };

        let unavailable: UnavailableDays =
            store::read(storage.as_ref(), UNAVAILABLE_DAYS_KEY, UnavailableDays::new());

        let reminder_timer = IntervalTimer::new(settings.reminder_interval(), Instant::now());

        Self {
            planner: Planner::new(planner_tasks, unavailable),
            storage,
            settings,
            today,
            current_month: first_of_month(today.date()),
            selected_date: today,
            selected_task: 0,
            focus: Focus::Calendar,
            ui_mode: UiMode::Normal,
            input_form: None,
            alerts: VecDeque::new(),
            resume_mode: UiMode::Normal,
            reminder_timer,
        }
    }

    /// Grid for the displayed month
    pub fn month_grid(&self) -> MonthGrid {
        MonthGrid::build(self.current_month, &self.planner)
    }

    /// Tasks of the selected day
    pub fn selected_tasks(&self) -> &[Task] {
        self.planner.tasks_for(self.selected_date)
    }

    pub fn selected_task_id(&self) -> Option<String> {
        self.selected_tasks().get(self.selected_task).map(|t| t.id.clone())
    }

    pub fn selected_day_unavailable(&self) -> bool {
        self.planner.is_unavailable(self.selected_date)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    // Calendar navigation

    pub fn previous_month(&mut self) {
        self.current_month = previous_month(self.current_month);
    }

    pub fn next_month(&mut self) {
        self.current_month = next_month(self.current_month);
    }

    /// Show the current month and select today
    pub fn go_to_today(&mut self) {
        self.current_month = first_of_month(self.today.date());
        self.select_date(self.today);
    }

    /// Select a day; resets the task cursor
    pub fn select_date(&mut self, day: DateKey) {
        if day != self.selected_date {
            self.selected_date = day;
            self.selected_task = 0;
        }
    }

    /// Move the selected day within the displayed month. If the selection is in
    /// another month (after paging), the first move lands on day 1.
    pub fn move_day_selection(&mut self, days: i64) {
        if !self.selected_date.same_month(self.current_month) {
            self.select_date(DateKey::new(self.current_month));
            return;
        }

        let target = self.selected_date.add_days(days);
        if target.same_month(self.current_month) {
            self.select_date(target);
        }
    }

    // Day panel

    pub fn move_task_selection_up(&mut self) {
        self.selected_task = self.selected_task.saturating_sub(1);
    }

    pub fn move_task_selection_down(&mut self) {
        if self.selected_task + 1 < self.selected_tasks().len() {
            self.selected_task += 1;
        }
    }

    pub fn toggle_selected_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.planner.toggle_task(self.selected_date, &id) {
                self.persist_tasks();
            }
        }
    }

    pub fn delete_selected_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.planner.delete_task(self.selected_date, &id) {
                self.persist_tasks();
                let remaining = self.selected_tasks().len();
                self.selected_task = self.selected_task.min(remaining.saturating_sub(1));
            }
        }
    }

    /// Remind about the selected task in `minutes`
    pub fn remind_selected_task(&mut self, minutes: i64) {
        if let Some(id) = self.selected_task_id() {
            if self.planner.set_reminder(self.selected_date, &id, minutes, Utc::now()) {
                debug!(%id, minutes, "reminder set");
                self.persist_tasks();
            }
        }
    }

    /// Move the selected task to the previous/next whole hour
    pub fn shift_selected_task(&mut self, delta_hours: i32) {
        let Some(task) = self.selected_tasks().get(self.selected_task) else {
            return;
        };
        let id = task.id.clone();
        let time = task.time.shift_hours(delta_hours);

        if self.planner.shift_task_time(self.selected_date, &id, time) {
            self.persist_tasks();
        }
    }

    pub fn toggle_day_availability(&mut self) {
        let unavailable = self.planner.toggle_day_availability(self.selected_date);
        debug!(day = %self.selected_date, unavailable, "toggled availability");
        self.persist_unavailable();
    }

    // Input form

    /// Open the add-task form for the selected day
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState {
            text: String::new(),
            hour: self.settings.default_hour % 24,
            link: String::new(),
            editing_field: FormField::Text,
            task_id: None,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the link editor for the selected task
    pub fn start_edit_link(&mut self) {
        let Some(task) = self.selected_tasks().get(self.selected_task) else {
            return;
        };

        self.input_form = Some(InputFormState {
            text: task.text.clone(),
            hour: task.time.hour(),
            link: task.resource_link.clone(),
            editing_field: FormField::Link,
            task_id: Some(task.id.clone()),
        });
        self.ui_mode = UiMode::EditingLink;
    }

    /// Cycle text -> hour -> link (the link editor only has the link field)
    pub fn input_form_next_field(&mut self) {
        if self.ui_mode != UiMode::AddingTask {
            return;
        }
        if let Some(form) = &mut self.input_form {
            form.editing_field = match form.editing_field {
                FormField::Text => FormField::Hour,
                FormField::Hour => FormField::Link,
                FormField::Link => FormField::Text,
            };
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                FormField::Text => form.text.push(c),
                FormField::Link => form.link.push(c),
                FormField::Hour => {
                    if let Some(digit) = c.to_digit(10) {
                        // Typing two digits builds an hour; anything past 23 restarts
                        let typed = (form.hour % 10) * 10 + digit;
                        form.hour = if typed < 24 { typed } else { digit };
                    }
                }
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                FormField::Text => {
                    form.text.pop();
                }
                FormField::Link => {
                    form.link.pop();
                }
                FormField::Hour => form.hour = 0,
            }
        }
    }

    /// Step the form's hour, wrapping around midnight
    pub fn input_form_adjust_hour(&mut self, delta: i32) {
        if let Some(form) = &mut self.input_form {
            form.hour = TimeSlot::on_the_hour(form.hour).shift_hours(delta).hour();
        }
    }

    /// Apply the open form. Blank task text is silently ignored.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };

        match form.task_id {
            Some(id) => {
                if self.planner.update_resource_link(self.selected_date, &id, &form.link) {
                    self.persist_tasks();
                }
            }
            None => {
                let time = TimeSlot::on_the_hour(form.hour);
                if let Some(id) = self.planner.add_task(self.selected_date, &form.text, time, &form.link) {
                    self.persist_tasks();
                    if let Some(pos) = self.selected_tasks().iter().position(|t| t.id == id) {
                        self.selected_task = pos;
                    }
                }
            }
        }

        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // Reminders

    /// Run the reminder scan if its interval has elapsed (called every tick)
    pub fn tick(&mut self) {
        if self.reminder_timer.poll(Instant::now()) {
            self.check_reminders(Utc::now());
        }
    }

    /// Fire and clear every reminder due at `now`. Returns how many fired.
    pub fn check_reminders(&mut self, now: DateTime<Utc>) -> usize {
        let fired = self.planner.take_due_reminders(now);
        if fired.is_empty() {
            return 0;
        }

        self.persist_tasks();

        for reminder in &fired {
            info!(day = %reminder.day, task = %reminder.text, "reminder fired");
            if self.settings.desktop_notifications {
                notifications::notify_reminder(&reminder.text);
            }
        }

        let count = fired.len();
        self.alerts.extend(fired);
        if self.ui_mode != UiMode::Reminder {
            self.resume_mode = self.ui_mode;
            self.ui_mode = UiMode::Reminder;
        }
        count
    }

    /// Reminder currently on screen
    pub fn current_alert(&self) -> Option<&FiredReminder> {
        self.alerts.front()
    }

    /// Acknowledge the reminder on screen; the next one (if any) takes its place
    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
        if self.alerts.is_empty() && self.ui_mode == UiMode::Reminder {
            self.ui_mode = self.resume_mode;
        }
    }

    // Write-through persistence

    fn persist_tasks(&mut self) {
        store::write(self.storage.as_mut(), TASKS_KEY, self.planner.tasks());
    }

    fn persist_unavailable(&mut self) {
        store::write(self.storage.as_mut(), UNAVAILABLE_DAYS_KEY, self.planner.unavailable_days());
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &dyn Store {
        self.storage.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn today() -> DateKey {
        DateKey::from_ymd(2024, 6, 10).unwrap()
    }

    /// App over an empty task map
    fn create_test_app() -> AppState {
        let storage = MemoryStore::default().with_entry(TASKS_KEY, "{}");
        AppState::new(Box::new(storage), Settings::default(), today())
    }

    fn stored_tasks(app: &AppState) -> TaskMap {
        store::load(app.storage(), TASKS_KEY).unwrap().unwrap()
    }

    fn add(app: &mut AppState, text: &str) {
        app.start_add_task();
        for c in text.chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();
    }

    #[test]
    fn test_first_run_generates_and_persists_plan() {
        let app = AppState::new(Box::new(MemoryStore::default()), Settings::default(), today());
        assert_eq!(app.planner.tasks().len(), 126);
        assert_eq!(app.selected_tasks().len(), 8);
        assert_eq!(stored_tasks(&app).len(), 126);
    }

    #[test]
    fn test_stored_plan_is_not_regenerated() {
        let first = AppState::new(Box::new(MemoryStore::default()), Settings::default(), today());
        let json = serde_json::to_string(first.planner.tasks()).unwrap();

        let later = today().add_days(40);
        let storage = MemoryStore::default().with_entry(TASKS_KEY, &json);
        let app = AppState::new(Box::new(storage), Settings::default(), later);

        assert_eq!(app.planner.tasks().keys().next().copied(), Some(today()));
    }

    #[test]
    fn test_corrupt_store_falls_back_without_overwriting() {
        let storage = MemoryStore::default()
            .with_entry(TASKS_KEY, "{broken")
            .with_entry(UNAVAILABLE_DAYS_KEY, "nope");
        let app = AppState::new(Box::new(storage), Settings::default(), today());

        assert_eq!(app.planner.tasks().len(), 126);
        assert!(app.planner.unavailable_days().is_empty());
        assert_eq!(app.storage().get(TASKS_KEY).unwrap().as_deref(), Some("{broken"));
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.current_month, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(app.selected_date, today());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.focus, Focus::Calendar);
        assert!(app.selected_tasks().is_empty());
    }

    #[test]
    fn test_add_task_through_form_is_persisted() {
        let mut app = create_test_app();
        app.start_add_task();
        for c in "Algorithms practice".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_next_field();
        app.input_form_adjust_hour(5); // 09:00 -> 14:00
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        let tasks = app.selected_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].time.to_string(), "14:00");
        assert_eq!(tasks[0].resource_link, "");
        assert_eq!(stored_tasks(&app)[&today()], tasks.to_vec());
    }

    #[test]
    fn test_blank_form_is_ignored() {
        let mut app = create_test_app();
        add(&mut app, "   ");
        assert!(app.selected_tasks().is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(stored_tasks(&app).is_empty());
    }

    #[test]
    fn test_hour_field_typing() {
        let mut app = create_test_app();
        app.start_add_task();
        app.input_form_next_field();
        app.input_form_backspace();
        app.input_form_add_char('1');
        app.input_form_add_char('7');
        assert_eq!(app.input_form.as_ref().unwrap().hour, 17);
        app.input_form_add_char('9');
        assert_eq!(app.input_form.as_ref().unwrap().hour, 9);
        app.input_form_adjust_hour(-10);
        assert_eq!(app.input_form.as_ref().unwrap().hour, 23);
    }

    #[test]
    fn test_toggle_and_delete_selected() {
        let mut app = create_test_app();
        add(&mut app, "One");
        add(&mut app, "Two");
        assert_eq!(app.selected_task, 1);

        app.toggle_selected_task();
        assert!(app.selected_tasks()[1].completed);
        assert!(stored_tasks(&app)[&today()][1].completed);

        app.delete_selected_task();
        assert_eq!(app.selected_tasks().len(), 1);
        assert_eq!(app.selected_task, 0);
        assert_eq!(stored_tasks(&app)[&today()].len(), 1);

        app.delete_selected_task();
        app.delete_selected_task();
        assert!(app.selected_tasks().is_empty());
    }

    #[test]
    fn test_shift_selected_task() {
        let mut app = create_test_app();
        add(&mut app, "Shift me");
        app.shift_selected_task(1);
        assert_eq!(app.selected_tasks()[0].time.to_string(), "10:00");
        app.shift_selected_task(-11);
        assert_eq!(app.selected_tasks()[0].time.to_string(), "23:00");
    }

    #[test]
    fn test_edit_link() {
        let mut app = create_test_app();
        add(&mut app, "Read");
        app.start_edit_link();
        assert_eq!(app.ui_mode, UiMode::EditingLink);
        for c in "https://example.org".chars() {
            app.input_form_add_char(c);
        }
        // The link editor has a single field
        app.input_form_next_field();
        assert_eq!(app.input_form.as_ref().unwrap().editing_field, FormField::Link);
        app.submit_input_form();

        assert_eq!(app.selected_tasks()[0].resource_link, "https://example.org");
        assert_eq!(stored_tasks(&app)[&today()][0].resource_link, "https://example.org");
    }

    #[test]
    fn test_toggle_day_availability_is_persisted() {
        let mut app = create_test_app();
        app.toggle_day_availability();
        assert!(app.selected_day_unavailable());
        let stored: UnavailableDays = store::read(app.storage(), UNAVAILABLE_DAYS_KEY, UnavailableDays::new());
        assert!(stored.contains(&today()));

        app.toggle_day_availability();
        assert!(!app.selected_day_unavailable());
        let stored: UnavailableDays = store::read(app.storage(), UNAVAILABLE_DAYS_KEY, UnavailableDays::new());
        assert!(stored.is_empty());
    }

    #[test]
    fn test_month_navigation_and_day_selection() {
        let mut app = create_test_app();
        app.move_day_selection(7);
        assert_eq!(app.selected_date, today().add_days(7));

        // Stays inside June
        app.move_day_selection(14);
        assert_eq!(app.selected_date, today().add_days(7));

        app.next_month();
        assert_eq!(app.current_month, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(app.selected_date, today().add_days(7));

        // First move after paging lands on day 1 of the shown month
        app.move_day_selection(1);
        assert_eq!(app.selected_date, DateKey::from_ymd(2024, 7, 1).unwrap());

        app.previous_month();
        app.previous_month();
        assert_eq!(app.current_month, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        app.go_to_today();
        assert_eq!(app.current_month, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(app.selected_date, today());
    }

    #[test]
    fn test_reminder_fires_once_and_blocks() {
        let mut app = create_test_app();
        add(&mut app, "Stretch");
        app.remind_selected_task(15);
        let at = app.selected_tasks()[0].reminder.unwrap();

        assert_eq!(app.check_reminders(at - Duration::minutes(1)), 0);
        assert_eq!(app.ui_mode, UiMode::Normal);

        assert_eq!(app.check_reminders(at), 1);
        assert_eq!(app.ui_mode, UiMode::Reminder);
        assert_eq!(app.current_alert().map(|a| a.text.as_str()), Some("Stretch"));
        assert!(app.selected_tasks()[0].reminder.is_none());
        assert!(stored_tasks(&app)[&today()][0].reminder.is_none());

        assert_eq!(app.check_reminders(at + Duration::minutes(5)), 0);

        app.dismiss_alert();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.current_alert().is_none());
    }

    #[test]
    fn test_alerts_queue_and_restore_form() {
        let mut app = create_test_app();
        add(&mut app, "First");
        app.remind_selected_task(15);
        add(&mut app, "Second");
        app.remind_selected_task(30);

        app.start_add_task();
        app.input_form_add_char('x');

        let later = Utc::now() + Duration::hours(1);
        assert_eq!(app.check_reminders(later), 2);
        assert_eq!(app.ui_mode, UiMode::Reminder);

        app.dismiss_alert();
        assert_eq!(app.ui_mode, UiMode::Reminder);
        assert_eq!(app.current_alert().map(|a| a.text.as_str()), Some("Second"));

        app.dismiss_alert();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert_eq!(app.input_form.as_ref().unwrap().text, "x");
    }
}
