use super::category::Category;
use super::date_key::DateKey;
use super::planner::Planner;
use chrono::{Datelike, Months, NaiveDate};

/// Task previews shown inside a calendar cell
pub const PREVIEW_LIMIT: usize = 3;

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the previous month
pub fn previous_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

/// First day of the next month
pub fn next_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// Number of days in a month (last day of the month)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Preview line for a task inside a calendar cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPreview {
    pub text: String,
    pub completed: bool,
    pub category: Category,
}

/// One day of the month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: DateKey,
    pub previews: Vec<TaskPreview>,
    /// Tasks that didn't fit in the previews
    pub hidden: usize,
    pub unavailable: bool,
}

/// Sunday-first month grid
#[derive(Debug, Clone)]
pub struct MonthGrid {
    /// First day of the displayed month
    pub month: NaiveDate,
    /// Empty cells before day 1
    pub leading_blanks: usize,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build(month: NaiveDate, planner: &Planner) -> Self {
        let month = first_of_month(month);
        let leading_blanks = month.weekday().num_days_from_sunday() as usize;
        let count = days_in_month(month.year(), month.month());

        let cells = (1..=count)
            .filter_map(|d| DateKey::from_ymd(month.year(), month.month(), d))
            .map(|day| {
                let tasks = planner.tasks_for(day);
                DayCell {
                    day,
                    previews: tasks
                        .iter()
                        .take(PREVIEW_LIMIT)
                        .map(|task| TaskPreview {
                            text: task.text.clone(),
                            completed: task.completed,
                            category: task.category(),
                        })
                        .collect(),
                    hidden: tasks.len().saturating_sub(PREVIEW_LIMIT),
                    unavailable: planner.is_unavailable(day),
                }
            })
            .collect();

        Self {
            month,
            leading_blanks,
            cells,
        }
    }

    /// Rows of seven slots (None = padding before day 1 or after the last day)
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let mut slots: Vec<Option<&DayCell>> = vec![None; self.leading_blanks];
        slots.extend(self.cells.iter().map(Some));
        while slots.len() % 7 != 0 {
            slots.push(None);
        }
        slots.chunks(7).map(|week| week.to_vec()).collect()
    }

    /// Title like "June 2024"
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }
}
