pub mod calendar;
pub mod category;
pub mod date_key;
pub mod enums;
pub mod plan;
pub mod planner;
pub mod task;

pub use calendar::{next_month, previous_month, DayCell, MonthGrid};
pub use category::Category;
pub use date_key::DateKey;
pub use enums::{Focus, UiMode};
pub use plan::generate_initial_plan;
pub use planner::{FiredReminder, Planner, TaskMap, UnavailableDays, REMINDER_SHORTCUTS};
pub use task::{Task, TimeSlot};
