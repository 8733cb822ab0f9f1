use super::category::resource_link_for;
use super::date_key::DateKey;
use super::planner::TaskMap;
use super::task::{Task, TimeSlot};
use chrono::Weekday;

/// Length of the generated plan (18 weeks)
pub const PLAN_DAYS: i64 = 126;

/// Daily tasks: label, slot, and the keyword used to pick the reference link
const FIXED_TASKS: [(&str, TimeSlot, &str); 6] = [
    ("Programming Language / Specialized Knowledge", TimeSlot::new(10, 0), "Programming"),
    ("Specialized Knowledge / Practical Applications", TimeSlot::new(13, 30), "Specialized Knowledge"),
    ("Practical Application", TimeSlot::new(17, 0), "Programming"),
    ("Algorithms (Light revision)", TimeSlot::new(21, 0), "Algorithms"),
    ("GATE Preparation", TimeSlot::new(21, 30), "GATE"),
    ("ZKP, FHE, and MPC Deep Dive", TimeSlot::new(23, 30), "ZKP"),
];

const WEEKDAY_SLOT: TimeSlot = TimeSlot::new(10, 0);
const GATE_SLOT: TimeSlot = TimeSlot::new(21, 30);

/// Theory topic for a weekday as (label, link keyword). Sundays are free.
fn weekday_focus(weekday: Weekday) -> Option<(&'static str, &'static str)> {
    match weekday {
        Weekday::Mon | Weekday::Tue | Weekday::Wed => Some(("FHE Theory", "FHE")),
        Weekday::Thu | Weekday::Fri => Some(("ZKP Theory", "ZKP")),
        Weekday::Sat => Some(("MPC Theory", "MPC")),
        Weekday::Sun => None,
    }
}

/// GATE syllabus block for a zero-based week of the plan
fn gate_focus(week: i64) -> &'static str {
    match week {
        0..=3 => "GATE: Mathematics",
        4..=7 => "GATE: Core Computer Science",
        8..=11 => "GATE: Advanced Subjects",
        12..=15 => "GATE: Specialized Topics",
        _ => "GATE: Revision and Mock Tests",
    }
}

/// Build the study plan for `PLAN_DAYS` days starting at `start`.
///
/// Every day gets the six fixed tasks, then the weekday theory task (none on
/// Sunday), then the GATE task for its week. Ids are "<day>-<n>" so they stay
/// stable and unique within the day.
pub fn generate_initial_plan(start: DateKey) -> TaskMap {
    let mut plan = TaskMap::new();

    for offset in 0..PLAN_DAYS {
        let day = start.add_days(offset);
        let week = offset / 7;

        let mut tasks: Vec<Task> = FIXED_TASKS
            .iter()
            .enumerate()
            .map(|(idx, (text, slot, keyword))| {
                Task::with_id(format!("{}-{}", day, idx + 1), *text, *slot, resource_link_for(keyword))
            })
            .collect();

        if let Some((text, keyword)) = weekday_focus(day.weekday()) {
            tasks.push(Task::with_id(
                format!("{}-7", day),
                text,
                WEEKDAY_SLOT,
                resource_link_for(keyword),
            ));
        }

        tasks.push(Task::with_id(
            format!("{}-8", day),
            gate_focus(week),
            GATE_SLOT,
            resource_link_for("GATE"),
        ));

        plan.insert(day, tasks);
    }

    plan
}
