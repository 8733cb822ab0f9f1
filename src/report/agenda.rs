use crate::domain::{DateKey, Planner};
use crate::persistence::atomic_write;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

/// Markdown agenda for `days` consecutive days starting at `start`
pub fn render_agenda(planner: &Planner, start: DateKey, days: u32) -> String {
    let mut report = String::new();

    // Header
    let last = start.add_days(i64::from(days.max(1)) - 1);
    if last == start {
        report.push_str(&format!("# Agenda - {}\n", start));
    } else {
        report.push_str(&format!("# Agenda - {} to {}\n", start, last));
    }

    for offset in 0..i64::from(days.max(1)) {
        let day = start.add_days(offset);
        let tasks = planner.tasks_for(day);

        report.push('\n');
        report.push_str(&format!("## {}", day.label()));
        if planner.is_unavailable(day) {
            report.push_str(" (unavailable)");
        }
        report.push_str("\n\n");

        if tasks.is_empty() {
            report.push_str("_No tasks scheduled._\n");
            continue;
        }

        let done = tasks.iter().filter(|t| t.completed).count();
        report.push_str(&format!("**Done:** {}/{}\n\n", done, tasks.len()));

        for task in tasks {
            let mark = if task.completed { "x" } else { " " };
            report.push_str(&format!(
                "- [{}] {} {} ({})",
                mark,
                task.time,
                task.text,
                task.category().name()
            ));
            if !task.resource_link.is_empty() {
                report.push_str(&format!(" <{}>", task.resource_link));
            }
            report.push('\n');
        }
    }

    report
}

/// Write the agenda to `output`, or to stdout when no path is given
pub fn write_agenda(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => atomic_write(path, content)
            .with_context(|| format!("Failed to write agenda: {}", path.display())),
        None => io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to print agenda"),
    }
}
