use crate::app::AppState;
use crate::domain::{Focus, Task};
use crate::ui::styles::{
    border_style, category_style, default_style, done_style, focused_border_style, hint_style, link_style,
    reminder_style, selected_style, title_style, unavailable_style,
};
use chrono::{DateTime, Duration, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Countdown like "14m" or "1h 05m"
pub(crate) fn format_countdown(left: Duration) -> String {
    let total_minutes = (left.num_seconds() + 59) / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Lines for one task row: checkbox, time, text, reminder, then link underneath
fn task_lines(task: &Task, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let text_style = if task.completed {
        done_style()
    } else {
        default_style()
    };

    let mut spans = vec![
        Span::styled("■ ", category_style(task.category())),
        Span::raw(checkbox),
        Span::styled(format!("{} - ", task.time), hint_style()),
        Span::styled(task.text.clone(), text_style),
    ];
    if let Some(left) = task.reminder_remaining(now) {
        spans.push(Span::styled(format!("  ⏰ {}", format_countdown(left)), reminder_style()));
    }

    let mut lines = vec![Line::from(spans)];
    if !task.resource_link.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("      "),
            Span::styled(task.resource_link.clone(), link_style()),
        ]));
    }
    lines
}

/// Render the task list of the selected day
pub fn render_day_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let border = if app.focus == Focus::Day {
        focused_border_style()
    } else {
        border_style()
    };

    let mut title = vec![Span::styled(format!(" {} ", app.selected_date.label()), title_style())];
    if app.selected_day_unavailable() {
        title.push(Span::styled("Unavailable ", unavailable_style()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Line::from(title));

    let tasks = app.selected_tasks();
    if tasks.is_empty() {
        let empty = Paragraph::new(Line::styled("No tasks. Press 'a' to add one.", hint_style())).block(block);
        f.render_widget(empty, area);
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = tasks.iter().map(|task| ListItem::new(task_lines(task, now))).collect();

    let list = List::new(items).block(block).highlight_style(selected_style());

    let mut state = ListState::default();
    if app.focus == Focus::Day {
        state.select(Some(app.selected_task.min(tasks.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeSlot;
    use pretty_assertions::assert_eq;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(Duration::seconds(30)), "1m");
        assert_eq!(format_countdown(Duration::minutes(15)), "15m");
        assert_eq!(format_countdown(Duration::minutes(65)), "1h 05m");
    }

    #[test]
    fn test_task_lines() {
        let now = Utc::now();
        let mut task = Task::new("Algorithms practice", TimeSlot::on_the_hour(14), "");
        let lines = task_lines(&task, now);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "■ [ ] 14:00 - Algorithms practice");

        task.completed = true;
        task.reminder = Some(now + Duration::minutes(30));
        task.resource_link = "https://example.org".into();
        let lines = task_lines(&task, now);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "■ [x] 14:00 - Algorithms practice  ⏰ 30m");
        assert_eq!(line_text(&lines[1]).trim(), "https://example.org");
    }
}
