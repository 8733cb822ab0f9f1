use crate::app::AppState;
use crate::domain::{DateKey, DayCell, Focus};
use crate::ui::layout::grid_cells;
use crate::ui::styles::{
    border_style, category_style, done_style, focused_border_style, hint_style, selected_cell_style,
    title_style, today_style, unavailable_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Cut `text` to `width` characters, marking the cut with '…'
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Preview lines for one calendar cell
fn cell_lines(cell: &DayCell, width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = cell
        .previews
        .iter()
        .map(|preview| {
            let style = if preview.completed {
                done_style()
            } else {
                category_style(preview.category)
            };
            Line::from(Span::styled(truncate(&preview.text, width), style))
        })
        .collect();

    if cell.hidden > 0 {
        lines.push(Line::from(Span::styled(format!("+{} more", cell.hidden), hint_style())));
    }
    lines
}

fn render_cell(f: &mut Frame, cell: &DayCell, area: Rect, today: DateKey, selected: DateKey) {
    let number_style = if cell.day == today {
        today_style()
    } else {
        title_style()
    };
    let border = if cell.day == selected {
        selected_cell_style()
    } else {
        border_style()
    };
    let background = if cell.unavailable {
        unavailable_style()
    } else {
        Style::default()
    };

    let mut title = vec![Span::styled(format!("{:>2}", cell.day.day()), number_style)];
    if cell.unavailable {
        title.push(Span::styled(" ✗", unavailable_style()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Line::from(title))
        .style(background);

    let width = area.width.saturating_sub(2) as usize;
    let paragraph = Paragraph::new(cell_lines(cell, width)).block(block);
    f.render_widget(paragraph, area);
}

/// Render the month grid
pub fn render_calendar_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let grid = app.month_grid();

    let border = if app.focus == Focus::Calendar {
        focused_border_style()
    } else {
        border_style()
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(format!(" {} ", grid.title()), title_style()));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Weekday names
            Constraint::Min(0),    // Cells
        ])
        .split(inner);

    let header_cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, 7); 7])
        .split(chunks[0]);
    for (name, slot) in WEEKDAY_NAMES.iter().zip(header_cells.iter()) {
        f.render_widget(Paragraph::new(Span::styled(*name, hint_style())), *slot);
    }

    let weeks = grid.weeks();
    let rects = grid_cells(chunks[1], weeks.len());
    for (week, row) in weeks.iter().zip(rects.iter()) {
        for (cell, rect) in week.iter().zip(row.iter()) {
            if let Some(cell) = cell {
                render_cell(f, cell, *rect, app.today, app.selected_date);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::TaskPreview;
    use crate::domain::Category;
    use crate::persistence::{MemoryStore, Settings, TASKS_KEY};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Algorithms", 20), "Algorithms");
        assert_eq!(truncate("Algorithms", 5), "Algo…");
        assert_eq!(truncate("Algorithms", 0), "");
    }

    #[test]
    fn test_cell_lines_show_overflow() {
        let cell = DayCell {
            day: DateKey::from_ymd(2024, 6, 10).unwrap(),
            previews: vec![TaskPreview {
                text: "GATE: Mathematics".into(),
                completed: false,
                category: Category::Gate,
            }],
            hidden: 2,
            unavailable: false,
        };
        let lines = cell_lines(&cell, 8);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, "GATE: M…");
        assert_eq!(lines[1].spans[0].content, "+2 more");
    }

    #[test]
    fn test_render_calendar_pane() {
        let storage = MemoryStore::default().with_entry(TASKS_KEY, "{}");
        let app = AppState::new(
            Box::new(storage),
            Settings::default(),
            DateKey::from_ymd(2024, 6, 10).unwrap(),
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render_calendar_pane(f, &app, f.size())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("June 2024"));
        assert!(text.contains("Sun"));
        assert!(text.contains("30"));
    }
}
