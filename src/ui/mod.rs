pub mod calendar_pane;
pub mod day_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod legend_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use calendar_pane::render_calendar_pane;
use day_pane::render_day_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use legend_pane::render_legend_pane;
use modal::render_reminder_modal;
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_calendar_pane(f, app, layout.calendar_area);
    render_day_pane(f, app, layout.day_area);
    render_legend_pane(f, layout.legend_area);

    // Input form stays underneath a reminder that fires while it is open
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }

    if app.ui_mode == UiMode::Reminder {
        render_reminder_modal(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateKey;
    use crate::persistence::{MemoryStore, Settings};
    use chrono::{Duration, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_full_screen_with_reminder() {
        let mut app = AppState::new(
            Box::new(MemoryStore::default()),
            Settings::default(),
            DateKey::from_ymd(2024, 6, 10).unwrap(),
        );

        let text = screen(&app);
        assert!(text.contains("June 2024"));
        assert!(text.contains("Mon Jun 10 2024"));
        assert!(text.contains("Legend"));

        app.remind_selected_task(15);
        app.check_reminders(Utc::now() + Duration::minutes(16));
        let text = screen(&app);
        assert!(text.contains("Reminder: "));
    }
}
