use crate::app::AppState;
use crate::domain::{Focus, UiMode, REMINDER_SHORTCUTS};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingLink => handle_input_form_mode(app, key),
        UiMode::Reminder => handle_reminder_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let day_focus = app.focus == Focus::Day;

    match key.code {
        KeyCode::Tab => app.toggle_focus(),

        // Month paging
        KeyCode::Char('[') => app.previous_month(),
        KeyCode::Char(']') => app.next_month(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.go_to_today(),

        // Arrows move the day in the calendar, the task row in the day panel
        KeyCode::Left if app.focus == Focus::Calendar => app.move_day_selection(-1),
        KeyCode::Right if app.focus == Focus::Calendar => app.move_day_selection(1),
        KeyCode::Up => match app.focus {
            Focus::Calendar => app.move_day_selection(-7),
            Focus::Day => app.move_task_selection_up(),
        },
        KeyCode::Down => match app.focus {
            Focus::Calendar => app.move_day_selection(7),
            Focus::Day => app.move_task_selection_down(),
        },

        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),

        // Row actions only apply while the highlighted row is visible
        KeyCode::Enter | KeyCode::Char(' ') if day_focus => app.toggle_selected_task(),
        KeyCode::Char('l') | KeyCode::Char('L') if day_focus => app.start_edit_link(),

        KeyCode::Char('1') if day_focus => app.remind_selected_task(REMINDER_SHORTCUTS[0]),
        KeyCode::Char('3') if day_focus => app.remind_selected_task(REMINDER_SHORTCUTS[1]),

        KeyCode::Char('+') | KeyCode::Char('=') if day_focus => app.shift_selected_task(1),
        KeyCode::Char('-') | KeyCode::Char('_') if day_focus => app.shift_selected_task(-1),

        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete if day_focus => app.delete_selected_task(),

        KeyCode::Char('u') | KeyCode::Char('U') => app.toggle_day_availability(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the add-task form and the link editor
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),

        // Cycle text / hour / link
        KeyCode::Tab => app.input_form_next_field(),

        // Hour picker
        KeyCode::Up if app.ui_mode == UiMode::AddingTask => app.input_form_adjust_hour(1),
        KeyCode::Down if app.ui_mode == UiMode::AddingTask => app.input_form_adjust_hour(-1),

        KeyCode::Backspace => app.input_form_backspace(),

        // Add character (without Ctrl so Ctrl+C never lands in a field)
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.input_form_add_char(c),

        _ => {}
    }
    Ok(false)
}

/// The reminder alert blocks everything until acknowledged
fn handle_reminder_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        app.dismiss_alert();
    }
    Ok(false)
}
