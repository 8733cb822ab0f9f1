use crate::app::{AppState, FormField, InputFormState};
use crate::domain::{TimeSlot, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Label line plus value line for one form field
fn field_lines(label: &str, value: String, editing: bool) -> [Line<'static>; 2] {
    let label = if editing {
        format!("{}: (editing)", label)
    } else {
        format!("{}:", label)
    };

    [
        Line::raw(label),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(value, modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]),
    ]
}

fn add_task_lines(form: &InputFormState, day_label: &str) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw(format!("Day: {}", day_label)), Line::raw("")];

    lines.extend(field_lines("Task", form.text.clone(), form.editing_field == FormField::Text));
    lines.push(Line::raw(""));
    lines.extend(field_lines(
        "Time (↑/↓)",
        TimeSlot::on_the_hour(form.hour).to_string(),
        form.editing_field == FormField::Hour,
    ));
    lines.push(Line::raw(""));
    lines.extend(field_lines("Resource link", form.link.clone(), form.editing_field == FormField::Link));
    lines.push(Line::raw(""));
    lines.push(Line::styled("Tab to switch fields  ·  Enter to add  ·  Esc to cancel", hint_style()));
    lines
}

fn edit_link_lines(form: &InputFormState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw(format!("Task: {}", form.text)), Line::raw("")];
    lines.extend(field_lines("Resource link", form.link.clone(), true));
    lines.push(Line::raw(""));
    lines.push(Line::styled("Enter to save  ·  Esc to cancel", hint_style()));
    lines
}

/// Render the add-task form or the link editor
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };

    let (title, lines) = if app.ui_mode == UiMode::EditingLink {
        (" Edit Resource Link ", edit_link_lines(form))
    } else {
        (" Add Task ", add_task_lines(form, &app.selected_date.label()))
    };

    let modal_area = create_modal_area(area, lines.len() as u16 + 2);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
