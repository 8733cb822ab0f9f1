use crate::app::AppState;
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

/// Render the blocking reminder alert (front of the queue)
pub fn render_reminder_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(alert) = app.current_alert() else {
        return;
    };

    let modal_area = create_modal_area(area, 9);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::raw(""),
        Line::raw(format!("  Reminder: {}", alert.text)),
        Line::styled(format!("  {}", alert.day.label()), hint_style()),
        Line::raw(""),
    ];

    let waiting = app.alerts.len() - 1;
    if waiting > 0 {
        lines.push(Line::styled(format!("  {} more waiting", waiting), hint_style()));
    } else {
        lines.push(Line::raw(""));
    }

    lines.push(Line::from(vec![
        Span::styled("  [Enter]", modal_title_style()),
        Span::raw(" OK"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" \u{23F0} Reminder ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
