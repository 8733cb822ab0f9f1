use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

fn hints(mode: UiMode) -> Vec<&'static str> {
    match mode {
        UiMode::Normal => vec![
            " Tab focus   ",
            "←↑↓→ move   ",
            "[ / ] month   ",
            "t today   ",
            "Enter done   ",
            "a add   ",
            "l link   ",
            "1/3 remind 15/30m   ",
            "+ / - hour   ",
            "d delete   ",
            "u unavailable   ",
            "q quit",
        ],
        UiMode::AddingTask => vec![" Tab field   ", "↑/↓ hour   ", "Enter add   ", "Esc cancel"],
        UiMode::EditingLink => vec![" Enter save   ", "Esc cancel"],
        UiMode::Reminder => vec![" Enter/Esc dismiss"],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let line = Line::from(hints(mode).into_iter().map(Span::raw).collect::<Vec<_>>());
    let paragraph = Paragraph::new(line).style(hint_style());
    f.render_widget(paragraph, area);
}
