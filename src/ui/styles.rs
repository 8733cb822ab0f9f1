use crate::domain::Category;
use ratatui::style::{Color, Modifier, Style};

/// Pastel swatch for a category
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Practical => Color::Rgb(0xBF, 0xDB, 0xFE),
        Category::SpecializedKnowledge => Color::Rgb(0xBB, 0xF7, 0xD0),
        Category::Algorithms => Color::Rgb(0xFE, 0xF0, 0x8A),
        Category::Gate => Color::Rgb(0xE9, 0xD5, 0xFF),
        Category::Cryptography => Color::Rgb(0xFE, 0xCA, 0xCA),
        Category::SurpriseAcademic => Color::Rgb(0xC7, 0xD2, 0xFE),
        Category::SurprisePersonal => Color::Rgb(0xFB, 0xCF, 0xE8),
        Category::SurpriseProject => Color::Rgb(0xFE, 0xD7, 0xAA),
        Category::Other => Color::Rgb(0xE5, 0xE7, 0xEB),
    }
}

/// Text colored by category
pub fn category_style(category: Category) -> Style {
    Style::default().fg(category_color(category))
}

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Border of the selected calendar cell
pub fn selected_cell_style() -> Style {
    Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Day number of today
pub fn today_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Tint for days marked unavailable
pub fn unavailable_style() -> Style {
    Style::default().fg(Color::LightRed).bg(Color::Rgb(0x45, 0x0A, 0x0A))
}

/// Completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Pending reminder badge
pub fn reminder_style() -> Style {
    Style::default().fg(Color::Magenta)
}

/// Resource link text
pub fn link_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the pane that has focus
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
