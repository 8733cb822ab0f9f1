use crate::domain::Category;
use crate::ui::styles::{border_style, category_style, title_style, unavailable_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Swatch per category, plus the unavailable tint
fn legend_line() -> Line<'static> {
    let mut spans = Vec::new();
    for category in Category::all() {
        spans.push(Span::styled("■ ", category_style(*category)));
        spans.push(Span::raw(format!("{}   ", category.name())));
    }
    spans.push(Span::styled(" ✗ Unavailable ", unavailable_style()));
    Line::from(spans)
}

/// Render the category color legend
pub fn render_legend_pane(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(legend_line())
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(border_style())
                .title(Span::styled(" Legend ", title_style())),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
