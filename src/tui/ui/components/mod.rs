pub mod styled_label;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Render a boxed single-line field with a title that turns red when `error` is set.
pub fn render_boxed_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    error: bool,
    focused: bool,
    content: Vec<Span<'static>>,
) {
    let title_style = if error {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let border_style = if focused {
        Style::default().fg(Color::Rgb(0, 150, 0))
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title.to_string(), title_style),
            Span::raw(" "),
        ]));
    f.render_widget(Paragraph::new(Line::from(content)).block(block), area);
}
