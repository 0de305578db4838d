use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextState {
    Normal,
    Selected,
    Editing,
}

/// Input spans with placeholder support.
/// When the value is empty and a placeholder is provided, the placeholder is
/// shown in gray italic, except while editing.
pub fn input_spans_with_placeholder<'a>(
    current_value: impl ToString,
    placeholder: Option<impl ToString>,
    state: TextState,
) -> Vec<Span<'a>> {
    let value_str = current_value.to_string();
    let placeholder = placeholder
        .map(|p| p.to_string())
        .filter(|_| value_str.is_empty());

    let mut out: Vec<Span> = Vec::new();
    match state {
        TextState::Normal => match placeholder {
            Some(text) => out.push(Span::styled(
                text,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
            None => out.push(Span::raw(value_str)),
        },
        TextState::Selected => match placeholder {
            Some(text) => out.push(Span::styled(
                text,
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )),
            None => out.push(Span::styled(value_str, Style::default().fg(Color::Green))),
        },
        TextState::Editing => {
            out.push(Span::styled(
                "> ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            out.push(Span::styled(value_str, Style::default().fg(Color::Yellow)));
            out.push(Span::styled(
                "_",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }
    out
}

pub fn button_spans<'a>(text: impl ToString, state: TextState) -> Vec<Span<'a>> {
    let text = format!("[ {} ]", text.to_string());
    match state {
        TextState::Normal => vec![Span::raw(text)],
        TextState::Selected | TextState::Editing => vec![Span::styled(
            text,
            Style::default()
                .bg(Color::Rgb(0, 100, 0))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )],
    }
}
