pub mod components;

use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

use crate::{
    dialog::{Focus, PortList, PortSelectDialog},
    i18n::lang,
    tui::ui::components::{
        render_boxed_field,
        styled_label::{button_spans, input_spans_with_placeholder, TextState},
    },
};

fn list_block(title: &str, focused: bool) -> Block<'static> {
    let mut block = Block::default()
        .title(format!(" {}", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Plain);
    if focused {
        block = block.border_style(
            Style::default()
                .fg(Color::Rgb(0, 150, 0))
                .add_modifier(Modifier::BOLD),
        );
    }
    block
}

fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(Color::Rgb(0, 100, 0))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

fn text_state(focused: bool, editable: bool) -> TextState {
    match (focused, editable) {
        (true, true) => TextState::Editing,
        (true, false) => TextState::Selected,
        _ => TextState::Normal,
    }
}

fn render_port_column(f: &mut Frame, area: Rect, dialog: &PortSelectDialog) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let focused = dialog.focus() == Focus::PortList;
    let (items, selected): (Vec<ListItem>, Option<usize>) = match dialog.ports() {
        PortList::Devices(devices) => (
            devices.iter().map(|d| ListItem::new(d.clone())).collect(),
            Some(dialog.port_selected()),
        ),
        PortList::Empty => (
            vec![ListItem::new(lang().no_ports.clone()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )],
            None,
        ),
    };
    let list = List::new(items)
        .block(list_block(&lang().port_list_label, focused))
        .highlight_style(highlight_style(focused));
    let mut state = ListState::default();
    state.select(selected);
    f.render_stateful_widget(list, rows[0], &mut state);

    let editing = dialog.focus() == Focus::PortInput;
    render_boxed_field(
        f,
        rows[1],
        dialog.port_label(),
        dialog.port_error().is_some(),
        editing,
        input_spans_with_placeholder(
            dialog.port_input(),
            Some(&lang().port_input_placeholder),
            text_state(editing, true),
        ),
    );
}

fn render_baud_column(f: &mut Frame, area: Rect, dialog: &PortSelectDialog) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let focused = dialog.focus() == Focus::BaudList;
    let items: Vec<ListItem> = dialog
        .baud_rates()
        .iter()
        .map(|b| ListItem::new(b.to_string()))
        .collect();
    let list = List::new(items)
        .block(list_block(&lang().baud_list_label, focused))
        .highlight_style(highlight_style(focused));
    let mut state = ListState::default();
    state.select(Some(dialog.baud_selected()));
    f.render_stateful_widget(list, rows[0], &mut state);

    let editing = dialog.focus() == Focus::BaudInput;
    render_boxed_field(
        f,
        rows[1],
        dialog.baud_label(),
        dialog.baud_error().is_some(),
        editing,
        input_spans_with_placeholder(
            dialog.baud_input(),
            Some(&lang().baud_input_placeholder),
            text_state(editing, true),
        ),
    );
}

pub fn render_dialog(f: &mut Frame, dialog: &PortSelectDialog) {
    let area = f.area();
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(6),
            Constraint::Length(1), // confirm button
            Constraint::Length(1), // help
        ])
        .split(area);

    let title = Paragraph::new(lang().title.clone())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Rgb(0, 150, 0))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(title, main_chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);
    render_port_column(f, columns[0], dialog);
    render_baud_column(f, columns[1], dialog);

    let confirm = button_spans(
        &lang().confirm_button,
        text_state(dialog.focus() == Focus::Confirm, false),
    );
    f.render_widget(
        Paragraph::new(Line::from(confirm)).alignment(Alignment::Center),
        main_chunks[2],
    );

    // Truncate the help line by display width so CJK/Cyrillic text never wraps.
    let help = lang().help_short.as_str();
    let width = main_chunks[3].width as usize;
    let help = if help.width() > width {
        let mut out = String::new();
        for ch in help.chars() {
            if (out.as_str().width() + ch.to_string().as_str().width()) > width {
                break;
            }
            out.push(ch);
        }
        out
    } else {
        help.to_string()
    };
    f.render_widget(
        Paragraph::new(help)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        main_chunks[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DialogConfig, dialog::DialogEvent, ports::FixedPortSource};
    use ratatui::backend::TestBackend;

    fn screen(dialog: &PortSelectDialog) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render_dialog(f, dialog)).unwrap();

        let buffer = terminal.backend().buffer();
        let area = buffer.area();
        let mut content = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                content.push_str(buffer[(x, y)].symbol());
            }
            content.push('\n');
        }
        content
    }

    fn dialog_with(ports: &[&str]) -> PortSelectDialog {
        PortSelectDialog::new(
            Box::new(FixedPortSource::new(ports.iter().copied())),
            DialogConfig::default(),
        )
    }

    #[test]
    fn renders_ports_bauds_and_labels() {
        let content = screen(&dialog_with(&["COM3", "COM4"]));
        assert!(content.contains("COM3"));
        assert!(content.contains("COM4"));
        assert!(content.contains("115200"));
        assert!(content.contains("250000"));
        assert!(content.contains(&lang().port_input_label));
        assert!(content.contains(&lang().baud_input_placeholder));
        assert!(content.contains(&lang().confirm_button));
    }

    #[test]
    fn renders_placeholder_for_empty_port_list() {
        let content = screen(&dialog_with(&[]));
        assert!(content.contains(&lang().no_ports));
    }

    #[test]
    fn renders_inline_port_error() {
        let mut dialog = dialog_with(&["COM3"]);
        dialog.set_port_input("COM3A");
        dialog.handle_event(DialogEvent::Confirm);

        let content = screen(&dialog);
        assert!(content.contains(&lang().invalid_port));
        assert!(content.contains("COM3A"));
    }
}
